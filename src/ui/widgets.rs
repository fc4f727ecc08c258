use eframe::egui;

use crate::form::FormState;
use crate::form::schema::{FieldKind, FieldSpec};

const FIELD_WIDTH: f32 = 260.0;

/// Renders every field of the form's schema in order, with inline errors.
pub(crate) fn form_fields(ui: &mut egui::Ui, id: &str, form: &mut FormState) {
    let fields = form.schema().fields.clone();

    egui::Grid::new(id)
        .num_columns(2)
        .spacing([12.0, 8.0])
        .show(ui, |ui| {
            for field in &fields {
                if field.is_required() {
                    ui.label(format!("* {}", field.label));
                } else {
                    ui.label(&field.label);
                }

                ui.vertical(|ui| {
                    field_input(ui, field, form);
                    if let Some(err) = form.error(&field.key) {
                        ui.colored_label(ui.visuals().error_fg_color, err);
                    }
                });
                ui.end_row();
            }
        });
}

fn field_input(ui: &mut egui::Ui, field: &FieldSpec, form: &mut FormState) {
    let enabled = !field.attrs.disabled;
    let hint = hint_text(field);

    match &field.kind {
        FieldKind::Input | FieldKind::InputNumber => {
            ui.add_enabled(
                enabled,
                egui::TextEdit::singleline(form.value_mut(&field.key))
                    .hint_text(hint)
                    .desired_width(FIELD_WIDTH),
            );
        }
        FieldKind::TextArea => {
            ui.add_enabled(
                enabled,
                egui::TextEdit::multiline(form.value_mut(&field.key))
                    .hint_text(hint)
                    .desired_rows(3)
                    .desired_width(FIELD_WIDTH),
            );
        }
        FieldKind::RadioGroup { options } => {
            ui.horizontal(|ui| {
                let value = form.value_mut(&field.key);
                for option in options {
                    let checked = *value == option.value;
                    if ui
                        .add_enabled(enabled, egui::RadioButton::new(checked, &option.label))
                        .clicked()
                    {
                        *value = option.value.clone();
                    }
                }
            });
        }
    }
}

fn hint_text(field: &FieldSpec) -> String {
    if let Some(placeholder) = &field.attrs.placeholder {
        return placeholder.clone();
    }
    match (field.attrs.min, field.attrs.max) {
        (Some(min), Some(max)) => format!("{min} - {max}"),
        (None, Some(max)) => format!("up to {max}"),
        _ => String::new(),
    }
}
