use eframe::egui;

use crate::app::App;
use crate::models::ipc::ExternalAction;
use crate::models::notification::Level;

pub(crate) mod panels;
pub(crate) mod widgets;

const DRAWER_WIDTH: f32 = 600.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HeaderClick {
    Back,
    External(ExternalAction),
    AddAlarm,
    Sample,
    Edit,
}

pub(crate) fn render(app: &mut App, ctx: &egui::Context) {
    address_bar(app, ctx);

    if !app.route.on_topic_page() {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label(format!("Left the topic page for {}", app.route.location.href()));
            if ui.button("Back to topic").clicked() {
                app.go_back();
            }
        });
        toasts(app, ctx);
        return;
    }

    let base_info = app.stores.base_info.get();
    if base_info.is_some() {
        header(app, ctx);
        tab_bar(app, ctx);
    }

    sampling_drawer(app, ctx);
    edit_window(app, ctx);

    egui::CentralPanel::default().show(ctx, |ui| {
        let Some(info) = &base_info else {
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new());
                ui.label("Loading topic metadata...");
            });
            return;
        };
        match app.active_tab() {
            Some(tab) if tab.visible_for(app.stores.role()) => {
                egui::ScrollArea::vertical()
                    .id_salt("tab_content")
                    .show(ui, |ui| panels::tab_content(ui, app, tab, info));
            }
            _ => {
                ui.label(format!("No tab '{}' on this page", app.route.active_tab()));
            }
        }
    });

    toasts(app, ctx);
}

fn address_bar(app: &mut App, ctx: &egui::Context) {
    egui::TopBottomPanel::top("address_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if ui
                .add_enabled(app.route.location.can_go_back(), egui::Button::new("<").small())
                .clicked()
            {
                app.go_back();
            }
            ui.monospace(app.route.location.href());
        });
    });
}

fn header(app: &mut App, ctx: &egui::Context) {
    let mut click = None;

    egui::TopBottomPanel::top("topic_header")
        .exact_height(44.0)
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                if ui.button("Back").clicked() {
                    click = Some(HeaderClick::Back);
                }
                ui.heading(app.identity.topic_or_empty());

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if app.can_edit() && ui.button("Edit").clicked() {
                        click = Some(HeaderClick::Edit);
                    }
                    if ui.button("Sample").clicked() {
                        click = Some(HeaderClick::Sample);
                    }
                    if ui.button("New alarm").clicked() {
                        click = Some(HeaderClick::AddAlarm);
                    }
                    for action in [ExternalAction::RequestExpansion, ExternalAction::RequestQuota] {
                        if ui.button(action.label()).clicked() {
                            click = Some(HeaderClick::External(action));
                        }
                    }
                    if app.identity.needs_auth()
                        && ui.button(ExternalAction::RequestPermission.label()).clicked()
                    {
                        click = Some(HeaderClick::External(ExternalAction::RequestPermission));
                    }
                });
            });
        });

    match click {
        Some(HeaderClick::Back) => app.go_back(),
        Some(HeaderClick::External(action)) => app.external_action(action),
        Some(HeaderClick::AddAlarm) => app.add_alarm(),
        Some(HeaderClick::Sample) => app.open_sampling(),
        Some(HeaderClick::Edit) => app.open_edit(),
        None => {}
    }
}

fn tab_bar(app: &mut App, ctx: &egui::Context) {
    let mut tab_to_select = None;
    let active = app.route.active_tab().to_string();

    egui::TopBottomPanel::top("tab_bar")
        .exact_height(40.0)
        .frame(
            egui::Frame::new()
                .fill(ctx.style().visuals.panel_fill)
                .inner_margin(egui::Margin::symmetric(6, 5)),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 2.0;

                for tab in app.visible_tabs() {
                    let selected = active == tab.key();
                    let (fill, stroke, text_color) = if selected {
                        (
                            ui.visuals().selection.bg_fill,
                            ui.visuals().selection.stroke,
                            ui.visuals().selection.stroke.color,
                        )
                    } else {
                        (
                            ui.visuals().widgets.inactive.bg_fill,
                            ui.visuals().widgets.inactive.bg_stroke,
                            ui.visuals().text_color(),
                        )
                    };

                    egui::Frame::new()
                        .fill(fill)
                        .stroke(stroke)
                        .corner_radius(2.0)
                        .inner_margin(egui::Margin::symmetric(12, 7))
                        .show(ui, |ui| {
                            let response = ui.add(
                                egui::Label::new(egui::RichText::new(tab.title()).color(text_color))
                                    .sense(egui::Sense::click()),
                            );
                            if response.clicked() {
                                tab_to_select = Some(tab.key());
                            }
                        });
                }
            });
        });

    if let Some(key) = tab_to_select {
        app.select_tab(key);
    }
}

fn sampling_drawer(app: &mut App, ctx: &egui::Context) {
    if !app.sampling.visible {
        return;
    }

    let mut close = false;
    let mut submit = false;
    let mut copy_all = false;
    let mut copy_index = None;

    egui::SidePanel::right("sampling_drawer")
        .resizable(true)
        .default_width(DRAWER_WIDTH)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Topic sampling");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Close").clicked() {
                        close = true;
                    }
                });
            });
            ui.separator();

            widgets::form_fields(ui, "sampling_form", &mut app.sampling.form);
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                let in_flight = app.sampling.in_flight;
                let label = if in_flight { "Sampling" } else { "Sample" };
                if ui.add_enabled(!in_flight, egui::Button::new(label)).clicked() {
                    submit = true;
                }
                if in_flight {
                    ui.add(egui::Spinner::new().size(12.0));
                }
            });

            if !app.sampling.result_visible {
                return;
            }

            ui.separator();
            ui.horizontal(|ui| {
                ui.heading(format!("Samples of {}", app.identity.topic_or_empty()));
                if ui.small_button("Copy all").clicked() {
                    copy_all = true;
                }
            });

            egui::ScrollArea::vertical()
                .id_salt("samples_scroll")
                .show(ui, |ui| {
                    if app.sampling.results.is_empty() {
                        ui.label("No messages matched the sampling window.");
                    }
                    for (index, record) in app.sampling.results.iter().enumerate() {
                        ui.push_id(index, |ui| {
                            ui.horizontal_wrapped(|ui| {
                                if ui.small_button("Copy").clicked() {
                                    copy_index = Some(index);
                                }
                                ui.monospace(&record.value);
                            });
                        });
                    }
                });
        });

    if submit {
        app.submit_sampling();
    }
    if copy_all {
        app.copy_all_samples(ctx);
    }
    if let Some(index) = copy_index {
        app.copy_sample(ctx, index);
    }
    if close {
        app.close_sampling();
    }
}

fn edit_window(app: &mut App, ctx: &egui::Context) {
    let in_flight = app.edit.in_flight;
    let Some(form) = app.edit.form.as_mut() else {
        return;
    };

    let mut open = true;
    let mut save = false;

    egui::Window::new("Edit topic")
        .collapsible(false)
        .resizable(false)
        .open(&mut open)
        .show(ctx, |ui| {
            widgets::form_fields(ui, "edit_form", form);
            ui.add_space(8.0);
            if ui.add_enabled(!in_flight, egui::Button::new("Save")).clicked() {
                save = true;
            }
        });

    if save {
        app.submit_edit();
    } else if !open {
        app.edit.close();
    }
}

fn toasts(app: &App, ctx: &egui::Context) {
    egui::Area::new(egui::Id::new("toasts"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-12.0, -12.0))
        .show(ctx, |ui| {
            for notification in app.notifications.iter() {
                let color = match notification.level {
                    Level::Success => egui::Color32::from_rgb(82, 196, 26),
                    Level::Info => ui.visuals().text_color(),
                    Level::Error => ui.visuals().error_fg_color,
                };
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.colored_label(color, &notification.message);
                });
            }
        });
}
