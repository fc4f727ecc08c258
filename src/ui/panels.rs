use eframe::egui;

use crate::app::App;
use crate::app::state::TopicTab;
use crate::models::topic::TopicBaseInfo;
use crate::utils::formatting::{format_retention, format_timestamp, or_dash};

pub(crate) fn tab_content(ui: &mut egui::Ui, app: &App, tab: TopicTab, info: &TopicBaseInfo) {
    ui.heading(tab.title());
    ui.add_space(6.0);

    match tab {
        TopicTab::BaseInfo => base_info(ui, app, info),
        TopicTab::Connections => {
            key_values(
                ui,
                "connections",
                &[
                    ("Bootstrap servers", or_dash(&info.bootstrap_servers).to_string()),
                    ("Topic", app.identity.topic_or_empty().to_string()),
                ],
            );
        }
        TopicTab::ConsumerGroups => {
            let region = app.stores.region.get().unwrap_or_default();
            let detail = app.stores.consume_detail.get().unwrap_or(false);
            key_values(
                ui,
                "consumer_groups",
                &[
                    ("Region", or_dash(&region).to_string()),
                    (
                        "View",
                        if detail { "group detail" } else { "group list" }.to_string(),
                    ),
                ],
            );
        }
        TopicTab::Partitions => {
            key_values(
                ui,
                "partitions",
                &[
                    ("Partitions", info.partition_num.to_string()),
                    ("Replicas", info.replica_num.to_string()),
                ],
            );
        }
        TopicTab::Apps => app_list(ui, app),
        TopicTab::StatusChart | TopicTab::Brokers | TopicTab::Bills => {
            ui.label(format!(
                "{} for {} on cluster {}",
                tab.title(),
                app.identity.topic_or_empty(),
                cluster_label(app),
            ));
        }
    }
}

fn base_info(ui: &mut egui::Ui, app: &App, info: &TopicBaseInfo) {
    let regions = info.region_name_list.join(", ");
    key_values(
        ui,
        "base_info",
        &[
            ("Topic", app.identity.topic_or_empty().to_string()),
            ("Cluster", cluster_label(app)),
            ("Application", format!("{} ({})", or_dash(&info.app_name), or_dash(&info.app_id))),
            ("Principals", or_dash(&info.principals).to_string()),
            ("Description", or_dash(&info.description).to_string()),
            ("Partitions", info.partition_num.to_string()),
            ("Replicas", info.replica_num.to_string()),
            ("Retention", format_retention(info.retention_time)),
            ("Regions", or_dash(&regions).to_string()),
            ("Created", format_timestamp(info.create_time)),
            ("Modified", format_timestamp(info.modify_time)),
            (
                "Health score",
                info.score.map(|score| score.to_string()).unwrap_or_else(|| "-".to_string()),
            ),
        ],
    );
}

fn app_list(ui: &mut egui::Ui, app: &App) {
    let apps = app.stores.apps.get().unwrap_or_default();
    if apps.is_empty() {
        ui.label("No applications loaded");
        return;
    }

    egui::Grid::new("apps")
        .num_columns(3)
        .striped(true)
        .show(ui, |ui| {
            ui.strong("App id");
            ui.strong("Name");
            ui.strong("Principals");
            ui.end_row();
            for item in &apps {
                ui.label(&item.app_id);
                ui.label(&item.name);
                ui.label(or_dash(&item.principals));
                ui.end_row();
            }
        });
}

fn cluster_label(app: &App) -> String {
    let id = app
        .identity
        .cluster_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());
    match &app.identity.cluster_name {
        Some(name) if !name.is_empty() => format!("{name} ({id})"),
        _ => id,
    }
}

fn key_values(ui: &mut egui::Ui, id: &str, rows: &[(&str, String)]) {
    egui::Grid::new(id)
        .num_columns(2)
        .striped(true)
        .spacing([24.0, 6.0])
        .show(ui, |ui| {
            for (key, value) in rows {
                ui.strong(*key);
                ui.label(value);
                ui.end_row();
            }
        });
}
