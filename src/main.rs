#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod app;
mod client;
mod config;
mod error;
mod form;
mod models;
mod store;
mod ui;
mod utils;

use std::sync::Arc;

use eframe::egui;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::app::App;
use crate::client::HttpTopicApi;
use crate::config::Config;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kmui=info")),
        )
        .init();

    let config = config::load().unwrap_or_else(|err| {
        warn!(%err, "falling back to the default config");
        Config::default()
    });
    // A page address on the command line wins over the configured one.
    let start = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config.start_url.clone());
    info!(%start, api = config.api_base(), "starting console");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("KMUI")
            .with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "KMUI",
        options,
        Box::new(move |cc| {
            let start_url = Url::parse(&start)?;
            let http = client::tls::build_http_client(&config)?;
            let api = Arc::new(HttpTopicApi::new(http, config.api_base()));
            let app = App::new(config, start_url, api, cc.egui_ctx.clone())?;
            Ok(Box::new(app))
        }),
    )
}
