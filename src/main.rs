mod config;
mod engine;
mod model;
mod store;
mod ui;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, Args};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::try_from(Args::parse())?;
    info!(
        api = %config.api_base,
        data_dir = %config.data_dir.display(),
        page_size = config.page_size,
        max_id = config.max_id,
        "starting dex viewer"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Dex Viewer")
            .with_inner_size([1100.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Dex Viewer",
        options,
        Box::new(move |cc| Ok(Box::new(ui::app::DexApp::new(&cc.egui_ctx, config)))),
    )
    .map_err(|e| anyhow::anyhow!("window error: {e}"))
}
