mod app;
mod chart;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::Context;
use app::LaunchDashApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::default();

    // The dashboard has nothing to show without data: a failed load aborts startup.
    let dataset = data::loader::load_source(&config.dataset_source).inspect_err(|e| {
        log::error!("{e:#}");
    })?;
    let state = AppState::new(dataset, config.dataset_source.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    let title = config.title.clone();
    eframe::run_native(
        &config.title,
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDashApp::new(title, state)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
    .context("running the dashboard window")
}
