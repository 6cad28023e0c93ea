mod app;
mod cli;
mod color;
mod data;
mod error;
mod export;
mod figure;
mod state;
mod style;
#[cfg(test)]
mod test_utils;
mod ui;

use anyhow::{Context, Result};
use app::RustyRasterApp;
use clap::Parser;
use cli::Cli;
use data::stations::load_stations;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let stations = match &cli.stations {
        Some(path) => load_stations(path)?,
        None => Vec::new(),
    };

    if let Some(out) = &cli.save {
        let raster = cli.raster.as_deref().context("--save needs a raster")?;
        let mut figure = figure::render(raster, cli.layer_type.as_deref(), cli.bands)?;
        figure.set_stations(&stations);
        log::info!("panels: {:?}", figure.titles());
        return export::save_png(&figure, out, cli.panel_height);
    }

    let mut state = AppState {
        layer_type: cli.layer_type.unwrap_or_default(),
        band_count: cli.bands,
        panel_height: cli.panel_height,
        stations,
        ..AppState::default()
    };
    if let Some(path) = cli.raster {
        state.open_raster(path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 600.0])
            .with_min_inner_size([600.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty Raster – Layer Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(RustyRasterApp::with_state(state)))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}
