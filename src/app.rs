use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RustyRasterApp {
    pub state: AppState,
}

impl RustyRasterApp {
    /// Start with an already configured state (e.g. a raster from the CLI).
    pub fn with_state(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for RustyRasterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: layer settings ----
        egui::SidePanel::left("layer_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: figure ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::figure_view(ui, &mut self.state);
        });
    }
}
