use std::path::{Path, PathBuf};

use eframe::egui::TextureHandle;

use crate::data::stations::Station;
use crate::export;
use crate::figure::{render, Figure};
use crate::style::LayerKind;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Raster currently shown (None until user opens a file).
    pub raster_path: Option<PathBuf>,

    /// Layer-type label typed by the user; empty means "from directory".
    pub layer_type: String,

    /// Band-count override; None renders every band.
    pub band_count: Option<usize>,

    /// Last successfully rendered figure.
    pub figure: Option<Figure>,

    /// GNSS stations loaded from a station list.
    pub stations: Vec<Station>,

    /// Whether stations are drawn on top of the panels.
    pub show_stations: bool,

    /// One texture per panel of `figure`, uploaded lazily.
    pub textures: Vec<TextureHandle>,

    /// Panel height used for PNG export.
    pub panel_height: u32,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            raster_path: None,
            layer_type: String::new(),
            band_count: None,
            figure: None,
            stations: Vec::new(),
            show_stations: true,
            textures: Vec::new(),
            panel_height: 400,
            status_message: None,
        }
    }
}

impl AppState {
    /// Label passed to the plotter, `None` when the field is blank.
    pub fn layer_type_override(&self) -> Option<&str> {
        let label = self.layer_type.trim();
        (!label.is_empty()).then_some(label)
    }

    /// Kind the current settings resolve to, for display.
    pub fn resolved_kind(&self) -> Option<LayerKind> {
        self.figure
            .as_ref()
            .map(|fig| LayerKind::classify(&fig.layer_type))
    }

    /// Switch to a new raster and render it.
    pub fn open_raster(&mut self, path: PathBuf) {
        self.raster_path = Some(path);
        self.rerender();
    }

    /// Render the current raster with the current overrides.
    pub fn rerender(&mut self) {
        let Some(path) = self.raster_path.clone() else {
            return;
        };
        match render(&path, self.layer_type_override(), self.band_count) {
            Ok(mut figure) => {
                figure.set_stations(&self.stations);
                self.set_figure(figure);
            }
            Err(e) => {
                let e = anyhow::Error::new(e);
                log::error!("Failed to render {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
                self.figure = None;
                self.textures.clear();
            }
        }
    }

    /// Ingest a freshly rendered figure; textures are rebuilt on next frame.
    pub fn set_figure(&mut self, figure: Figure) {
        self.figure = Some(figure);
        self.textures.clear();
        self.status_message = None;
    }

    /// Replace the station overlay and re-clip it to the current figure.
    pub fn set_stations(&mut self, stations: Vec<Station>) {
        if let Some(figure) = &mut self.figure {
            figure.set_stations(&stations);
        }
        self.stations = stations;
    }

    /// Save the current figure as PNG.
    pub fn export_png(&self, path: &Path) -> anyhow::Result<()> {
        let figure = self
            .figure
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("nothing to export, open a raster first"))?;
        export::save_png(figure, path, self.panel_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_layer_type_means_no_override() {
        let mut state = AppState::default();
        assert_eq!(state.layer_type_override(), None);
        state.layer_type = "  coherence ".to_string();
        assert_eq!(state.layer_type_override(), Some("coherence"));
    }

    #[test]
    fn open_failure_is_reported_in_status() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::default();
        state.open_raster(dir.path().join("missing.tif"));
        assert!(state.figure.is_none());
        let msg = state.status_message.unwrap();
        assert!(msg.starts_with("Error: cannot open raster"));
    }

    #[test]
    fn export_without_figure_fails() {
        let state = AppState::default();
        assert!(state.export_png(Path::new("out.png")).is_err());
    }
}
