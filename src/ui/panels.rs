use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::stations::load_stations;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – layer settings and statistics
// ---------------------------------------------------------------------------

/// Render the left settings panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Layer");
    ui.separator();

    ui.strong("Layer type");
    let response = ui.add(
        egui::TextEdit::singleline(&mut state.layer_type)
            .hint_text("from directory name"),
    );
    let mut changed = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

    ui.strong("Bands");
    let band_text = match state.band_count {
        Some(n) => n.to_string(),
        None => "All".to_string(),
    };
    egui::ComboBox::from_id_salt("band_count")
        .selected_text(band_text)
        .show_ui(ui, |ui: &mut Ui| {
            for choice in [None, Some(1), Some(2), Some(3)] {
                let label = choice.map_or("All".to_string(), |n: usize| n.to_string());
                if ui
                    .selectable_value(&mut state.band_count, choice, label)
                    .changed()
                {
                    changed = true;
                }
            }
        });

    if ui.button("Re-render").clicked() {
        changed = true;
    }
    if changed {
        state.rerender();
    }

    ui.separator();

    if !state.stations.is_empty() {
        ui.checkbox(
            &mut state.show_stations,
            format!("Show {} GNSS stations", state.stations.len()),
        );
        ui.separator();
    }

    let Some(figure) = &state.figure else {
        ui.label("No raster loaded.");
        return;
    };

    if let Some(kind) = state.resolved_kind() {
        ui.label(format!("Kind: {kind}"));
    }
    ui.label(format!("Colormap: {}", figure.style.colormap.name()));
    ui.label(format!("Extent: {}", figure.extent));
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for panel in &figure.panels {
                egui::CollapsingHeader::new(RichText::new(&panel.title).strong())
                    .id_salt(("panel_stats", panel.index))
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        ui.label(format!(
                            "{}x{} px",
                            panel.band.width, panel.band.height
                        ));
                        ui.label(format!("valid: {}", panel.band.valid_count()));
                        ui.label(format!("masked: {}", panel.band.masked_count()));
                        match panel.band.data_range() {
                            Some((lo, hi)) => ui.label(format!("data: {lo:.4} … {hi:.4}")),
                            None => ui.label("data: all masked"),
                        };
                        ui.label(format!(
                            "scale: {:.4} … {:.4}",
                            panel.norm.vmin, panel.norm.vmax
                        ));
                    });
            }
            ui.label(format!("{} station(s) in view", figure.stations.len()));
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open raster…").clicked() {
                open_raster_dialog(state);
                ui.close_menu();
            }
            if ui.button("Load stations…").clicked() {
                open_stations_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.figure.is_some(), egui::Button::new("Export PNG…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(path) = &state.raster_path {
            ui.label(path.display().to_string());
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_raster_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open raster layer")
        .add_filter("Rasters", &["tif", "tiff", "nc", "h5", "vrt", "grd"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Opening {}", path.display());
        state.open_raster(path);
    }
}

pub fn open_stations_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open GNSS station list")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match load_stations(&path) {
            Ok(stations) => state.set_stations(stations),
            Err(e) => {
                let e = anyhow::Error::new(e);
                log::error!("Failed to load stations: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export figure")
        .add_filter("PNG", &["png"])
        .set_file_name("figure.png")
        .save_file();

    if let Some(path) = file {
        if let Err(e) = state.export_png(&path) {
            log::error!("Failed to export: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
