use eframe::egui::{
    self, Align2, Color32, ColorImage, FontId, Rect, Sense, TextureHandle, TextureOptions, Ui,
};
use egui_plot::{Plot, PlotImage, PlotPoint, PlotPoints, Points};

use crate::figure::{Figure, Panel};
use crate::state::AppState;

/// Room left of the colorbar labels, in points.
const LABEL_WIDTH: f32 = 44.0;

// ---------------------------------------------------------------------------
// Figure view (central panel)
// ---------------------------------------------------------------------------

/// Render the current figure in the central panel.
pub fn figure_view(ui: &mut Ui, state: &mut AppState) {
    let AppState {
        figure,
        textures,
        show_stations,
        ..
    } = state;

    let figure = match figure {
        Some(fig) => fig,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a raster to plot it  (File → Open raster…)");
            });
            return;
        }
    };

    if textures.len() != figure.panels.len() {
        *textures = figure
            .panels
            .iter()
            .map(|panel| upload_panel(ui.ctx(), panel))
            .collect();
    }

    // Wider gaps for layouts that ask for them (ENU).
    ui.spacing_mut().item_spacing.x = 8.0 + 40.0 * figure.style.wspace;

    let figure: &Figure = figure;
    ui.columns(figure.cols, |columns: &mut [Ui]| {
        for ((ui, panel), texture) in columns.iter_mut().zip(&figure.panels).zip(textures.iter()) {
            panel_view(ui, figure, panel, texture, *show_stations);
        }
    });
}

fn upload_panel(ctx: &egui::Context, panel: &Panel) -> TextureHandle {
    let size = [panel.band.width, panel.band.height];
    let image = ColorImage::from_rgba_unmultiplied(size, &panel.to_rgba());
    ctx.load_texture(format!("panel_{}", panel.index), image, TextureOptions::NEAREST)
}

fn panel_view(ui: &mut Ui, figure: &Figure, panel: &Panel, texture: &TextureHandle, stations: bool) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&panel.title);
    });

    let available = ui.available_size();
    let bar_width = (available.x * panel.colorbar.size_fraction).max(8.0);
    let pad = available.x * panel.colorbar.pad;
    let plot_width = (available.x - bar_width - pad - LABEL_WIDTH).max(50.0);
    let height = available.y.max(100.0);

    ui.horizontal(|ui: &mut Ui| {
        let mut plot = Plot::new(("figure_panel", panel.index))
            .show_grid(false)
            .data_aspect(1.0)
            .width(plot_width)
            .height(height)
            .allow_boxed_zoom(true)
            .allow_drag(true)
            .allow_scroll(true)
            .allow_zoom(true);
        if let Some(label) = &panel.x_label {
            plot = plot.x_axis_label(label.clone());
        }
        if let Some(label) = &panel.y_label {
            plot = plot.y_axis_label(label.clone());
        }

        let extent = &figure.extent;
        let (cx, cy) = extent.center();
        plot.show(ui, |plot_ui| {
            plot_ui.image(PlotImage::new(
                texture.id(),
                PlotPoint::new(cx, cy),
                egui::vec2(extent.width() as f32, extent.height() as f32),
            ));

            if stations && !figure.stations.is_empty() {
                let points: PlotPoints = figure
                    .stations
                    .iter()
                    .map(|s| [s.lon, s.lat])
                    .collect();
                plot_ui.points(
                    Points::new(points)
                        .name("GNSS stations")
                        .radius(3.0)
                        .color(Color32::BLACK),
                );
            }
        });

        ui.add_space(pad);
        colorbar(ui, panel, bar_width, height);
    });
}

/// Vertical colorbar: `vmin` at the bottom, tick labels on the right.
fn colorbar(ui: &mut Ui, panel: &Panel, bar_width: f32, height: f32) {
    let (rect, _) =
        ui.allocate_exact_size(egui::vec2(bar_width + LABEL_WIDTH, height), Sense::hover());
    let bar = Rect::from_min_size(rect.min, egui::vec2(bar_width, height));
    let painter = ui.painter_at(rect);

    let steps = 128;
    let colors = panel.colorbar_colors(steps);
    let strip = height / steps as f32;
    for (i, [r, g, b, a]) in colors.into_iter().enumerate() {
        let bottom = bar.bottom() - i as f32 * strip;
        let stripe = Rect::from_min_max(
            egui::pos2(bar.left(), bottom - strip - 0.5),
            egui::pos2(bar.right(), bottom),
        );
        painter.rect_filled(stripe, 0.0, Color32::from_rgba_unmultiplied(r, g, b, a));
    }

    let text_color = ui.visuals().text_color();
    for (tick, label) in panel.colorbar.ticks.iter().zip(&panel.colorbar.labels) {
        let y = bar.bottom() - panel.tick_position(*tick) as f32 * height;
        painter.line_segment(
            [egui::pos2(bar.right(), y), egui::pos2(bar.right() + 4.0, y)],
            (1.0, text_color),
        );
        painter.text(
            egui::pos2(bar.right() + 6.0, y),
            Align2::LEFT_CENTER,
            label,
            FontId::proportional(11.0),
            text_color,
        );
    }
}
