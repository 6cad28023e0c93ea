use std::path::Path;

use anyhow::{bail, Context, Result};
use image::imageops::{self, FilterType};
use image::{Rgba as Pixel, RgbaImage};

use crate::figure::{Figure, Panel};

const MARGIN: u32 = 20;
const TICK_LEN: u32 = 4;
const MARKER: i64 = 2;
const BACKGROUND: Pixel<u8> = Pixel([255, 255, 255, 255]);
const INK: Pixel<u8> = Pixel([0, 0, 0, 255]);

// ---------------------------------------------------------------------------
// PNG export
// ---------------------------------------------------------------------------

/// Save `figure` as a PNG with panels `panel_height` pixels tall.
pub fn save_png(figure: &Figure, path: &Path, panel_height: u32) -> Result<()> {
    let canvas = render_image(figure, panel_height)?;
    canvas
        .save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    log::info!(
        "figure saved to {} ({}x{})",
        path.display(),
        canvas.width(),
        canvas.height()
    );
    Ok(())
}

/// Rasterise `figure` into an image: panels left to right, each followed by
/// its colorbar, stations drawn as square markers.
pub fn render_image(figure: &Figure, panel_height: u32) -> Result<RgbaImage> {
    if panel_height == 0 {
        bail!("panel height must be positive");
    }
    let extent = &figure.extent;
    if extent.height() <= 0.0 || extent.width() <= 0.0 {
        bail!("figure extent {extent} is empty");
    }

    let aspect = extent.width() / extent.height();
    let panel_w = ((panel_height as f64 * aspect).round() as u32).max(1);

    let slots: Vec<Slot> = figure
        .panels
        .iter()
        .map(|panel| Slot::new(panel, panel_w))
        .collect();
    let gap = (panel_w as f32 * figure.style.wspace).round() as u32;

    let content_w: u32 = slots.iter().map(Slot::width).sum::<u32>()
        + gap * (slots.len() as u32).saturating_sub(1);
    let content_h = panel_height * figure.rows.max(1) as u32;
    let mut canvas = RgbaImage::from_pixel(
        content_w + 2 * MARGIN,
        content_h + 2 * MARGIN,
        BACKGROUND,
    );

    let mut x = MARGIN;
    for (panel, slot) in figure.panels.iter().zip(&slots) {
        draw_panel(&mut canvas, figure, panel, x, panel_w, panel_height);
        draw_colorbar(
            &mut canvas,
            panel,
            x + panel_w + slot.pad,
            slot.bar_w,
            panel_height,
        );
        x += slot.width() + gap;
    }
    Ok(canvas)
}

/// Horizontal footprint of one panel and its colorbar.
struct Slot {
    panel_w: u32,
    pad: u32,
    bar_w: u32,
}

impl Slot {
    fn new(panel: &Panel, panel_w: u32) -> Self {
        let scaled = |f: f32| (panel_w as f32 * f).round() as u32;
        Self {
            panel_w,
            pad: scaled(panel.colorbar.pad).max(2),
            bar_w: scaled(panel.colorbar.size_fraction).max(4),
        }
    }

    fn width(&self) -> u32 {
        self.panel_w + self.pad + self.bar_w + TICK_LEN
    }
}

fn draw_panel(canvas: &mut RgbaImage, figure: &Figure, panel: &Panel, x: u32, w: u32, h: u32) {
    let band = &panel.band;
    let Some(source) =
        RgbaImage::from_raw(band.width as u32, band.height as u32, panel.to_rgba())
    else {
        log::warn!("panel {} has an inconsistent buffer, skipped", panel.index);
        return;
    };
    let scaled = imageops::resize(&source, w, h, FilterType::Nearest);
    imageops::overlay(canvas, &scaled, x as i64, MARGIN as i64);

    let extent = &figure.extent;
    for station in &figure.stations {
        let fx = (station.lon - extent.left) / (extent.right - extent.left);
        let fy = (extent.top - station.lat) / (extent.top - extent.bottom);
        let cx = x as i64 + (fx * w as f64).round() as i64;
        let cy = MARGIN as i64 + (fy * h as f64).round() as i64;
        for dy in -MARKER..=MARKER {
            for dx in -MARKER..=MARKER {
                put(canvas, cx + dx, cy + dy, INK);
            }
        }
    }
}

fn draw_colorbar(canvas: &mut RgbaImage, panel: &Panel, x: u32, w: u32, h: u32) {
    let colors = panel.colorbar_colors(h as usize);
    for row in 0..h {
        // Top row is vmax.
        let [r, g, b, a] = colors[(h - 1 - row) as usize];
        for col in 0..w {
            canvas.put_pixel(x + col, MARGIN + row, Pixel([r, g, b, a]));
        }
    }
    for &tick in &panel.colorbar.ticks {
        let row = ((1.0 - panel.tick_position(tick)) * (h - 1) as f64).round() as i64;
        for col in 0..TICK_LEN {
            put(canvas, (x + w + col) as i64, MARGIN as i64 + row, INK);
        }
    }
}

fn put(canvas: &mut RgbaImage, x: i64, y: i64, px: Pixel<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
        canvas.put_pixel(x as u32, y as u32, px);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Band, GeoTransform, RasterLayer};
    use crate::data::stations::Station;
    use crate::figure::build_figure;
    use crate::style::PlotStyle;
    use std::path::PathBuf;

    fn figure(label: &str, bands: usize) -> Figure {
        let values = vec![0.0, 0.25, 0.5, 0.75, 1.0, -9999.0];
        let layer = RasterLayer {
            path: PathBuf::from("x.tif"),
            transform: GeoTransform::from_coefficients([0.0, 1.0, 0.0, 2.0, 0.0, -1.0]),
            width: 3,
            height: 2,
            bands: (0..bands)
                .map(|_| Band::new(3, 2, values.clone(), Some(-9999.0)))
                .collect(),
        };
        build_figure(&layer, label, PlotStyle::for_label(label)).unwrap()
    }

    #[test]
    fn canvas_grows_with_panel_count() {
        let one = render_image(&figure("coherence", 1), 60).unwrap();
        let three = render_image(&figure("ENU", 3), 60).unwrap();
        assert_eq!(one.height(), 60 + 2 * MARGIN);
        assert_eq!(three.height(), one.height());
        assert!(three.width() > 3 * 90);
        assert!(three.width() > one.width() * 2);
    }

    #[test]
    fn canvas_height_follows_row_count() {
        let fig = figure("defo", 2);
        assert_eq!(fig.rows, 1);
        let img = render_image(&fig, 50).unwrap();
        assert_eq!(img.height(), 50 * fig.rows as u32 + 2 * MARGIN);
    }

    #[test]
    fn masked_pixels_show_background() {
        let img = render_image(&figure("coherence", 1), 60).unwrap();
        // Panel is 90x60 for a 3x2 grid; the last source pixel is masked.
        assert_eq!(*img.get_pixel(MARGIN + 80, MARGIN + 50), BACKGROUND);
        // First source pixel is 0.0 on a gray 0..1 scale.
        assert_eq!(*img.get_pixel(MARGIN + 5, MARGIN + 5), Pixel([0, 0, 0, 255]));
    }

    #[test]
    fn stations_are_marked() {
        let mut fig = figure("coherence", 1);
        fig.set_stations(&[Station {
            id: "MID".into(),
            lat: 1.0,
            lon: 1.5,
        }]);
        let img = render_image(&fig, 60).unwrap();
        assert_eq!(*img.get_pixel(MARGIN + 45, MARGIN + 30), INK);
    }

    #[test]
    fn zero_height_is_rejected() {
        assert!(render_image(&figure("coherence", 1), 0).is_err());
    }

    #[test]
    fn save_writes_a_png() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("fig.png");
        save_png(&figure("defo", 2), &out, 40).unwrap();
        let back = image::open(&out).unwrap();
        assert_eq!(back.height(), 40 + 2 * MARGIN);
    }
}
