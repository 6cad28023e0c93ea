use std::path::{Path, PathBuf};

use crate::color::{nice_ticks, tick_labels, ColorNorm, Colormap, Rgba, TRANSPARENT};
use crate::data::loader::RasterSource;
use crate::data::mask::{mask_band, MaskedBand};
use crate::data::model::{layer_type_from_path, Extent, RasterLayer};
use crate::data::stations::Station;
use crate::error::PlotError;
use crate::style::{LayerKind, PlotStyle};

/// The layout only knows how to place one row of up to this many panels.
pub const MAX_BANDS: usize = 3;

const COLORBAR_SIZE: f32 = 0.05;
const COLORBAR_PAD: f32 = 0.05;
const AUTO_TICKS: usize = 5;

// ---------------------------------------------------------------------------
// Figure model
// ---------------------------------------------------------------------------

/// Colorbar attached to the right of a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Colorbar {
    pub ticks: Vec<f64>,
    pub labels: Vec<String>,
    /// Width as a fraction of the panel width.
    pub size_fraction: f32,
    /// Gap to the panel, as a fraction of the panel width.
    pub pad: f32,
}

/// One subplot: a single masked band.
#[derive(Debug, Clone)]
pub struct Panel {
    pub index: usize,
    pub title: String,
    pub band: MaskedBand,
    pub colormap: Colormap,
    pub norm: ColorNorm,
    pub under: Option<Rgba>,
    pub colorbar: Colorbar,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub show_grid: bool,
}

/// An in-memory figure: one row of panels sharing a geographic extent.
#[derive(Debug, Clone)]
pub struct Figure {
    pub source: PathBuf,
    pub layer_type: String,
    pub style: PlotStyle,
    pub extent: Extent,
    pub rows: usize,
    pub cols: usize,
    pub panels: Vec<Panel>,
    /// GNSS stations that fall inside the extent.
    pub stations: Vec<Station>,
}

// ---------------------------------------------------------------------------
// Rendering entry points
// ---------------------------------------------------------------------------

/// Plot a raster layer.
///
/// `layer_type` defaults to the name of the directory holding the raster and
/// `band_count` to every band of the raster. The band count is checked
/// before any pixel is read, and the raster is closed before the figure is
/// assembled.
pub fn render(
    path: &Path,
    layer_type: Option<&str>,
    band_count: Option<usize>,
) -> Result<Figure, PlotError> {
    let label = layer_type
        .map(str::to_string)
        .unwrap_or_else(|| layer_type_from_path(path));
    let style = PlotStyle::for_label(&label);
    log::info!(
        "rendering {} as '{label}' ({} layer)",
        path.display(),
        style.kind
    );

    let source = RasterSource::open(path)?;
    let bands = band_count.unwrap_or_else(|| source.band_count());
    check_band_count(bands, style.kind)?;
    let layer = source.read(Some(bands))?;

    build_figure(&layer, &label, style)
}

fn check_band_count(bands: usize, kind: LayerKind) -> Result<(), PlotError> {
    if bands == 0 || bands > MAX_BANDS {
        return Err(PlotError::UnsupportedBandCount(bands));
    }
    if kind == LayerKind::Enu && bands != 3 {
        return Err(PlotError::EnuBandCount(bands));
    }
    Ok(())
}

/// Lay out an already loaded layer, one panel per band.
pub fn build_figure(
    layer: &RasterLayer,
    label: &str,
    style: PlotStyle,
) -> Result<Figure, PlotError> {
    let cols = layer.band_count();
    check_band_count(cols, style.kind)?;

    let extent = layer.extent();
    let middle = cols / 2;

    let panels: Vec<Panel> = layer
        .bands
        .iter()
        .enumerate()
        .map(|(index, band)| {
            let band = mask_band(band);
            let norm = style.norm(band.data_range());
            let ticks = style
                .ticks
                .clone()
                .unwrap_or_else(|| nice_ticks(norm.vmin, norm.vmax, AUTO_TICKS));
            let labels = tick_labels(&ticks, style.tick_decimals);

            log::info!(
                "panel {index}: {} valid, {} masked, scale [{}, {}]",
                band.valid_count(),
                band.masked_count(),
                norm.vmin,
                norm.vmax
            );

            Panel {
                index,
                title: style.title(label, index),
                band,
                colormap: style.colormap,
                norm,
                under: style.under,
                colorbar: Colorbar {
                    ticks,
                    labels,
                    size_fraction: COLORBAR_SIZE,
                    pad: COLORBAR_PAD,
                },
                x_label: (index == middle).then(|| "longitude".to_string()),
                y_label: (index == 0).then(|| "latitude".to_string()),
                show_grid: false,
            }
        })
        .collect();

    Ok(Figure {
        source: layer.path.clone(),
        layer_type: label.to_string(),
        style,
        extent,
        rows: 1,
        cols,
        panels,
        stations: Vec::new(),
    })
}

// ---------------------------------------------------------------------------
// Pixel colouring
// ---------------------------------------------------------------------------

impl Panel {
    /// Color of a single value under this panel's colormap and bounds.
    pub fn color_of(&self, value: Option<f64>) -> Rgba {
        let Some(value) = value else {
            return TRANSPARENT;
        };
        if value < self.norm.vmin {
            if let Some(under) = self.under {
                return under;
            }
        }
        self.colormap.sample(self.norm.normalize(value))
    }

    /// Row-major RGBA bytes of the panel image, masked pixels transparent.
    pub fn to_rgba(&self) -> Vec<u8> {
        let band = &self.band;
        let mut out = Vec::with_capacity(band.width * band.height * 4);
        for row in 0..band.height {
            for col in 0..band.width {
                out.extend_from_slice(&self.color_of(band.get(col, row)));
            }
        }
        out
    }

    /// Colorbar strip colors from bottom (`vmin`) to top (`vmax`).
    pub fn colorbar_colors(&self, steps: usize) -> Vec<Rgba> {
        let steps = steps.max(2);
        (0..steps)
            .map(|i| self.colormap.sample(i as f64 / (steps - 1) as f64))
            .collect()
    }

    /// Position of a tick along the colorbar, 0 at the bottom.
    pub fn tick_position(&self, tick: f64) -> f64 {
        self.norm.normalize(tick).clamp(0.0, 1.0)
    }
}

impl Figure {
    /// Stations from `stations` that lie inside this figure's extent.
    pub fn stations_in_extent(&self, stations: &[Station]) -> Vec<Station> {
        stations
            .iter()
            .filter(|s| self.extent.contains(s.lon, s.lat))
            .cloned()
            .collect()
    }

    pub fn set_stations(&mut self, stations: &[Station]) {
        self.stations = self.stations_in_extent(stations);
        log::debug!(
            "{} of {} stations inside {}",
            self.stations.len(),
            stations.len(),
            self.extent
        );
    }

    pub fn titles(&self) -> Vec<&str> {
        self.panels.iter().map(|p| p.title.as_str()).collect()
    }
}
