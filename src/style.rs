use std::fmt;

use crate::color::{ColorNorm, Colormap, Rgba, BLACK};

// ---------------------------------------------------------------------------
// LayerKind – what a raster's values mean
// ---------------------------------------------------------------------------

/// Semantic kind of a raster layer, derived from its layer-type label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Amplitude,
    Coherence,
    IncidenceAngle,
    WaterMask,
    /// Deformation / unwrapped phase.
    Deformation,
    /// Terrain height / topography.
    Terrain,
    /// East, North and Up components, one per band.
    Enu,
    /// Unrecognised label.
    Other,
}

#[derive(Debug, Clone, Copy)]
enum Rule {
    Suffix(&'static str),
    Prefix(&'static str),
    Exact(&'static str),
}

impl Rule {
    fn matches(&self, label: &str) -> bool {
        match self {
            Rule::Suffix(s) => label.ends_with(s),
            Rule::Prefix(p) => label.starts_with(p),
            Rule::Exact(e) => label == *e,
        }
    }
}

/// Evaluated top to bottom; the first matching rule decides.
const RULES: &[(Rule, LayerKind)] = &[
    (Rule::Suffix("amplitude"), LayerKind::Amplitude),
    (Rule::Suffix("coherence"), LayerKind::Coherence),
    (Rule::Suffix("incidenceAngle"), LayerKind::IncidenceAngle),
    (Rule::Prefix("water"), LayerKind::WaterMask),
    (Rule::Prefix("defo"), LayerKind::Deformation),
    (Rule::Prefix("terr"), LayerKind::Terrain),
    (Rule::Prefix("topo"), LayerKind::Terrain),
    (Rule::Exact("ENU"), LayerKind::Enu),
];

impl LayerKind {
    pub fn classify(label: &str) -> Self {
        RULES
            .iter()
            .find(|(rule, _)| rule.matches(label))
            .map(|(_, kind)| *kind)
            .unwrap_or(LayerKind::Other)
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LayerKind::Amplitude => "amplitude",
            LayerKind::Coherence => "coherence",
            LayerKind::IncidenceAngle => "incidence angle",
            LayerKind::WaterMask => "water mask",
            LayerKind::Deformation => "deformation",
            LayerKind::Terrain => "terrain",
            LayerKind::Enu => "east/north/up",
            LayerKind::Other => "default",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// PlotStyle – per-call display configuration
// ---------------------------------------------------------------------------

/// One end of the color scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Fixed(f64),
    /// Taken from the valid pixels of the band.
    Data,
}

pub const ENU_TITLES: [&str; 3] = ["East", "North", "Up"];

/// Everything that decides how a layer looks. Built fresh for every render,
/// never shared between calls.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotStyle {
    pub kind: LayerKind,
    pub colormap: Colormap,
    pub vmin: Bound,
    pub vmax: Bound,
    /// Color for values below `vmin`; the colormap's low end when `None`.
    pub under: Option<Rgba>,
    /// Explicit colorbar ticks; automatic when `None`.
    pub ticks: Option<Vec<f64>>,
    /// Fixed decimals for colorbar labels.
    pub tick_decimals: Option<usize>,
    /// Per-band panel titles; the layer-type label when `None`.
    pub titles: Option<Vec<String>>,
    /// Horizontal gap between panels, as a fraction of the panel width.
    pub wspace: f32,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            kind: LayerKind::Other,
            colormap: Colormap::Gray,
            vmin: Bound::Data,
            vmax: Bound::Data,
            under: None,
            ticks: None,
            tick_decimals: None,
            titles: None,
            wspace: 0.2,
        }
    }
}

impl PlotStyle {
    pub fn for_label(label: &str) -> Self {
        Self::for_kind(LayerKind::classify(label))
    }

    pub fn for_kind(kind: LayerKind) -> Self {
        let base = PlotStyle {
            kind,
            ..PlotStyle::default()
        };
        match kind {
            LayerKind::Amplitude => PlotStyle {
                vmax: Bound::Fixed(2000.0),
                under: Some(BLACK),
                ..base
            },
            LayerKind::Coherence => PlotStyle {
                vmin: Bound::Fixed(0.0),
                vmax: Bound::Fixed(1.0),
                ..base
            },
            LayerKind::IncidenceAngle => base,
            LayerKind::WaterMask => PlotStyle {
                colormap: Colormap::Binary,
                vmin: Bound::Fixed(0.0),
                vmax: Bound::Fixed(1.0),
                ticks: Some(vec![0.0, 1.0]),
                ..base
            },
            LayerKind::Deformation | LayerKind::Other => PlotStyle {
                colormap: Colormap::CoolWarm,
                ..base
            },
            LayerKind::Terrain => PlotStyle {
                colormap: Colormap::Terrain,
                ..base
            },
            LayerKind::Enu => PlotStyle {
                tick_decimals: Some(3),
                titles: Some(ENU_TITLES.iter().map(|t| t.to_string()).collect()),
                wspace: 0.5,
                ..base
            },
        }
    }

    /// Resolve the bounds against a band's valid data range.
    ///
    /// A data-driven end never crosses a fixed one: when every valid pixel
    /// lies beyond the fixed bound the scale collapses onto it and the
    /// pixels saturate.
    pub fn norm(&self, data_range: Option<(f64, f64)>) -> ColorNorm {
        let (lo, hi) = data_range.unwrap_or((0.0, 1.0));
        let mut vmin = match self.vmin {
            Bound::Fixed(v) => v,
            Bound::Data => lo,
        };
        let mut vmax = match self.vmax {
            Bound::Fixed(v) => v,
            Bound::Data => hi,
        };
        if vmin > vmax {
            match (self.vmin, self.vmax) {
                (Bound::Data, _) => vmin = vmax,
                (_, Bound::Data) => vmax = vmin,
                _ => {}
            }
            log::warn!(
                "{} layer: data range [{lo}, {hi}] lies outside the fixed scale, using [{vmin}, {vmax}]",
                self.kind
            );
        }
        ColorNorm::new(vmin, vmax)
    }

    /// Title of the panel showing band `index` (0-based).
    pub fn title(&self, label: &str, index: usize) -> String {
        self.titles
            .as_ref()
            .and_then(|titles| titles.get(index))
            .cloned()
            .unwrap_or_else(|| label.to_string())
    }
}
