use palette::{Mix, Srgb};

// ---------------------------------------------------------------------------
// Colormaps
// ---------------------------------------------------------------------------

/// RGBA with 8-bit channels, shared by the viewer and the PNG exporter.
pub type Rgba = [u8; 4];

pub const TRANSPARENT: Rgba = [0, 0, 0, 0];
pub const BLACK: Rgba = [0, 0, 0, 255];

/// The colormaps a layer style can pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colormap {
    /// Black to white.
    Gray,
    /// Two levels: white for the lower half, black for the upper half.
    Binary,
    /// Diverging blue / white / red.
    CoolWarm,
    /// Sea blue through green and brown to white.
    Terrain,
}

impl Colormap {
    pub fn name(&self) -> &'static str {
        match self {
            Colormap::Gray => "gray",
            Colormap::Binary => "binary",
            Colormap::CoolWarm => "coolwarm",
            Colormap::Terrain => "terrain",
        }
    }

    /// Anchor stops `(position, rgb)` with positions in `[0, 1]`.
    fn stops(&self) -> &'static [(f32, [f32; 3])] {
        match self {
            Colormap::Gray => &[(0.0, [0.0, 0.0, 0.0]), (1.0, [1.0, 1.0, 1.0])],
            Colormap::Binary => &[
                (0.0, [1.0, 1.0, 1.0]),
                (0.5, [1.0, 1.0, 1.0]),
                (0.5, [0.0, 0.0, 0.0]),
                (1.0, [0.0, 0.0, 0.0]),
            ],
            Colormap::CoolWarm => &[
                (0.0, [0.230, 0.299, 0.754]),
                (0.25, [0.552, 0.690, 0.996]),
                (0.5, [0.865, 0.865, 0.865]),
                (0.75, [0.957, 0.604, 0.483]),
                (1.0, [0.706, 0.016, 0.150]),
            ],
            Colormap::Terrain => &[
                (0.0, [0.2, 0.2, 0.6]),
                (0.15, [0.0, 0.6, 1.0]),
                (0.25, [0.0, 0.8, 0.4]),
                (0.5, [1.0, 1.0, 0.6]),
                (0.75, [0.5, 0.36, 0.33]),
                (1.0, [1.0, 1.0, 1.0]),
            ],
        }
    }

    /// Color at position `t`, clamped to `[0, 1]`.
    pub fn sample(&self, t: f64) -> Rgba {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) as f32 };
        let stops = self.stops();

        let upper = stops
            .iter()
            .position(|(pos, _)| *pos >= t)
            .unwrap_or(stops.len() - 1);
        let color = if upper == 0 {
            to_srgb(stops[0].1)
        } else {
            let (p0, c0) = stops[upper - 1];
            let (p1, c1) = stops[upper];
            let factor = if p1 > p0 { (t - p0) / (p1 - p0) } else { 0.0 };
            to_srgb(c0).mix(to_srgb(c1), factor)
        };

        let rgb: Srgb<u8> = color.into_format();
        [rgb.red, rgb.green, rgb.blue, 255]
    }
}

fn to_srgb(c: [f32; 3]) -> Srgb {
    Srgb::new(c[0], c[1], c[2])
}

// ---------------------------------------------------------------------------
// Normalisation: data value → [0, 1]
// ---------------------------------------------------------------------------

/// Resolved color-scale bounds for one panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorNorm {
    pub vmin: f64,
    pub vmax: f64,
}

impl ColorNorm {
    pub fn new(vmin: f64, vmax: f64) -> Self {
        Self { vmin, vmax }
    }

    /// Position of `value` on the scale; values outside fall outside `[0, 1]`.
    ///
    /// A collapsed scale is a step: values above it map to 1, the rest to 0.
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.vmax - self.vmin;
        if span.abs() < f64::EPSILON {
            return if value > self.vmin { 1.0 } else { 0.0 };
        }
        (value - self.vmin) / span
    }
}

// ---------------------------------------------------------------------------
// Colorbar ticks
// ---------------------------------------------------------------------------

/// Round `x` to 1, 2, 5 or 10 times a power of ten.
fn nice_step(x: f64) -> f64 {
    let exp = x.log10().floor();
    let base = 10f64.powf(exp);
    let frac = x / base;
    let nice = if frac <= 1.0 {
        1.0
    } else if frac <= 2.0 {
        2.0
    } else if frac <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * base
}

/// Evenly spaced round tick positions inside `[vmin, vmax]`.
pub fn nice_ticks(vmin: f64, vmax: f64, target: usize) -> Vec<f64> {
    let span = vmax - vmin;
    if !span.is_finite() || span <= 0.0 || target < 2 {
        return vec![vmin];
    }
    let step = nice_step(span / (target - 1) as f64);
    let first = (vmin / step).ceil() * step;
    let mut ticks = Vec::new();
    let mut i = 0;
    loop {
        let tick = first + i as f64 * step;
        if tick > vmax + step * 1e-9 {
            break;
        }
        // Snap values such as 0.30000000000000004.
        ticks.push((tick / step).round() * step);
        i += 1;
    }
    ticks
}

/// Tick label: fixed precision when asked, otherwise just enough decimals
/// to tell neighbouring ticks apart.
pub fn tick_labels(ticks: &[f64], decimals: Option<usize>) -> Vec<String> {
    let decimals = decimals.unwrap_or_else(|| auto_decimals(ticks));
    ticks
        .iter()
        .map(|t| {
            let label = format!("{t:.decimals$}");
            if label.starts_with('-') && label.trim_start_matches(['-', '0', '.']).is_empty() {
                label[1..].to_string()
            } else {
                label
            }
        })
        .collect()
}

fn auto_decimals(ticks: &[f64]) -> usize {
    let step = ticks
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .fold(f64::INFINITY, f64::min);
    if !step.is_finite() || step >= 1.0 {
        return 0;
    }
    (-step.log10().floor()).max(0.0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_and_binary_are_mirrored() {
        assert_eq!(Colormap::Gray.sample(0.0), [0, 0, 0, 255]);
        assert_eq!(Colormap::Gray.sample(1.0), [255, 255, 255, 255]);
        assert_eq!(Colormap::Binary.sample(0.0), [255, 255, 255, 255]);
        assert_eq!(Colormap::Binary.sample(1.0), [0, 0, 0, 255]);
    }

    #[test]
    fn sample_clamps_out_of_range_positions() {
        assert_eq!(Colormap::Terrain.sample(-3.0), Colormap::Terrain.sample(0.0));
        assert_eq!(Colormap::CoolWarm.sample(7.0), Colormap::CoolWarm.sample(1.0));
    }

    #[test]
    fn coolwarm_midpoint_is_neutral() {
        let [r, g, b, _] = Colormap::CoolWarm.sample(0.5);
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn normalize_maps_bounds_to_unit_interval() {
        let norm = ColorNorm::new(-2.0, 2.0);
        assert_eq!(norm.normalize(-2.0), 0.0);
        assert_eq!(norm.normalize(0.0), 0.5);
        assert_eq!(norm.normalize(2.0), 1.0);
    }

    #[test]
    fn collapsed_scale_is_a_step() {
        let norm = ColorNorm::new(3.0, 3.0);
        assert_eq!(norm.normalize(3.0), 0.0);
        assert_eq!(norm.normalize(1.0), 0.0);
        assert_eq!(norm.normalize(3.5), 1.0);
    }

    #[test]
    fn binary_has_two_levels() {
        let white = [255, 255, 255, 255];
        let black = [0, 0, 0, 255];
        assert_eq!(Colormap::Binary.sample(0.25), white);
        assert_eq!(Colormap::Binary.sample(0.5), white);
        assert_eq!(Colormap::Binary.sample(0.75), black);
        assert_eq!(Colormap::Binary.sample(1.0), black);
    }

    #[test]
    fn ticks_are_round_and_inside_bounds() {
        assert_eq!(nice_ticks(0.0, 1.0, 5), vec![0.0, 0.5, 1.0]);
        let ticks = nice_ticks(-13.0, 42.0, 5);
        assert_eq!(ticks, vec![0.0, 20.0, 40.0]);
        assert!(ticks.iter().all(|&t| (-13.0..=42.0).contains(&t)));
    }

    #[test]
    fn fixed_precision_labels() {
        assert_eq!(
            tick_labels(&[-0.01, -0.0001, 0.0126], Some(3)),
            vec!["-0.010", "0.000", "0.013"]
        );
        assert_eq!(tick_labels(&[0.0, 0.5, 1.0], None), vec!["0.0", "0.5", "1.0"]);
        assert_eq!(tick_labels(&[0.0, 1000.0, 2000.0], None), vec!["0", "1000", "2000"]);
    }
}
