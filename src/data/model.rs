use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// GeoTransform – the six affine coefficients of a raster
// ---------------------------------------------------------------------------

/// Affine transform mapping pixel (column, row) to map coordinates.
///
/// Same coefficient order as GDAL: `(x0, dx, row_rot, y0, col_rot, dy)`.
/// `dy` is usually negative for north-up rasters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoTransform {
    pub x_origin: f64,
    pub x_pixel_size: f64,
    pub row_rotation: f64,
    pub y_origin: f64,
    pub col_rotation: f64,
    pub y_pixel_size: f64,
}

impl GeoTransform {
    pub fn from_coefficients(gt: [f64; 6]) -> Self {
        Self {
            x_origin: gt[0],
            x_pixel_size: gt[1],
            row_rotation: gt[2],
            y_origin: gt[3],
            col_rotation: gt[4],
            y_pixel_size: gt[5],
        }
    }

    pub fn coefficients(&self) -> [f64; 6] {
        [
            self.x_origin,
            self.x_pixel_size,
            self.row_rotation,
            self.y_origin,
            self.col_rotation,
            self.y_pixel_size,
        ]
    }

    /// Display extent for a `width` x `height` grid.
    pub fn extent(&self, width: usize, height: usize) -> Extent {
        Extent {
            left: self.x_origin,
            right: self.x_origin + width as f64 * self.x_pixel_size,
            bottom: self.y_origin + height as f64 * self.y_pixel_size,
            top: self.y_origin,
        }
    }
}

// ---------------------------------------------------------------------------
// Extent – left/right/bottom/top, the ordering image display expects
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl Extent {
    pub fn as_array(&self) -> [f64; 4] {
        [self.left, self.right, self.bottom, self.top]
    }

    pub fn width(&self) -> f64 {
        (self.right - self.left).abs()
    }

    pub fn height(&self) -> f64 {
        (self.top - self.bottom).abs()
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.left + self.right) / 2.0,
            (self.bottom + self.top) / 2.0,
        )
    }

    /// Whether a (lon, lat) point falls inside, regardless of axis direction.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (x_lo, x_hi) = min_max(self.left, self.right);
        let (y_lo, y_hi) = min_max(self.bottom, self.top);
        x >= x_lo && x <= x_hi && y >= y_lo && y <= y_hi
    }
}

fn min_max(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.left, self.right, self.bottom, self.top
        )
    }
}

// ---------------------------------------------------------------------------
// Band – one raw band as read from disk
// ---------------------------------------------------------------------------

/// A single band, row-major, `width * height` values.
#[derive(Debug, Clone)]
pub struct Band {
    pub width: usize,
    pub height: usize,
    pub values: Vec<f64>,
    /// Declared no-data sentinel, `None` when the format exposes none.
    pub no_data: Option<f64>,
}

impl Band {
    pub fn new(width: usize, height: usize, values: Vec<f64>, no_data: Option<f64>) -> Self {
        debug_assert_eq!(width * height, values.len());
        Self {
            width,
            height,
            values,
            no_data,
        }
    }
}

// ---------------------------------------------------------------------------
// RasterLayer – everything read from one raster file
// ---------------------------------------------------------------------------

/// A raster file loaded into memory. All bands share the same grid.
#[derive(Debug, Clone)]
pub struct RasterLayer {
    pub path: PathBuf,
    pub transform: GeoTransform,
    pub width: usize,
    pub height: usize,
    pub bands: Vec<Band>,
}

impl RasterLayer {
    pub fn extent(&self) -> Extent {
        self.transform.extent(self.width, self.height)
    }

    pub fn band_count(&self) -> usize {
        self.bands.len()
    }
}

/// Last segment of the parent directory, or an empty label.
pub fn layer_type_from_path(path: &Path) -> String {
    path.parent()
        .and_then(|p| p.file_name())
        .and_then(|name| name.to_str())
        .unwrap_or("")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_from_north_up_transform() {
        let gt = GeoTransform::from_coefficients([-120.0, 0.01, 0.0, 35.0, 0.0, -0.01]);
        let extent = gt.extent(100, 100);
        assert!((extent.left + 120.0).abs() < 1e-9);
        assert!((extent.right + 119.0).abs() < 1e-9);
        assert!((extent.bottom - 34.0).abs() < 1e-9);
        assert!((extent.top - 35.0).abs() < 1e-9);
    }

    #[test]
    fn extent_keeps_coefficient_order() {
        let gt = GeoTransform::from_coefficients([10.0, 2.0, 0.0, 50.0, 0.0, -0.5]);
        assert_eq!(gt.coefficients(), [10.0, 2.0, 0.0, 50.0, 0.0, -0.5]);
        assert_eq!(gt.extent(4, 6).as_array(), [10.0, 18.0, 47.0, 50.0]);
    }

    #[test]
    fn contains_handles_flipped_axes() {
        let extent = Extent {
            left: 0.0,
            right: 10.0,
            bottom: 5.0,
            top: -5.0,
        };
        assert!(extent.contains(3.0, 0.0));
        assert!(!extent.contains(11.0, 0.0));
        assert!(!extent.contains(3.0, 6.0));
    }

    #[test]
    fn layer_type_comes_from_parent_directory() {
        assert_eq!(
            layer_type_from_path(Path::new("/products/coherence/20200101.tif")),
            "coherence"
        );
        assert_eq!(layer_type_from_path(Path::new("stack.tif")), "");
    }
}
