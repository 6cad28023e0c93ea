use super::model::Band;

/// Values strictly above this are fill values, never measurements.
pub const FILL_THRESHOLD: f64 = 1e20;

// ---------------------------------------------------------------------------
// MaskedBand – band values plus a validity mask
// ---------------------------------------------------------------------------

/// A band ready for display. Valid values are passed through untouched.
#[derive(Debug, Clone)]
pub struct MaskedBand {
    pub width: usize,
    pub height: usize,
    pub values: Vec<f64>,
    /// `true` where the pixel takes part in color scaling.
    pub valid: Vec<bool>,
}

/// Whether a single pixel must be excluded from display.
///
/// A pixel is invalid when it exceeds [`FILL_THRESHOLD`], equals the
/// sentinel, or is NaN (a NaN sentinel matches NaN pixels).
pub fn is_invalid(value: f64, no_data: Option<f64>) -> bool {
    if value.is_nan() {
        return true;
    }
    if value > FILL_THRESHOLD {
        return true;
    }
    matches!(no_data, Some(nd) if value == nd)
}

/// Mask a raw band using its declared sentinel (if any).
pub fn mask_band(band: &Band) -> MaskedBand {
    let valid = band
        .values
        .iter()
        .map(|&v| !is_invalid(v, band.no_data))
        .collect();
    MaskedBand {
        width: band.width,
        height: band.height,
        values: band.values.clone(),
        valid,
    }
}

impl MaskedBand {
    /// Value at (col, row) if it is valid.
    pub fn get(&self, col: usize, row: usize) -> Option<f64> {
        let idx = row * self.width + col;
        if self.valid.get(idx).copied().unwrap_or(false) {
            Some(self.values[idx])
        } else {
            None
        }
    }

    pub fn valid_count(&self) -> usize {
        self.valid.iter().filter(|&&v| v).count()
    }

    pub fn masked_count(&self) -> usize {
        self.valid.len() - self.valid_count()
    }

    /// Min and max over valid pixels, `None` when everything is masked.
    pub fn data_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .zip(&self.valid)
            .filter(|(_, ok)| **ok)
            .map(|(&v, _)| v)
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band(values: Vec<f64>, no_data: Option<f64>) -> Band {
        let n = values.len();
        Band::new(n, 1, values, no_data)
    }

    #[test]
    fn fill_values_and_sentinel_are_masked() {
        let masked = mask_band(&band(vec![1.0, 1e21, -9999.0, 3.5, 1e20], Some(-9999.0)));
        assert_eq!(masked.valid, vec![true, false, false, true, true]);
        assert_eq!(masked.masked_count(), 2);
    }

    #[test]
    fn valid_values_pass_through_unchanged() {
        let raw = vec![-1e30, 0.0, 42.125, 7.0];
        let masked = mask_band(&band(raw.clone(), None));
        assert_eq!(masked.values, raw);
        assert!(masked.valid.iter().all(|&v| v));
    }

    #[test]
    fn missing_sentinel_masks_by_magnitude_only() {
        let masked = mask_band(&band(vec![0.0, -9999.0, 5e25], None));
        assert_eq!(masked.valid, vec![true, true, false]);
    }

    #[test]
    fn nan_sentinel_matches_nan_pixels() {
        let masked = mask_band(&band(vec![f64::NAN, 2.0], Some(f64::NAN)));
        assert_eq!(masked.valid, vec![false, true]);
    }

    #[test]
    fn data_range_ignores_masked_pixels() {
        let masked = mask_band(&band(vec![3.0, 0.0, 1e22, -2.0], Some(0.0)));
        assert_eq!(masked.data_range(), Some((-2.0, 3.0)));
        assert_eq!(masked.get(1, 0), None);
        assert_eq!(masked.get(3, 0), Some(-2.0));

        let empty = mask_band(&band(vec![0.0, 0.0], Some(0.0)));
        assert_eq!(empty.data_range(), None);
    }
}
