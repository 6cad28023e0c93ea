use std::path::{Path, PathBuf};

use gdal::Dataset;

use super::model::{Band, GeoTransform, RasterLayer};
use crate::error::PlotError;

// ---------------------------------------------------------------------------
// RasterSource – an open, read-only raster
// ---------------------------------------------------------------------------

/// An opened raster. Reading consumes it, which closes the GDAL handle.
pub struct RasterSource {
    path: PathBuf,
    dataset: Dataset,
}

impl RasterSource {
    pub fn open(path: &Path) -> Result<Self, PlotError> {
        let dataset = Dataset::open(path).map_err(|source| PlotError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            dataset,
        })
    }

    pub fn band_count(&self) -> usize {
        self.dataset.raster_count()
    }

    /// Read the first `bands` bands (all of them when `None`) and release
    /// the dataset before returning.
    pub fn read(self, bands: Option<usize>) -> Result<RasterLayer, PlotError> {
        let RasterSource { path, dataset } = self;

        let available = dataset.raster_count();
        let wanted = bands.unwrap_or(available);
        if wanted > available {
            return Err(PlotError::BandOutOfRange {
                requested: wanted,
                available,
            });
        }

        let transform = dataset
            .geo_transform()
            .map(GeoTransform::from_coefficients)
            .map_err(|source| PlotError::Read {
                path: path.clone(),
                band: 0,
                source,
            })?;
        let (width, height) = dataset.raster_size();
        log::debug!(
            "{}: {width}x{height}, {available} band(s), geotransform {:?}",
            path.display(),
            transform.coefficients()
        );

        let mut layers = Vec::with_capacity(wanted);
        for index in 1..=wanted {
            layers.push(read_band(&dataset, &path, index)?);
        }

        // No file handle is held while plotting.
        drop(dataset);

        Ok(RasterLayer {
            path,
            transform,
            width,
            height,
            bands: layers,
        })
    }
}

/// Read one band (1-indexed) as `f64`, together with its no-data sentinel.
fn read_band(dataset: &Dataset, path: &Path, index: usize) -> Result<Band, PlotError> {
    let read_err = |source| PlotError::Read {
        path: path.to_path_buf(),
        band: index,
        source,
    };

    let band = dataset.rasterband(index).map_err(read_err)?;
    let buffer = band.read_band_as::<f64>().map_err(read_err)?;
    let ((width, height), values) = buffer.into_shape_and_vec();

    let no_data = band.no_data_value();
    if no_data.is_none() {
        log::info!(
            "band {index} of {} declares no no-data value, masking fill values only",
            path.display()
        );
    }

    Ok(Band::new(width, height, values, no_data))
}
