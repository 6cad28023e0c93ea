use std::path::PathBuf;

use thiserror::Error;

/// Failures of a single render call. All of them abort the call.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("cannot open raster {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: gdal::errors::GdalError,
    },
    #[error("failed to read band {band} of {path}")]
    Read {
        path: PathBuf,
        band: usize,
        #[source]
        source: gdal::errors::GdalError,
    },
    #[error("unsupported band count {0}: only 1 to 3 bands can be laid out")]
    UnsupportedBandCount(usize),
    #[error("requested {requested} bands but the raster only has {available}")]
    BandOutOfRange { requested: usize, available: usize },
    #[error("ENU layers need exactly 3 bands, got {0}")]
    EnuBandCount(usize),
}

/// Failures while reading a GNSS station list.
#[derive(Debug, Error)]
pub enum StationError {
    #[error("cannot read station list {path}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
