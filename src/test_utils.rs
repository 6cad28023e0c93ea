use std::path::{Path, PathBuf};

use gdal::raster::Buffer;
use gdal::DriverManager;

pub const FIXTURE_SIZE: (usize, usize) = (4, 3);
pub const FIXTURE_TRANSFORM: [f64; 6] = [-120.0, 0.5, 0.0, 35.0, 0.0, -0.5];

/// Write a 4x3 float GeoTIFF at `dir/name`, creating intermediate
/// directories so `name` may carry a layer-type folder such as
/// `coherence/x.tif`.
pub fn write_fixture(dir: &Path, name: &str, bands: &[Vec<f64>], no_data: Option<f64>) -> PathBuf {
    let (w, h) = FIXTURE_SIZE;
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let driver = DriverManager::get_driver_by_name("GTiff").unwrap();
    let mut dataset = driver
        .create_with_band_type::<f64, _>(&path, w, h, bands.len())
        .unwrap();
    dataset.set_geo_transform(&FIXTURE_TRANSFORM).unwrap();
    for (i, values) in bands.iter().enumerate() {
        let mut band = dataset.rasterband(i + 1).unwrap();
        let mut buffer = Buffer::new((w, h), values.clone());
        band.write((0, 0), (w, h), &mut buffer).unwrap();
        if no_data.is_some() {
            band.set_no_data_value(no_data).unwrap();
        }
    }
    path
}
