/// Data layer: raster loading, masking and the station overlay.
///
/// Architecture:
/// ```text
///  .tif / .nc / any GDAL raster
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  open read-only → RasterLayer, then release the handle
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ RasterLayer  │  GeoTransform, size, Vec<Band>
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   mask    │  fill values / no-data sentinel → MaskedBand
///   └──────────┘
///
///  gnssStationList_*.csv ──▶ stations ──▶ Vec<Station> (overlay)
/// ```

pub mod loader;
pub mod model;
pub mod mask;
pub mod stations;
