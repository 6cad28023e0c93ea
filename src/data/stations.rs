use std::path::Path;

use serde::Deserialize;

use crate::error::StationError;

/// One GNSS station from a station-list CSV.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Station {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Lat")]
    pub lat: f64,
    #[serde(rename = "Lon")]
    pub lon: f64,
}

/// Read a station list such as `gnssStationList_overbbox.csv`.
///
/// Only the `ID`, `Lat` and `Lon` columns are used; any other column
/// (heights, archive paths, …) is ignored.
pub fn load_stations(path: &Path) -> Result<Vec<Station>, StationError> {
    let csv_err = |source| StationError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::Reader::from_path(path).map_err(csv_err)?;
    let stations = reader
        .deserialize::<Station>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(csv_err)?;
    log::info!("{} GNSS stations read from {}", stations.len(), path.display());
    Ok(stations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_ids_and_coordinates_ignoring_extra_columns() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ID,Lat,Lon,Hgt_m,path").unwrap();
        writeln!(file, "P123,34.5,-119.5,120.0,/data/P123.ztd").unwrap();
        writeln!(file, "CAT2,33.9,-118.2,55.0,/data/CAT2.ztd").unwrap();
        file.flush().unwrap();

        let stations = load_stations(file.path()).unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].id, "P123");
        assert_eq!(stations[1].lon, -118.2);
    }

    #[test]
    fn malformed_latitude_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ID,Lat,Lon").unwrap();
        writeln!(file, "P123,north,-119.5").unwrap();
        file.flush().unwrap();

        assert!(load_stations(file.path()).is_err());
    }
}
