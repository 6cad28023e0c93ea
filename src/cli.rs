use std::path::PathBuf;

use clap::Parser;

/// Plot a raster layer (GeoTIFF, NetCDF, …) one band per panel.
///
/// Without `--save` the viewer window opens; with it the figure is written
/// as PNG and the program exits.
#[derive(Debug, Parser)]
#[command(name = "rusty-raster", version, about)]
pub struct Cli {
    /// Raster to plot.
    #[arg(value_name = "RASTER")]
    pub raster: Option<PathBuf>,

    /// Layer type (amplitude, coherence, waterMask, defo, topo, ENU, …).
    /// Defaults to the name of the directory holding the raster.
    #[arg(short = 't', long, value_name = "LABEL")]
    pub layer_type: Option<String>,

    /// Number of bands to plot (1 to 3). Defaults to every band.
    #[arg(short, long, value_name = "N")]
    pub bands: Option<usize>,

    /// GNSS station list to overlay (e.g. gnssStationList_overbbox.csv).
    #[arg(short, long, value_name = "CSV")]
    pub stations: Option<PathBuf>,

    /// Write the figure to this PNG instead of opening the viewer.
    #[arg(short = 'o', long, value_name = "PNG", requires = "raster")]
    pub save: Option<PathBuf>,

    /// Panel height in pixels for PNG output.
    #[arg(long, value_name = "PX", default_value_t = 400)]
    pub panel_height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_headless_invocation() {
        let cli = Cli::try_parse_from([
            "rusty-raster",
            "products/ENU/disp.tif",
            "-t",
            "ENU",
            "--bands",
            "3",
            "-o",
            "enu.png",
        ])
        .unwrap();
        assert_eq!(cli.raster, Some(PathBuf::from("products/ENU/disp.tif")));
        assert_eq!(cli.layer_type.as_deref(), Some("ENU"));
        assert_eq!(cli.bands, Some(3));
        assert_eq!(cli.save, Some(PathBuf::from("enu.png")));
        assert_eq!(cli.panel_height, 400);
    }

    #[test]
    fn save_requires_a_raster() {
        assert!(Cli::try_parse_from(["rusty-raster", "--save", "out.png"]).is_err());
    }

    #[test]
    fn viewer_needs_no_arguments() {
        let cli = Cli::try_parse_from(["rusty-raster"]).unwrap();
        assert!(cli.raster.is_none());
        assert!(cli.save.is_none());
    }
}
