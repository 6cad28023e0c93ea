//! Writes a directory tree of synthetic layers for trying the viewer:
//!
//! ```text
//! <out>/amplitude/amplitude.tif   <out>/defo/defo.tif
//! <out>/coherence/coherence.tif   <out>/topo/topo.tif
//! <out>/incidenceAngle/los.tif    <out>/ENU/enu.tif   (3 bands)
//! <out>/waterMask/water.tif       <out>/gnssStationList_overbbox.csv
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gdal::raster::Buffer;
use gdal::DriverManager;

const WIDTH: usize = 200;
const HEIGHT: usize = 150;
const GEO_TRANSFORM: [f64; 6] = [-120.0, 0.01, 0.0, 35.0, 0.0, -0.01];
const NO_DATA: f64 = -9999.0;
const FILL: f64 = 1e30;

fn gaussian_bump(col: usize, row: usize, cx: f64, cy: f64, sigma: f64) -> f64 {
    let dx = col as f64 - cx;
    let dy = row as f64 - cy;
    (-(dx * dx + dy * dy) / (2.0 * sigma * sigma)).exp()
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform in [0, 1).
    fn uniform(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn gauss(&mut self, mean: f64, std: f64) -> f64 {
        // Box-Muller
        let u1 = self.uniform().max(f64::MIN_POSITIVE);
        let u2 = self.uniform();
        mean + std * (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }
}

/// Evaluate `f(col, row)` over the whole grid.
fn grid(mut f: impl FnMut(usize, usize) -> f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(WIDTH * HEIGHT);
    for row in 0..HEIGHT {
        for col in 0..WIDTH {
            out.push(f(col, row));
        }
    }
    out
}

fn write_layer(path: &Path, bands: &[Vec<f64>], no_data: Option<f64>) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let driver = DriverManager::get_driver_by_name("GTiff").context("GTiff driver")?;
    let mut dataset = driver
        .create_with_band_type::<f64, _>(path, WIDTH, HEIGHT, bands.len())
        .with_context(|| format!("creating {}", path.display()))?;
    dataset.set_geo_transform(&GEO_TRANSFORM)?;

    for (i, values) in bands.iter().enumerate() {
        let mut band = dataset.rasterband(i + 1)?;
        let mut buffer = Buffer::new((WIDTH, HEIGHT), values.clone());
        band.write((0, 0), (WIDTH, HEIGHT), &mut buffer)?;
        if no_data.is_some() {
            band.set_no_data_value(no_data)?;
        }
    }
    println!("  wrote {} ({} band(s))", path.display(), bands.len());
    Ok(())
}

fn write_stations(path: &Path, rng: &mut SimpleRng) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("opening station list")?;
    writer.write_record(["ID", "Lat", "Lon", "Hgt_m"])?;
    for i in 0..25 {
        // A few stations fall outside the raster on purpose.
        let lat = 33.3 + rng.uniform() * 2.0;
        let lon = -120.2 + rng.uniform() * 2.4;
        let hgt = rng.uniform() * 1500.0;
        writer.write_record([
            format!("ST{i:02}"),
            format!("{lat:.5}"),
            format!("{lon:.5}"),
            format!("{hgt:.1}"),
        ])?;
    }
    writer.flush()?;
    println!("  wrote {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    let out = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_layers"));
    let mut rng = SimpleRng::new(42);

    println!("Generating sample layers in {}", out.display());

    // Speckled amplitude with a no-data frame.
    let amplitude = grid(|col, row| {
        if col < 5 || row < 5 {
            NO_DATA
        } else {
            (800.0 + 1500.0 * gaussian_bump(col, row, 120.0, 60.0, 40.0)) * rng.uniform() * 2.0
        }
    });
    write_layer(&out.join("amplitude/amplitude.tif"), &[amplitude], Some(NO_DATA))?;

    let coherence = grid(|col, _| {
        (0.3 + 0.6 * col as f64 / WIDTH as f64 + rng.gauss(0.0, 0.05)).clamp(0.0, 1.0)
    });
    write_layer(&out.join("coherence/coherence.tif"), &[coherence], None)?;

    let incidence = grid(|col, row| 30.0 + 15.0 * col as f64 / WIDTH as f64 + 0.01 * row as f64);
    write_layer(&out.join("incidenceAngle/los.tif"), &[incidence], None)?;

    let water = grid(|col, row| if col + row / 2 < 60 { 1.0 } else { 0.0 });
    write_layer(&out.join("waterMask/water.tif"), &[water], None)?;

    // Subsidence bowl; the lower-right corner carries a fill value and no
    // declared no-data.
    let defo = grid(|col, row| {
        if col > 180 && row > 130 {
            FILL
        } else {
            -0.08 * gaussian_bump(col, row, 90.0, 80.0, 25.0) + rng.gauss(0.0, 0.002)
        }
    });
    write_layer(&out.join("defo/defo.tif"), &[defo], None)?;

    let topo = grid(|col, row| {
        (2500.0 * gaussian_bump(col, row, 150.0, 40.0, 35.0)
            + 900.0 * gaussian_bump(col, row, 40.0, 110.0, 50.0)
            - 50.0)
            .max(-20.0)
    });
    write_layer(&out.join("topo/topo.tif"), &[topo], None)?;

    let east = grid(|col, row| 0.01 * gaussian_bump(col, row, 100.0, 75.0, 30.0) * (col as f64 - 100.0) / 30.0);
    let north = grid(|col, row| 0.01 * gaussian_bump(col, row, 100.0, 75.0, 30.0) * (75.0 - row as f64) / 30.0);
    let up = grid(|col, row| -0.02 * gaussian_bump(col, row, 100.0, 75.0, 30.0));
    write_layer(&out.join("ENU/enu.tif"), &[east, north, up], None)?;

    write_stations(&out.join("gnssStationList_overbbox.csv"), &mut rng)?;

    println!("Done.");
    Ok(())
}
