mod elevation_map;
mod flood_mosaic;
mod linspace;
mod options;
mod palette;
mod projection_chart;

use anyhow::Error as AnyError;
use clap::Parser;
use demgrid::Dem;
use options::{Cli, Command as CliCmd};
use searise::scenarios::Pathway;
use std::{fs, path::Path};
use textplots::{Chart, Plot, Shape};

/// Total surveyed area spread over the raster, km².
const COVERAGE_KM2: f64 = 49_667.0;

/// Raster footprint (east-west, north-south), km.
const EXTENT_KM: (f64, f64) = (300.0, 200.0);

const ELEVATION_PNG: &str = "netherlands_current_elevation.png";
const PROJECTIONS_PNG: &str = "sea_level_rise_projections.png";
const MOSAIC_PNG: &str = "flooding_scenarios_mosaic.png";

fn main() -> Result<(), AnyError> {
    env_logger::init();

    let Cli { dem, out_dir, cmd } = Cli::parse();
    fs::create_dir_all(&out_dir)?;

    match cmd.unwrap_or(CliCmd::All) {
        CliCmd::All => {
            let dem = load_dem(&dem)?;
            elevation_map::render(&dem, &out_dir.join(ELEVATION_PNG))?;
            projection_chart::render(&out_dir.join(PROJECTIONS_PNG))?;
            flood_mosaic::render(&dem, &out_dir.join(MOSAIC_PNG))?;
        }
        CliCmd::Elevation => {
            let dem = load_dem(&dem)?;
            elevation_map::render(&dem, &out_dir.join(ELEVATION_PNG))?;
        }
        CliCmd::Projections => projection_chart::render(&out_dir.join(PROJECTIONS_PNG))?,
        CliCmd::Mosaic => {
            let dem = load_dem(&dem)?;
            flood_mosaic::render(&dem, &out_dir.join(MOSAIC_PNG))?;
        }
        CliCmd::Json => json()?,
        CliCmd::Preview => preview()?,
    }
    Ok(())
}

/// Loads the DEM, clamps artifacts to [0, 200] m NAP, and reorients so
/// row 0 is the southernmost scanline.
fn load_dem(path: &Path) -> Result<Dem, AnyError> {
    let dem = Dem::load(path)?.clamped(0.0, 200.0).south_up();
    let (rows, cols) = dem.dimensions();
    let (sw, ne) = dem.bounds();
    log::info!("loaded {rows}x{cols} DEM, bounds {sw:?}..{ne:?}");
    log::debug!("nodata sentinel: {:?}", dem.nodata());
    Ok(dem)
}

fn json() -> Result<(), AnyError> {
    let json = serde_json::to_string_pretty(&searise::scenarios::dataset())?;
    println!("{json}");
    Ok(())
}

fn preview() -> Result<(), AnyError> {
    for pathway in [Pathway::LowEmissions, Pathway::HighEmissions] {
        let series = searise::scenarios::upper_bound_series(pathway)?;
        let plot_data: Vec<(f32, f32)> = series
            .iter()
            .map(|&(year, rise)| (year as f32, rise as f32))
            .collect();
        println!("{pathway} upper bound (m):");
        Chart::new(300, 120, 2050.0, 2500.0)
            .lineplot(&Shape::Lines(&plot_data))
            .display();
    }
    Ok(())
}
