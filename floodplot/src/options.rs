use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Renders sea level rise visualizations from a DEM raster.
#[derive(Parser, Debug)]
pub struct Cli {
    /// Input single-band GeoTIFF DEM.
    #[arg(short, long, default_value = "data/output_be.tif")]
    pub dem: PathBuf,

    /// Output directory, created if absent.
    #[arg(short, long, default_value = "visuals")]
    pub out_dir: PathBuf,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render every visualization.
    All,

    /// Render the current elevation map.
    Elevation,

    /// Render the projection line chart.
    Projections,

    /// Render the 3x3 flooding scenario mosaic.
    Mosaic,

    /// Print the scenario dataset as JSON.
    Json,

    /// Print ASCII projection charts to the terminal.
    Preview,
}
