use clap::Parser;
use std::path::PathBuf;

/// Renders the demo sales charts to standalone HTML files.
#[derive(Parser, Debug)]
pub struct Cli {
    /// Output directory, created if absent.
    #[arg(short, long, default_value = "visual")]
    pub out_dir: PathBuf,
}
