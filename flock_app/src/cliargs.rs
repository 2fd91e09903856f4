use std::path::PathBuf;

use clap::Parser;

/// Headless runner for the flocking simulation.
///
/// Defaults come from the built-in configuration, overridden by the TOML
/// config file when present, overridden in turn by any flag given here.
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Config file
    #[arg(short, long = "config", default_value = "config.toml")]
    pub config_path: PathBuf,

    /// number of simulation ticks to run
    #[arg(short = 't', long, default_value_t = 1000)]
    pub ticks: u64,

    /// number of agents
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// spawner RNG seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// world width in simulation units
    #[arg(short = 'x', long)]
    pub width: Option<f32>,

    /// world height in simulation units
    #[arg(short = 'y', long)]
    pub height: Option<f32>,

    /// sample every Nth tick
    #[arg(short = 'r', long)]
    pub sample_rate: Option<u64>,

    /// save sampled poses as CSV in the working directory
    #[arg(short = 's', long)]
    pub save: bool,

    /// timestamp the CSV file name instead of overwriting
    #[arg(long)]
    pub save_timestamp: bool,

    /// use the order-dependent in-place update instead of the snapshot tick
    #[arg(long)]
    pub in_place: bool,
}
