use std::{error::Error, fs};

use clap::Parser;
use flock_lib::params::{SimOptions, UpdateMode, WorldBounds};

mod cliargs;
use cliargs::Args;

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let mut options = load_options(&args)?;
    apply_overrides(&mut options, &args);

    let data = flock_lib::simulate(args.ticks, &options)?;

    println!(
        "simulated {count} agents for {ticks} ticks, {samples} samples collected",
        count = options.spawn.count,
        ticks = args.ticks,
        samples = data.len(),
    );

    Ok(())
}

/// Options from the config file when it exists, built-in defaults otherwise.
fn load_options(args: &Args) -> Result<SimOptions, Box<dyn Error>> {
    match fs::read_to_string(&args.config_path) {
        Ok(raw) => Ok(toml::from_str(&raw)?),
        Err(_) => Ok(SimOptions::default()),
    }
}

fn apply_overrides(options: &mut SimOptions, args: &Args) {
    if let Some(count) = args.count {
        options.spawn.count = count;
    }
    if let Some(seed) = args.seed {
        options.spawn.seed = seed;
    }
    if let Some(sample_rate) = args.sample_rate {
        options.sample_rate = sample_rate;
    }
    if args.width.is_some() || args.height.is_some() {
        options.bounds = WorldBounds::from_viewport(
            args.width.unwrap_or(options.bounds.width),
            args.height.unwrap_or(options.bounds.height),
        );
    }
    if args.save {
        options.save.save = true;
        options.save.path.get_or_insert_with(|| "./".to_owned());
    }
    if args.save_timestamp {
        options.save.timestamp = true;
    }
    if args.in_place {
        options.update_mode = UpdateMode::InPlace;
    }
}
