pub mod agent;
pub mod flock;
pub mod math;
pub mod params;
pub mod registry;
pub mod watcher;

use flock::Flock;
use params::SimOptions;
use watcher::{AgentSample, FlockWatcher, WatchError};

/// Runs a headless simulation for the given number of ticks and returns the
/// sampled agent poses, saving them first if the options ask for it.
pub fn simulate(ticks: u64, options: &SimOptions) -> Result<Vec<AgentSample>, WatchError> {
    let mut flock = Flock::new(options);
    let mut watcher = FlockWatcher::new(options.sample_rate);

    for _ in 0..ticks {
        flock.tick(options);
        watcher.watch(&flock);
    }

    watcher.pop_data_save(&options.save)
}
