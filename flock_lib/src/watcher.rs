use std::{fs::OpenOptions, mem};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::{flock::Flock, params::SaveOptions};

const PREFIX: &str = "flock-data";

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("could not open sample output: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not write sample output: {0}")]
    Csv(#[from] csv::Error),
}

/// One sampled row: a single agent's pose at a sampled tick.
#[derive(Serialize, Debug, Clone, Copy)]
pub struct AgentSample {
    pub id: usize,
    pub x: f32,
    pub y: f32,
    pub heading: f32,
    pub tick: u64,
}

/// Accumulates agent poses every Nth tick. Pure observer: reads the flock,
/// never feeds back into the simulation.
pub struct FlockWatcher {
    samples: Vec<AgentSample>,
    ticker: u64,
    sample_rate: u64,
}

impl FlockWatcher {
    pub fn new(sample_rate: u64) -> Self {
        FlockWatcher {
            samples: Vec::new(),
            ticker: 0,
            sample_rate: sample_rate.max(1),
        }
    }

    /// Triggers data collection for the current tick.
    pub fn watch(&mut self, flock: &Flock) {
        if !self.should_sample() {
            return;
        }

        let tick = self.ticker / self.sample_rate;
        self.samples
            .extend(flock.agents().iter().enumerate().map(|(id, agent)| {
                AgentSample {
                    id,
                    x: agent.position.x,
                    y: agent.position.y,
                    heading: agent.heading,
                    tick,
                }
            }));
    }

    pub fn pop_data(&mut self) -> Vec<AgentSample> {
        mem::take(&mut self.samples)
    }

    /// Saves the collected samples in CSV format, then returns them while
    /// emptying the watcher's memory.
    ///
    /// Depending on save options, either overwrites the fixed-name file or
    /// writes a new timestamped one.
    pub fn pop_data_save(&mut self, save_options: &SaveOptions) -> Result<Vec<AgentSample>, WatchError> {
        let data = self.pop_data();

        if !save_options.save {
            return Ok(data);
        }

        if let Some(path) = &save_options.path {
            let file_path = format!(
                "{path}{file_name}",
                file_name = FlockWatcher::dataset_name(save_options, Utc::now())
            );

            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(file_path)?;
            let mut writer = csv::Writer::from_writer(file);

            for sample in &data {
                writer.serialize(sample)?;
            }
            writer.flush()?;
        }

        Ok(data)
    }

    fn dataset_name(save_options: &SaveOptions, now: DateTime<Utc>) -> String {
        match save_options.timestamp {
            true => format!(
                "{prefix}_{datetime}.csv",
                prefix = PREFIX,
                datetime = now.timestamp_millis()
            ),
            false => format!("{prefix}.csv", prefix = PREFIX),
        }
    }

    fn should_sample(&mut self) -> bool {
        self.ticker += 1;
        self.ticker % self.sample_rate == 0
    }
}
