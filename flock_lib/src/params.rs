use serde::{Deserialize, Serialize};

/// Steering configuration shared by every agent in a flock. Set once at
/// flock creation, never mutated per agent.
///
/// Radii are assumed non-negative and weights finite; the configuration
/// layer supplying the values is responsible for keeping them sane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlockParameters {
    pub cohesion_radius: f32,
    pub cohesion_weight: f32,
    pub alignment_weight: f32,
    pub separation_radius: f32,
    pub separation_weight: f32,
    pub max_acceleration: f32,
}

impl Default for FlockParameters {
    fn default() -> Self {
        FlockParameters {
            cohesion_radius: 30.,
            cohesion_weight: 30.,
            alignment_weight: 1000.,
            separation_radius: 20.,
            separation_weight: 5000.,
            max_acceleration: 650.,
        }
    }
}

/// Extent of the toroidal world in simulation units. Derived once from the
/// viewport and constant for the rest of the run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldBounds {
    /// lowest x value
    pub left: f32,
    /// highest x value
    pub right: f32,
    /// highest y value
    pub top: f32,
    /// lowest y value
    pub bottom: f32,
    pub width: f32,
    pub height: f32,
}

impl WorldBounds {
    /// Bounds for a width x height viewport centered on the origin.
    pub fn from_viewport(width: f32, height: f32) -> Self {
        WorldBounds {
            left: -width / 2.,
            right: width / 2.,
            top: height / 2.,
            bottom: -height / 2.,
            width,
            height,
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.right && y >= self.bottom && y <= self.top
    }
}

impl Default for WorldBounds {
    fn default() -> Self {
        WorldBounds::from_viewport(900., 600.)
    }
}

/// How a tick reads the registry while agents are being updated.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
// {"type": "InPlace"}
pub enum UpdateMode {
    /// Steering for every agent is computed against a tick-start snapshot,
    /// then all updates are applied. Independent of processing order.
    #[default]
    Snapshot,
    /// Each agent reads the live registry and is updated immediately, so it
    /// can observe flockmates already moved this tick. Order-dependent.
    InPlace,
}

/// Initial population configuration, consumed by the spawner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnOptions {
    pub count: usize,
    /// lower bound of the initial speed range, simulation units per second
    pub min_speed: f32,
    /// upper bound of the initial speed range
    pub max_speed: f32,
    pub seed: u64,
}

impl Default for SpawnOptions {
    fn default() -> Self {
        SpawnOptions {
            count: 128,
            min_speed: 20.,
            max_speed: 40.,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveOptions {
    pub save: bool,
    pub path: Option<String>,
    pub timestamp: bool,
}

/// Everything a run needs: steering parameters, world bounds, timestep and
/// population plus recording configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimOptions {
    pub params: FlockParameters,
    pub bounds: WorldBounds,
    /// fixed timestep in seconds
    pub dt: f32,
    pub update_mode: UpdateMode,
    pub spawn: SpawnOptions,
    /// sample every Nth tick
    pub sample_rate: u64,
    pub save: SaveOptions,
}

impl Default for SimOptions {
    fn default() -> Self {
        SimOptions {
            params: Default::default(),
            bounds: Default::default(),
            dt: 0.02,
            update_mode: Default::default(),
            spawn: Default::default(),
            sample_rate: 1,
            save: Default::default(),
        }
    }
}
