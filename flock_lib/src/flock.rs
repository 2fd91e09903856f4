use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::{
    agent::Agent,
    params::{SimOptions, SpawnOptions, UpdateMode, WorldBounds},
    registry::FlockRegistry,
};

/// Creates agents with randomised initial state. Owns its RNG so that runs
/// with the same seed place the population identically.
pub struct Spawner {
    rng: Xoshiro256PlusPlus,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        Spawner {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    /// Spawns `spawn.count` agents: positions uniform inside the bounds,
    /// velocity direction uniform on the circle, speed uniform in
    /// `[min_speed, max_speed]`.
    pub fn spawn(&mut self, spawn: &SpawnOptions, bounds: &WorldBounds) -> Vec<Agent> {
        (0..spawn.count)
            .map(|_| self.spawn_single(spawn, bounds))
            .collect()
    }

    fn spawn_single(&mut self, spawn: &SpawnOptions, bounds: &WorldBounds) -> Agent {
        let position = Vec2::new(
            bounds.left + self.rng.gen::<f32>() * bounds.width,
            bounds.bottom + self.rng.gen::<f32>() * bounds.height,
        );

        let direction = self.rng.gen::<f32>() * TAU;
        let speed = self.rng.gen_range(spawn.min_speed..=spawn.max_speed);
        let velocity = Vec2::new(direction.cos(), direction.sin()) * speed;

        Agent::new(position, velocity)
    }
}

/// A population of agents plus the shared registry their steering reads.
///
/// The population is fixed for the lifetime of a run: agents are created at
/// flock initialisation and never removed.
pub struct Flock {
    agents: Vec<Agent>,
    registry: FlockRegistry,
}

impl Flock {
    pub fn new(options: &SimOptions) -> Self {
        let mut spawner = Spawner::new(options.spawn.seed);
        Flock::with_agents(spawner.spawn(&options.spawn, &options.bounds))
    }

    /// Builds a flock around an already-placed population; each agent gets
    /// exactly one registry slot, in population order.
    pub fn with_agents(agents: Vec<Agent>) -> Self {
        let mut registry = FlockRegistry::with_capacity(agents.len());
        for agent in &agents {
            registry.register(agent);
        }

        Flock { agents, registry }
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn registry(&self) -> &FlockRegistry {
        &self.registry
    }

    /// Advances the whole population by one fixed timestep.
    pub fn tick(&mut self, options: &SimOptions) {
        match options.update_mode {
            UpdateMode::Snapshot => self.tick_snapshot(options),
            UpdateMode::InPlace => self.tick_in_place(options),
        }
    }

    /// Two-phase tick: every steering vector is computed against the
    /// tick-start registry, then all updates are applied and recorded. The
    /// outcome does not depend on processing order.
    fn tick_snapshot(&mut self, options: &SimOptions) {
        let accelerations: Vec<Vec2> = self
            .agents
            .iter()
            .map(|agent| agent.steering(&self.registry, &options.params))
            .collect();

        for (slot, (agent, acceleration)) in
            self.agents.iter_mut().zip(accelerations).enumerate()
        {
            agent.apply_acceleration(acceleration, options.dt);
            agent.advance(options.dt);
            agent.wrap(&options.bounds);
            self.registry.record(slot, agent);
        }
    }

    /// Reference-parity tick: each agent steers against the live registry
    /// and is updated immediately, so agents later in the sequence observe
    /// flockmates that already moved this tick.
    fn tick_in_place(&mut self, options: &SimOptions) {
        for slot in 0..self.agents.len() {
            let acceleration = self.agents[slot].steering(&self.registry, &options.params);

            let agent = &mut self.agents[slot];
            agent.apply_acceleration(acceleration, options.dt);
            agent.advance(options.dt);
            agent.wrap(&options.bounds);
            self.registry.record(slot, agent);
        }
    }
}
