use glam::Vec2;

use crate::agent::Agent;

/// Kinematic state of one agent as seen by its flockmates. Consumers of the
/// registry never need full agent identity, only position and velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentState {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl From<&Agent> for AgentState {
    fn from(agent: &Agent) -> Self {
        AgentState {
            position: agent.position,
            velocity: agent.velocity,
        }
    }
}

/// Shared list of every live agent's kinematic state, read by every agent's
/// steering each tick. Owned by the flock; grows as agents register and
/// never shrinks during a run. Single writer, many readers.
#[derive(Debug, Default)]
pub struct FlockRegistry {
    entries: Vec<AgentState>,
}

impl FlockRegistry {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        FlockRegistry {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Adds an agent's state and returns its slot. Every live agent must
    /// appear exactly once; insertion order carries no meaning.
    pub fn register(&mut self, agent: &Agent) -> usize {
        self.entries.push(agent.into());
        self.entries.len() - 1
    }

    /// Overwrites a slot with the agent's current state after integration.
    pub fn record(&mut self, slot: usize, agent: &Agent) {
        self.entries[slot] = agent.into();
    }

    pub fn entries(&self) -> &[AgentState] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
