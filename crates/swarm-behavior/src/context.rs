//! Read-only simulation state passed to every steering evaluation.

use swarm_agent::AgentStore;
use swarm_core::{AgentId, Tick, Vec2};
use swarm_spatial::NeighborGraph;

/// A read-only snapshot of the simulation state passed to every
/// [`SteeringModel`][crate::SteeringModel] evaluation.
///
/// `SteerContext` is built once per tick by the kernel and shared (immutably)
/// across all agent evaluations during the produce phase.  Positions observed
/// through it are the pre-integration values for the whole tick — no agent
/// ever sees another agent's post-integration position within the same tick.
pub struct SteerContext<'a> {
    /// Current simulation tick.
    pub tick: Tick,

    /// Seconds of simulated time per tick.
    pub dt_secs: f64,

    /// The shared target (gather point / formation anchor).
    pub target: Vec2,

    /// Read-only view of every agent's SoA state arrays.
    pub agents: &'a AgentStore,

    /// CSR neighbor adjacency from the most recent refresh.
    pub graph: &'a NeighborGraph,
}

impl<'a> SteerContext<'a> {
    /// Build a new context for a single tick.
    #[inline]
    pub fn new(
        tick: Tick,
        dt_secs: f64,
        target: Vec2,
        agents: &'a AgentStore,
        graph: &'a NeighborGraph,
    ) -> Self {
        Self { tick, dt_secs, target, agents, graph }
    }

    /// Neighbor slice of one agent (may be stale by up to the refresh period).
    #[inline]
    pub fn neighbors(&self, agent: AgentId) -> &[AgentId] {
        self.graph.neighbors(agent)
    }

    #[inline]
    pub fn position(&self, agent: AgentId) -> Vec2 {
        self.agents.positions[agent.index()]
    }

    #[inline]
    pub fn velocity(&self, agent: AgentId) -> Vec2 {
        self.agents.velocities[agent.index()]
    }
}
