//! Core agent storage: `AgentStore` (SoA data) and `AgentRngs` (per-agent RNG).
//!
//! # Why two structs?
//!
//! The behavior evaluation phase needs `&mut AgentRngs` (exclusive mutable
//! access to each agent's RNG) and `&AgentStore` (shared read access to world
//! state) simultaneously.  Rust's borrow checker forbids this if both live
//! inside a single struct.  Keeping RNGs in a separate `AgentRngs` struct
//! resolves the conflict cleanly:
//!
//! ```ignore
//! // swarm-sim evaluation phase (simplified):
//! let store: &AgentStore = &kernel.agents;
//! let deltas = kernel.rngs.inner
//!     .par_iter_mut()
//!     .enumerate()
//!     .map(|(i, rng)| model.evaluate(AgentId(i as u32), &ctx, rng))
//!     .collect::<Vec<_>>();
//! ```

use swarm_core::{AgentId, AgentRng, Vec2};

use crate::role::Role;
use crate::trail::Trail;

/// Dimension of the per-agent opinion vector used by the Consensus strategy.
pub const OPINION_DIM: usize = 3;

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state, separated from [`AgentStore`] to enable
/// simultaneous `&mut AgentRngs` + `&AgentStore` borrows in the parallel phase.
///
/// `AgentRngs` is `Send` (the inner `SmallRng` is `Send`) but intentionally
/// not `Sync` — per-agent RNG state must never be shared between threads.
/// Rayon's `par_iter_mut()` handles the exclusive-per-thread access pattern.
#[derive(Debug)]
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
}

impl AgentRngs {
    /// Allocate and seed `count` per-agent RNGs from `global_seed`.
    pub(crate) fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner }
    }

    /// Mutable reference to one agent's RNG.
    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all agent state.
///
/// Every `Vec` field has exactly `count` elements; the `AgentId` value is the
/// index into all of them:
///
/// ```ignore
/// let pos = store.positions[agent.index()];  // O(1), cache-friendly
/// ```
///
/// The store is owned and mutated exclusively by the simulation kernel.
/// Within a session it is mutated in place every tick; agents are never
/// individually added or removed — configuration changes rebuild the whole
/// population.
#[derive(Debug)]
pub struct AgentStore {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    // ── Kinematic state ───────────────────────────────────────────────────
    /// World position.  Always inside world bounds after each tick.
    pub positions: Vec<Vec2>,

    /// Velocity in world units per tick.  `|v| ≤ max_speed` after each tick.
    pub velocities: Vec<Vec2>,

    // ── Coordination state ────────────────────────────────────────────────
    /// Role assigned at spawn; immutable thereafter.
    pub roles: Vec<Role>,

    /// `true` once the agent is within the target radius of its effective
    /// target.  Cleared for all agents when a new target arrives.
    pub reached: Vec<bool>,

    /// Local opinion vector averaged by the Consensus strategy.
    pub opinions: Vec<[f64; OPINION_DIM]>,

    /// Resource gauge in `(0, 100]`.  Drains while moving and wraps back to
    /// 100 at zero — a diagnostic readout, not a hard constraint.
    pub energy: Vec<f64>,

    // ── Render diagnostics ────────────────────────────────────────────────
    /// Bounded ring buffer of recently sampled positions.
    pub trails: Vec<Trail>,
}

impl AgentStore {
    /// `true` if there are no agents.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    /// Current speed of one agent in world units per tick.
    #[inline]
    pub fn speed(&self, agent: AgentId) -> f64 {
        self.velocities[agent.index()].length()
    }

    /// `true` once every agent has reached its effective target.
    pub fn all_reached(&self) -> bool {
        self.reached.iter().all(|&r| r)
    }

    /// Number of agents currently marked reached.
    pub fn reached_count(&self) -> usize {
        self.reached.iter().filter(|&&r| r).count()
    }

    // ── Package-private constructor used by AgentStoreBuilder ─────────────

    pub(crate) fn new(count: usize, trail_capacity: usize) -> Self {
        Self {
            count,
            positions: vec![Vec2::ZERO; count],
            velocities: vec![Vec2::ZERO; count],
            roles: (0..count).map(|i| Role::for_index(i, count)).collect(),
            reached: vec![false; count],
            opinions: vec![[0.0; OPINION_DIM]; count],
            energy: vec![100.0; count],
            trails: (0..count).map(|_| Trail::new(trail_capacity)).collect(),
        }
    }
}
