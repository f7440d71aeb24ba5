//! Fluent builder for constructing `AgentStore` + `AgentRngs` in one step.
//!
//! # Usage
//!
//! ```rust
//! use swarm_agent::AgentStoreBuilder;
//! use swarm_core::WorldBounds;
//!
//! let (store, rngs) = AgentStoreBuilder::new(30, /*seed=*/ 42)
//!     .bounds(WorldBounds::new(800.0, 600.0))
//!     .trail_capacity(24)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(store.count, 30);
//! assert_eq!(rngs.len(), 30);
//! assert!(store.positions.iter().all(|&p| store.count > 0 && p.x >= 0.0));
//! ```

use swarm_core::{SimRng, SwarmError, SwarmResult, WorldBounds};

use crate::store::{AgentRngs, AgentStore, OPINION_DIM};

/// Fluent builder for [`AgentStore`] + [`AgentRngs`].
///
/// Spawn positions are drawn uniformly from the world bounds, opinions
/// uniformly from `[0, 1]` per component, velocities start at zero, and
/// energy starts full.  Roles follow the deterministic index pattern in
/// [`Role::for_index`][crate::Role::for_index].
pub struct AgentStoreBuilder {
    count: usize,
    seed: u64,
    bounds: WorldBounds,
    trail_capacity: usize,
}

impl AgentStoreBuilder {
    /// Create a builder for `count` agents using `seed` as the global RNG seed.
    pub fn new(count: usize, seed: u64) -> Self {
        Self {
            count,
            seed,
            bounds: WorldBounds::default(),
            trail_capacity: 24,
        }
    }

    /// World rectangle to scatter spawn positions over.
    pub fn bounds(mut self, bounds: WorldBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Ring-buffer capacity for each agent's trail (default 24).
    pub fn trail_capacity(mut self, capacity: usize) -> Self {
        self.trail_capacity = capacity;
        self
    }

    /// Construct `AgentStore` and `AgentRngs`.
    ///
    /// Rejects an empty population — a zero-agent kernel has no meaningful
    /// tick, so the mistake surfaces here rather than mid-loop.
    pub fn build(self) -> SwarmResult<(AgentStore, AgentRngs)> {
        if self.count == 0 {
            return Err(SwarmError::InvalidAgentCount(0));
        }

        let mut store = AgentStore::new(self.count, self.trail_capacity);
        let mut rng = SimRng::new(self.seed);

        for i in 0..self.count {
            store.positions[i] = self.bounds.random_point(&mut rng);
            for k in 0..OPINION_DIM {
                store.opinions[i][k] = rng.gen_range(0.0..=1.0);
            }
        }

        let rngs = AgentRngs::new(self.count, self.seed);
        Ok((store, rngs))
    }
}
