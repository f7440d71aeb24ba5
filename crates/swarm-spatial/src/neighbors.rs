//! `NeighborGraph` — flat CSR adjacency over the agent population.
//!
//! # Data layout
//!
//! The neighbor relation is stored in **Compressed Sparse Row (CSR)** form.
//! Given an `AgentId a`, its neighbors occupy the slice:
//!
//! ```text
//! ids[ offsets[a] .. offsets[a + 1] ]
//! ```
//!
//! Both arrays are reused across refreshes (cleared, not reallocated), so a
//! refresh allocates nothing once the graph has warmed up.  This replaces the
//! per-agent hash-set representation: membership never needs to be tested,
//! only iterated, and iteration over a contiguous slice is as cheap as it gets.
//!
//! # Symmetry
//!
//! Neighborhood is "strictly within `radius`", evaluated with the same
//! Euclidean test in both directions, so the relation is symmetric by
//! construction.  An agent is never its own neighbor.

use swarm_core::{AgentId, Vec2};

use crate::index::SpatialIndex;

/// Flat CSR adjacency, rebuilt from a [`SpatialIndex`] every refresh.
#[derive(Default)]
pub struct NeighborGraph {
    /// CSR row pointer.  Neighbors of agent `a` are at
    /// `ids[offsets[a] .. offsets[a + 1]]`.  Length = `count + 1`.
    offsets: Vec<u32>,
    /// Concatenated neighbor lists.
    ids: Vec<AgentId>,
    /// Scratch buffer for broad-phase candidates, reused across queries.
    scratch: Vec<AgentId>,
}

impl NeighborGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the adjacency from scratch.
    ///
    /// For each agent: broad-phase query via `index`, then the exact
    /// strictly-less-than `radius` test, excluding the agent itself.
    /// `index` must already be synced to `positions`.
    pub fn rebuild<I: SpatialIndex + ?Sized>(
        &mut self,
        index: &I,
        positions: &[Vec2],
        radius: f64,
    ) {
        let count = positions.len();
        let radius_sq = radius * radius;

        self.offsets.clear();
        self.ids.clear();
        self.offsets.reserve(count + 1);
        self.offsets.push(0);

        for (i, &pos) in positions.iter().enumerate() {
            let me = AgentId(i as u32);
            self.scratch.clear();
            index.query_radius(pos, radius, &mut self.scratch);
            for &other in &self.scratch {
                if other != me && pos.distance_sq(positions[other.index()]) < radius_sq {
                    self.ids.push(other);
                }
            }
            self.offsets.push(self.ids.len() as u32);
        }
    }

    /// Reset to an empty graph over `count` agents (no edges).
    ///
    /// Used right after a population rebuild, before the first refresh.
    pub fn reset(&mut self, count: usize) {
        self.offsets.clear();
        self.ids.clear();
        self.offsets.resize(count + 1, 0);
    }

    /// Neighbor slice of one agent (empty if the graph has no rows yet).
    #[inline]
    pub fn neighbors(&self, agent: AgentId) -> &[AgentId] {
        let i = agent.index();
        if i + 1 >= self.offsets.len() {
            return &[];
        }
        let start = self.offsets[i] as usize;
        let end = self.offsets[i + 1] as usize;
        &self.ids[start..end]
    }

    /// Degree of one agent.
    #[inline]
    pub fn degree(&self, agent: AgentId) -> usize {
        self.neighbors(agent).len()
    }

    /// Number of agents the graph was built over.
    pub fn agent_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// Mean neighbor count across the population (0.0 for an empty graph).
    pub fn mean_degree(&self) -> f64 {
        let n = self.agent_count();
        if n == 0 {
            0.0
        } else {
            self.ids.len() as f64 / n as f64
        }
    }
}
