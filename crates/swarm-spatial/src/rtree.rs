//! R*-tree spatial index backend (the high-agent-count variant).
//!
//! Backed by `rstar`.  Unlike the grid there is no cheap incremental move,
//! so `sync` bulk-rebuilds the tree; bulk loading is O(n log n) and only
//! happens on neighbor-refresh ticks, which keeps it off the per-tick hot
//! path.  Queries walk the tree's envelope hierarchy instead of scanning a
//! fixed cell square, which degrades more gracefully when the swarm is
//! strongly clustered.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use swarm_core::{AgentId, Vec2};

use crate::index::SpatialIndex;

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R*-tree: a 2-D point with the associated `AgentId`.
#[derive(Clone)]
struct AgentEntry {
    point: [f64; 2],
    id: AgentId,
}

impl RTreeObject for AgentEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for AgentEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── RStarIndex ────────────────────────────────────────────────────────────────

/// Bulk-rebuilt R*-tree over agent positions.
pub struct RStarIndex {
    tree: RTree<AgentEntry>,
    count: usize,
}

impl RStarIndex {
    /// Create an empty index; populate via [`SpatialIndex::sync`].
    pub fn new() -> Self {
        Self { tree: RTree::new(), count: 0 }
    }
}

impl Default for RStarIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl SpatialIndex for RStarIndex {
    fn sync(&mut self, positions: &[Vec2]) {
        // Bulk load is faster than n inserts and keeps the tree balanced.
        let entries: Vec<AgentEntry> = positions
            .iter()
            .enumerate()
            .map(|(i, &p)| AgentEntry {
                point: [p.x, p.y],
                id: AgentId(i as u32),
            })
            .collect();
        self.count = entries.len();
        self.tree = RTree::bulk_load(entries);
    }

    fn query_radius(&self, center: Vec2, radius: f64, out: &mut Vec<AgentId>) {
        out.extend(
            self.tree
                .locate_within_distance([center.x, center.y], radius * radius)
                .map(|e| e.id),
        );
    }

    fn len(&self) -> usize {
        self.count
    }
}
