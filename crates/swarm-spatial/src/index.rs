//! The `SpatialIndex` trait — the seam between the kernel and its broad phase.

use swarm_core::{AgentId, Vec2};

/// A broad-phase position index over the agent population.
///
/// The kernel owns exactly one index and is the only writer.  `sync` is
/// called with the full, authoritative position array; how much work that
/// does is the backend's business (the grid relocates only agents that
/// crossed a cell boundary, the R*-tree bulk-rebuilds).
///
/// # Over-reporting
///
/// `query_radius` returns a superset of the agents within `radius` of
/// `center` — accurate to the backend's spatial granularity.  Callers must
/// apply the exact distance test themselves.  The query never includes an
/// exactness guarantee, but it must never *miss* an agent within the radius.
pub trait SpatialIndex: Send {
    /// Bring the index up to date with `positions` (indexed by `AgentId`).
    ///
    /// A length change means the population was rebuilt; the backend must
    /// re-index from scratch in that case.
    fn sync(&mut self, positions: &[Vec2]);

    /// Append all candidate agents within `radius` of `center` to `out`.
    ///
    /// `out` is not cleared — callers reuse one scratch buffer across a whole
    /// refresh pass and clear it between queries.
    fn query_radius(&self, center: Vec2, radius: f64, out: &mut Vec<AgentId>);

    /// Number of agents currently indexed.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
