//! `swarm-spatial` — broad-phase neighbor indexing for the swarm kernel.
//!
//! # Two backends, one contract
//!
//! | Backend        | Update model                         | Sweet spot          |
//! |----------------|--------------------------------------|---------------------|
//! | [`UniformGrid`]| incremental (`relocate` per move)    | default densities   |
//! | [`RStarIndex`] | bulk rebuild on each neighbor refresh| very large swarms   |
//!
//! Both implement [`SpatialIndex`].  `query_radius` is a broad phase: it may
//! over-report by the cell/envelope granularity, and callers must apply the
//! exact radius test.  [`NeighborGraph`] does exactly that, producing a flat
//! CSR adjacency that replaces per-agent hash sets — no per-tick heap churn.

pub mod grid;
pub mod index;
pub mod neighbors;
pub mod rtree;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use grid::UniformGrid;
pub use index::SpatialIndex;
pub use neighbors::NeighborGraph;
pub use rtree::RStarIndex;
