//! `swarm-behavior` — pluggable coordination strategies for the swarm kernel.
//!
//! Each strategy implements [`SteeringModel`]: given one agent, the read-only
//! [`SteerContext`] (agent store + neighbor graph + shared target), and the
//! agent's own RNG, produce a [`Steering`] delta — a force to fold into the
//! velocity, optionally bundled with an opinion update (Consensus is the only
//! strategy that sets one).
//!
//! The kernel evaluates the active model for every non-reached agent each
//! tick (the produce phase, optionally parallel) and applies the deltas
//! sequentially in ascending `AgentId` order (the apply phase).  Models
//! therefore never mutate shared state and must be `Send + Sync`.
//!
//! # Zero-neighbor policy
//!
//! An empty neighborhood is a normal condition, not an error: Flocking
//! degrades to pure Seek, Consensus leaves the opinion untouched.  No model
//! ever divides by a neighbor count without checking it first.

pub mod consensus;
pub mod context;
pub mod flocking;
pub mod formation;
pub mod model;
pub mod pattern;
pub mod seek;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use consensus::Consensus;
pub use context::SteerContext;
pub use flocking::Flocking;
pub use formation::{Formation, FormationMap};
pub use model::{Steering, SteeringModel};
pub use pattern::FormationPattern;
pub use seek::Seek;
