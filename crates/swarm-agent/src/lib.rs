//! `swarm-agent` — Structure-of-Arrays agent storage for the swarm kernel.
//!
//! The agent population lives in one [`AgentStore`]: parallel `Vec`s indexed
//! by `AgentId`, owned exclusively by the simulation kernel.  There is no
//! per-agent object and no component system — the swarm domain is fixed, so
//! the arrays are too.
//!
//! Per-agent RNG state lives in a separate [`AgentRngs`] struct so the tick
//! loop can hold `&mut AgentRngs` and `&AgentStore` simultaneously during the
//! (optionally parallel) behavior evaluation phase.

pub mod builder;
pub mod role;
pub mod store;
pub mod trail;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use builder::AgentStoreBuilder;
pub use role::Role;
pub use store::{AgentRngs, AgentStore, OPINION_DIM};
pub use trail::Trail;
