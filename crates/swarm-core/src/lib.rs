//! `swarm-core` — foundational types for the swarm simulation kernel.
//!
//! This crate is a dependency of every other `swarm-*` crate.  It intentionally
//! has no `swarm-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                           |
//! |-------------|----------------------------------------------------|
//! | [`ids`]     | `AgentId`                                          |
//! | [`math`]    | `Vec2`, `Vec3`, `Quat`, `Pose`                     |
//! | [`world`]   | `WorldBounds` (hard position clamp)                |
//! | [`time`]    | `Tick`, `TickClock` (fixed-`dt` physics time)      |
//! | [`rng`]     | `AgentRng` (per-agent), `SimRng` (global)          |
//! | [`error`]   | `SwarmError`, `SwarmResult`                        |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod error;
pub mod ids;
pub mod math;
pub mod rng;
pub mod time;
pub mod world;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{SwarmError, SwarmResult};
pub use ids::AgentId;
pub use math::{Pose, Quat, Vec2, Vec3};
pub use rng::{AgentRng, SimRng};
pub use time::{Tick, TickClock};
pub use world::WorldBounds;
