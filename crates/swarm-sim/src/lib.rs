//! `swarm-sim` — the fixed-rate simulation kernel and its driver thread.
//!
//! # Per-tick pipeline
//!
//! ```text
//! tick(now):
//!   ⓪ Commands  — drain the pending command queue (target / mode / pattern /
//!                 agent count); mode, pattern, and count changes rebuild the
//!                 population before any agent moves this tick.
//!   ① Neighbors — every `neighbor_refresh_ticks`, sync the spatial index and
//!                 rebuild the CSR neighbor graph at the communication radius.
//!   ② Produce   — evaluate the active SteeringModel for every non-reached
//!                 agent (parallel with the `parallel` feature).
//!   ③ Apply     — sequentially, in ascending AgentId order: fold force into
//!                 velocity, clamp speed, damp reached agents, integrate,
//!                 clamp to world bounds, replace opinions, drain energy.
//!   ④ Trails    — every `trail_stride_ticks`, sample each position into the
//!                 agent's trail ring buffer.
//!   ⑤ Arrivals  — mark agents within the target radius reached; when the
//!                 last one arrives, stop the timer and update the best time.
//! ```
//!
//! # Two independent loops
//!
//! The render loop never drives physics.  [`PhysicsDriver::spawn`] moves the
//! kernel onto a dedicated thread ticking at a fixed cadence; the render side
//! holds a [`KernelHandle`] and polls [`KernelHandle::latest`] for the most
//! recent [`RenderSnapshot`] — a latest-value-wins slot, never a queue.  For
//! headless or single-threaded use, call [`SwarmKernel::run_ticks`] directly.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                              |
//! |------------|-----------------------------------------------------|
//! | `parallel` | Runs the produce phase on Rayon's thread pool.      |
//! | `serde`    | Serialize/Deserialize on config and snapshot types. |

pub mod command;
pub mod config;
pub mod driver;
pub mod kernel;
pub mod observer;
pub mod snapshot;


pub use command::Command;
pub use config::{IndexKind, KernelConfig, SwarmMode};
pub use driver::{KernelHandle, PhysicsDriver};
pub use kernel::{RunState, SwarmKernel};
pub use observer::{KernelObserver, NoopObserver};
pub use snapshot::{AgentPose, Metrics, RenderSnapshot, SnapshotSlot, decode_flat};
