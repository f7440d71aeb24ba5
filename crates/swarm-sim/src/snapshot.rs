//! Read-only render interface: snapshots, metrics, and the publication slot.
//!
//! The renderer never touches the kernel.  Once per physics tick the driver
//! captures a [`RenderSnapshot`] (an owned copy of everything a renderer
//! needs) and publishes it into a [`SnapshotSlot`]; the render loop reads the
//! latest one at its own cadence.  Latest-value-wins: an unread snapshot is
//! overwritten, never queued, so a slow consumer can never back-pressure the
//! physics thread.
//!
//! For the worker wire boundary there is additionally a flat `f32` encoding
//! of poses — three values `(x, y, reached)` per agent, indexed by agent id —
//! with a length fixed by the agent count and known in advance.

use std::sync::{Arc, Mutex, PoisonError};

use swarm_agent::{AgentStore, OPINION_DIM, Role};
use swarm_core::{AgentId, SwarmError, SwarmResult, Tick, Vec2};

use crate::config::SwarmMode;
use crate::kernel::RunState;

// ── Metrics ───────────────────────────────────────────────────────────────────

/// Aggregate per-tick readouts for the telemetry consumer.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metrics {
    /// Simulated seconds since the current run started (0 when idle; frozen
    /// at completion).
    pub elapsed_secs: f64,
    /// Best completion time seen so far, if any run has completed.
    pub best_secs: Option<f64>,
    /// Mean neighbor count over the population at the last refresh.
    pub mean_neighbors: f64,
    /// Mean of the first opinion component over the population.
    pub mean_opinion0: f64,
}

// ── AgentPose ─────────────────────────────────────────────────────────────────

/// One agent's full render state, copied out of the store.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentPose {
    pub id: AgentId,
    pub position: Vec2,
    pub velocity: Vec2,
    pub role: Role,
    pub reached: bool,
    pub opinion: [f64; OPINION_DIM],
    pub energy: f64,
    /// Sampled recent positions, oldest first.
    pub trail: Vec<Vec2>,
}

// ── RenderSnapshot ────────────────────────────────────────────────────────────

/// An immutable copy of the simulation state at one tick.
///
/// Captured by [`SwarmKernel::snapshot`][crate::SwarmKernel::snapshot].
/// The copy is deliberate: the renderer holds this across frames while the
/// kernel keeps mutating its own store.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderSnapshot {
    pub tick: Tick,
    pub mode: SwarmMode,
    pub state: RunState,
    pub target: Option<Vec2>,
    pub metrics: Metrics,
    pub agents: Vec<AgentPose>,
}

impl RenderSnapshot {
    pub(crate) fn capture(
        tick: Tick,
        mode: SwarmMode,
        state: RunState,
        target: Option<Vec2>,
        metrics: Metrics,
        store: &AgentStore,
    ) -> Self {
        let agents = store
            .agent_ids()
            .map(|id| {
                let i = id.index();
                AgentPose {
                    id,
                    position: store.positions[i],
                    velocity: store.velocities[i],
                    role: store.roles[i],
                    reached: store.reached[i],
                    opinion: store.opinions[i],
                    energy: store.energy[i],
                    trail: store.trails[i].iter().collect(),
                }
            })
            .collect();
        Self { tick, mode, state, target, metrics, agents }
    }

    /// Encode poses as the flat worker wire format: `(x, y, reached)` per
    /// agent as `f32`, length `3 × agent_count`.
    pub fn to_flat(&self) -> Vec<f32> {
        let mut buf = Vec::with_capacity(self.agents.len() * 3);
        for pose in &self.agents {
            buf.push(pose.position.x as f32);
            buf.push(pose.position.y as f32);
            buf.push(if pose.reached { 1.0 } else { 0.0 });
        }
        buf
    }
}

/// Decode a flat wire buffer back into `(position, reached)` pairs.
///
/// The buffer length must be a multiple of 3; entry order is agent id order.
pub fn decode_flat(buf: &[f32]) -> SwarmResult<Vec<(Vec2, bool)>> {
    if !buf.len().is_multiple_of(3) {
        return Err(SwarmError::Config(format!(
            "flat snapshot length {} is not a multiple of 3",
            buf.len()
        )));
    }
    Ok(buf
        .chunks_exact(3)
        .map(|c| (Vec2::new(c[0] as f64, c[1] as f64), c[2] != 0.0))
        .collect())
}

// ── SnapshotSlot ──────────────────────────────────────────────────────────────

/// Latest-value-wins snapshot mailbox between the physics thread and the
/// render side.
///
/// The mutex guards a single `Arc` pointer; both `publish` and `latest` hold
/// it only for a pointer swap or clone, never across computation, so
/// contention is negligible at any realistic frame rate.
#[derive(Default)]
pub struct SnapshotSlot {
    latest: Mutex<Option<Arc<RenderSnapshot>>>,
}

impl SnapshotSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored snapshot.  An unread predecessor is dropped.
    pub fn publish(&self, snapshot: RenderSnapshot) {
        let mut slot = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(Arc::new(snapshot));
    }

    /// The most recently published snapshot, if any.  Non-consuming: repeated
    /// calls between publishes return the same `Arc`.
    pub fn latest(&self) -> Option<Arc<RenderSnapshot>> {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
