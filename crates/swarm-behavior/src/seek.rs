//! Seek — goal-directed steering toward the shared target (`Gather` mode).

use swarm_core::{AgentId, AgentRng};

use crate::model::{Steering, SteeringModel};
use crate::SteerContext;

/// Constant-magnitude acceleration toward the shared target, plus small
/// zero-mean jitter.
///
/// The jitter is an anti-degeneracy term: without it, agents spawned
/// collinear with the target stay collinear forever and stack on arrival.
/// Speed limiting is the kernel's job — Seek itself never clamps.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Seek {
    /// Force magnitude per tick.
    pub accel: f64,
    /// Jitter component bound (see [`AgentRng::jitter`]).
    pub jitter: f64,
}

impl Seek {
    pub fn new(accel: f64, jitter: f64) -> Self {
        Self { accel, jitter }
    }
}

impl Default for Seek {
    fn default() -> Self {
        Self { accel: 0.8, jitter: 0.15 }
    }
}

impl SteeringModel for Seek {
    fn evaluate(&self, agent: AgentId, ctx: &SteerContext<'_>, rng: &mut AgentRng) -> Steering {
        let to_target = (ctx.target - ctx.position(agent)).normalized_or_zero();
        Steering::force(to_target * self.accel + rng.jitter(self.jitter))
    }
}
