//! Flocking — classic Reynolds separation/alignment/cohesion steering.
//!
//! The three terms are computed over concentric radii
//! `r_sep < r_align < r_cohere`, weighted independently, and added on top of
//! the Seek force so flocking shapes the motion but never fully overrides
//! goal-directed travel.  With zero neighbors the whole model degrades to
//! pure Seek.
//!
//! Neighbor candidates come from the shared neighbor graph (built at the
//! communication radius); each rule re-checks its own tighter radius.

use swarm_core::{AgentId, AgentRng, Vec2};

use crate::model::{Steering, SteeringModel};
use crate::seek::Seek;
use crate::SteerContext;

/// Reynolds flocking layered over [`Seek`].
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Flocking {
    /// Separation radius (innermost).
    pub r_sep: f64,
    /// Alignment radius.
    pub r_align: f64,
    /// Cohesion radius (outermost; at most the communication radius, since
    /// the neighbor graph cannot see further).
    pub r_cohere: f64,

    /// Separation weight — conventionally the largest, so personal space
    /// wins over group pull.
    pub w_sep: f64,
    pub w_align: f64,
    pub w_cohere: f64,

    /// The underlying goal-directed term.
    pub seek: Seek,
}

impl Flocking {
    pub fn new(seek: Seek) -> Self {
        Self { seek, ..Self::default() }
    }

    /// The raw flocking force (without the Seek term) for one agent.
    fn flock_force(&self, agent: AgentId, ctx: &SteerContext<'_>) -> Vec2 {
        let pos = ctx.position(agent);
        let vel = ctx.velocity(agent);

        let mut separation = Vec2::ZERO;
        let mut alignment = Vec2::ZERO;
        let mut centroid = Vec2::ZERO;
        let mut cohere_count = 0usize;

        for &other in ctx.neighbors(agent) {
            let other_pos = ctx.position(other);
            let offset = pos - other_pos;
            let dist = offset.length();

            if dist < self.r_sep && dist > 1e-9 {
                // Repulsion inversely weighted by distance: closer → stronger.
                separation += offset / (dist * dist);
            }
            if dist < self.r_align {
                alignment += ctx.velocity(other) - vel;
            }
            if dist < self.r_cohere {
                centroid += other_pos;
                cohere_count += 1;
            }
        }

        let mut force = separation * self.w_sep + alignment * self.w_align;
        if cohere_count > 0 {
            let toward_centroid = centroid / cohere_count as f64 - pos;
            force += toward_centroid.normalized_or_zero() * self.w_cohere;
        }
        force
    }
}

impl Default for Flocking {
    fn default() -> Self {
        Self {
            r_sep: 25.0,
            r_align: 50.0,
            r_cohere: 80.0,
            w_sep: 2.0,
            w_align: 1.0,
            w_cohere: 1.0,
            seek: Seek::default(),
        }
    }
}

impl SteeringModel for Flocking {
    fn evaluate(&self, agent: AgentId, ctx: &SteerContext<'_>, rng: &mut AgentRng) -> Steering {
        let seek = self.seek.evaluate(agent, ctx, rng);
        if ctx.neighbors(agent).is_empty() {
            // Isolated agent: pure Seek.
            return seek;
        }
        Steering::force(seek.force + self.flock_force(agent, ctx))
    }
}
