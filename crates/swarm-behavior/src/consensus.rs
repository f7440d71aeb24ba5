//! Consensus — synchronous gossip averaging of opinion vectors.
//!
//! Each tick, an agent's new opinion is a convex combination of the mean
//! opinion over its neighborhood (itself included) and a fixed global target
//! vector:
//!
//! ```text
//! opinion' = α · mean(neighbors ∪ {self}) + (1 − α) · target_opinion
//! ```
//!
//! Because every term is a convex combination of existing values and the
//! target, each component stays inside the hull of the initial opinions and
//! the target — the protocol cannot diverge.  Convergence *to* the target is
//! guaranteed only while the communication graph stays connected over time;
//! the protocol is memoryless, so no stale neighbor data is ever consulted.
//!
//! The strategy also carries a [`Seek`] force: opinion averaging runs on top
//! of normal goal-directed motion (which, usefully, keeps the graph
//! connected as agents gather).  With zero neighbors the opinion is left
//! untouched.

use swarm_agent::OPINION_DIM;
use swarm_core::{AgentId, AgentRng};

use crate::model::{Steering, SteeringModel};
use crate::seek::Seek;
use crate::SteerContext;

/// Gossip averaging toward `target_opinion` over the live neighbor graph.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Consensus {
    /// Damping constant in `(0, 1)`: weight of the local mean versus the
    /// pull toward the global target vector.
    pub alpha: f64,
    /// The fixed vector all opinions drift toward while the graph is
    /// connected.
    pub target_opinion: [f64; OPINION_DIM],
    /// Goal-directed motion underneath the averaging.
    pub seek: Seek,
}

impl Consensus {
    pub fn new(alpha: f64, target_opinion: [f64; OPINION_DIM], seek: Seek) -> Self {
        Self { alpha, target_opinion, seek }
    }
}

impl Default for Consensus {
    fn default() -> Self {
        Self {
            alpha: 0.85,
            target_opinion: [0.5; OPINION_DIM],
            seek: Seek::default(),
        }
    }
}

impl SteeringModel for Consensus {
    fn evaluate(&self, agent: AgentId, ctx: &SteerContext<'_>, rng: &mut AgentRng) -> Steering {
        let seek = self.seek.evaluate(agent, ctx, rng);

        let neighbors = ctx.neighbors(agent);
        if neighbors.is_empty() {
            // Nobody to average with: opinion stays put, motion continues.
            return seek;
        }

        let own = ctx.agents.opinions[agent.index()];
        let mut sum = own;
        for &other in neighbors {
            let theirs = ctx.agents.opinions[other.index()];
            for k in 0..OPINION_DIM {
                sum[k] += theirs[k];
            }
        }

        let inv = 1.0 / (neighbors.len() + 1) as f64;
        let mut next = [0.0; OPINION_DIM];
        for k in 0..OPINION_DIM {
            let mean = sum[k] * inv;
            next[k] = self.alpha * mean + (1.0 - self.alpha) * self.target_opinion[k];
        }

        Steering::with_opinion(seek.force, next)
    }
}
