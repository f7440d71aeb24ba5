//! Formation — per-agent offset tracking around a moving virtual anchor.
//!
//! Each agent's individual target is `anchor + offset[agent]`, with the
//! shared target acting as the anchor.  The steering law is
//! proportional-derivative control toward that individual target:
//!
//! ```text
//! force = kp · (individual_target − position) − kd · velocity
//! ```
//!
//! The derivative term damps approach velocity, so agents settle into their
//! slots without overshoot oscillation for reasonable gain ranges.  The
//! gains are tuned constants, not derived — expose and adjust, don't trust.

use swarm_core::{AgentId, AgentRng, Vec2};

use crate::model::{Steering, SteeringModel};
use crate::pattern::FormationPattern;
use crate::SteerContext;

// ── FormationMap ──────────────────────────────────────────────────────────────

/// Immutable-per-configuration mapping from agent index to target offset.
///
/// Rebuilt whenever the agent count or active pattern changes; never mutated
/// in between.
#[derive(Clone, Debug)]
pub struct FormationMap {
    pattern: FormationPattern,
    offsets: Vec<Vec2>,
}

impl FormationMap {
    /// Generate the map for `count` agents at the given `spacing`.
    pub fn generate(pattern: FormationPattern, count: usize, spacing: f64) -> Self {
        Self {
            pattern,
            offsets: pattern.generate(count, spacing),
        }
    }

    #[inline]
    pub fn pattern(&self) -> FormationPattern {
        self.pattern
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Offset of one agent relative to the anchor.
    #[inline]
    pub fn offset(&self, agent: AgentId) -> Vec2 {
        self.offsets[agent.index()]
    }

    /// The agent's individual target for a given anchor position.
    #[inline]
    pub fn target_for(&self, agent: AgentId, anchor: Vec2) -> Vec2 {
        anchor + self.offset(agent)
    }
}

// ── Formation ─────────────────────────────────────────────────────────────────

/// PD tracking of a per-agent formation slot.
#[derive(Clone, Debug)]
pub struct Formation {
    /// Proportional gain.
    pub kp: f64,
    /// Derivative (damping) gain.
    pub kd: f64,
    pub map: FormationMap,
}

impl Formation {
    pub fn new(kp: f64, kd: f64, map: FormationMap) -> Self {
        Self { kp, kd, map }
    }

    /// Default gains (kp = 0.3, kd = 0.5) for the given map.
    pub fn with_default_gains(map: FormationMap) -> Self {
        Self::new(0.3, 0.5, map)
    }
}

impl SteeringModel for Formation {
    fn evaluate(&self, agent: AgentId, ctx: &SteerContext<'_>, _rng: &mut AgentRng) -> Steering {
        let slot = self.map.target_for(agent, ctx.target);
        let error = slot - ctx.position(agent);
        Steering::force(error * self.kp - ctx.velocity(agent) * self.kd)
    }
}
