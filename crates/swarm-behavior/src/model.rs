//! The `SteeringModel` trait and the `Steering` delta it produces.

use swarm_agent::OPINION_DIM;
use swarm_core::{AgentId, AgentRng, Vec2};

use crate::SteerContext;

// ── Steering ──────────────────────────────────────────────────────────────────

/// The per-agent, per-tick output of a steering model.
///
/// `force` is folded into the agent's velocity by the kernel's apply phase
/// (then speed-clamped); `opinion`, when present, replaces the agent's
/// opinion vector.  Only Consensus produces opinions — every other strategy
/// leaves the field `None`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Steering {
    /// Acceleration to add to the velocity this tick (world units/tick²).
    pub force: Vec2,
    /// Replacement opinion vector, if the strategy updated one.
    pub opinion: Option<[f64; OPINION_DIM]>,
}

impl Steering {
    /// No force, no opinion change — what a reached agent "does".
    pub const NONE: Steering = Steering { force: Vec2::ZERO, opinion: None };

    #[inline]
    pub fn force(force: Vec2) -> Self {
        Self { force, opinion: None }
    }

    #[inline]
    pub fn with_opinion(force: Vec2, opinion: [f64; OPINION_DIM]) -> Self {
        Self { force, opinion: Some(opinion) }
    }
}

impl Default for Steering {
    fn default() -> Self {
        Steering::NONE
    }
}

// ── SteeringModel ─────────────────────────────────────────────────────────────

/// Pluggable coordination strategy.
///
/// Implementations consume one agent's view of the world and produce a
/// [`Steering`] delta.  All methods receive a read-only [`SteerContext`] and
/// a mutable per-agent [`AgentRng`] so behavior is deterministic regardless
/// of thread ordering.
///
/// # Thread safety
///
/// The kernel may evaluate many agents in parallel via Rayon, so
/// implementations must be `Send + Sync`.  State that varies per agent must
/// live in `AgentStore` (accessed read-only through `ctx.agents`), not in
/// the model itself — models hold only tuning constants.
pub trait SteeringModel: Send + Sync + 'static {
    /// Evaluate the strategy for one agent.
    ///
    /// Must not observe any other agent's post-integration state; the
    /// context guarantees a consistent pre-tick view.
    fn evaluate(
        &self,
        agent: AgentId,
        ctx: &SteerContext<'_>,
        rng: &mut AgentRng,
    ) -> Steering;
}
