//! Runtime reconfiguration commands.
//!
//! Commands are queued (from any thread, via [`KernelHandle`][crate::KernelHandle],
//! or directly on the kernel) and drained atomically at the start of the next
//! tick, so a tick never observes a half-applied configuration.  Mode,
//! pattern, and agent-count changes discard the old population; a target
//! change does not.

use swarm_behavior::FormationPattern;
use swarm_core::Vec2;

use crate::config::SwarmMode;

/// A reconfiguration request, applied at the next tick boundary.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    /// Set a new shared target: clears every `reached` flag and restarts the
    /// completion timer.
    SetTarget(Vec2),
    /// Switch the coordination strategy (rebuilds the population).
    SetMode(SwarmMode),
    /// Switch the formation shape (rebuilds the population).
    SetPattern(FormationPattern),
    /// Resize the population (rebuilds it; preserves the best time).
    SetAgentCount(usize),
}
