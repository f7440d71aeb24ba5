//! Common error type for the swarm kernel.
//!
//! Following the framework convention, sub-crates may use `SwarmError`
//! directly or wrap it as one variant of their own enum.  All configuration
//! problems are rejected at construction time — the tick loop itself has no
//! recoverable error states.

use thiserror::Error;

/// The top-level error type for `swarm-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum SwarmError {
    #[error("agent count must be at least 1 (got {0})")]
    InvalidAgentCount(usize),

    #[error("spatial index cell size must be positive and finite (got {0})")]
    InvalidCellSize(f64),

    #[error("unknown formation pattern {0:?}")]
    UnknownPattern(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("physics worker terminated abnormally")]
    Worker,
}

/// Shorthand result type for all `swarm-*` crates.
pub type SwarmResult<T> = Result<T, SwarmError>;
