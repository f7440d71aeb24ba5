//! Plain data row types written by output backends.

use swarm_agent::Role;

/// A snapshot of one agent's pose and diagnostics at a given tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub agent_id: u32,
    pub tick: u64,
    pub x: f64,
    pub y: f64,
    pub role: Role,
    pub reached: bool,
    /// First opinion component (the one the demo HUD charts).
    pub opinion0: f64,
    pub energy: f64,
}

/// Aggregate metrics for one snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick: u64,
    pub elapsed_secs: f64,
    /// `NaN`-free: absent best times are written as an empty field.
    pub best_secs: Option<f64>,
    pub reached_count: usize,
    pub mean_neighbors: f64,
    pub mean_opinion0: f64,
}
