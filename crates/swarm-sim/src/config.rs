//! Kernel configuration: coordination mode, index backend, tuning constants.
//!
//! Every tuning constant the tick loop consumes lives here, with defaults
//! matching the interactive demo.  Gains and damping factors are tuned by
//! trial, not derived; treat them as knobs.  Validation happens once, in
//! [`KernelConfig::validate`] — the tick loop itself never rejects state.

use std::fmt;
use std::str::FromStr;

use swarm_behavior::{Consensus, Flocking, FormationPattern, Seek};
use swarm_core::{SwarmError, SwarmResult, WorldBounds};

// ── SwarmMode ─────────────────────────────────────────────────────────────────

/// Which coordination strategy the kernel evaluates each tick.
///
/// Process-wide configuration, changeable at runtime via
/// [`Command::SetMode`][crate::Command::SetMode].  Changing the mode rebuilds
/// the agent population.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SwarmMode {
    /// Pure goal-directed seeking.
    #[default]
    Gather,
    /// Reynolds flocking layered over seeking.
    Flocking,
    /// Gossip opinion averaging layered over seeking.
    Consensus,
    /// PD tracking of per-agent formation slots around the target.
    Formation,
}

impl FromStr for SwarmMode {
    type Err = SwarmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gather" => Ok(SwarmMode::Gather),
            "flocking" => Ok(SwarmMode::Flocking),
            "consensus" => Ok(SwarmMode::Consensus),
            "formation" => Ok(SwarmMode::Formation),
            other => Err(SwarmError::Config(format!("unknown swarm mode {other:?}"))),
        }
    }
}

impl fmt::Display for SwarmMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SwarmMode::Gather => "gather",
            SwarmMode::Flocking => "flocking",
            SwarmMode::Consensus => "consensus",
            SwarmMode::Formation => "formation",
        };
        f.write_str(s)
    }
}

// ── IndexKind ─────────────────────────────────────────────────────────────────

/// Spatial index backend selection.
///
/// Both backends satisfy the same broad-phase contract; the choice is a
/// throughput trade-off, not a semantic one.  The grid relocates agents
/// incrementally and suits the default density; the R*-tree bulk-rebuilds
/// on each neighbor refresh and wins at high agent counts.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum IndexKind {
    Grid { cell_size: f64 },
    RTree,
}

impl Default for IndexKind {
    fn default() -> Self {
        IndexKind::Grid { cell_size: 100.0 }
    }
}

// ── KernelConfig ──────────────────────────────────────────────────────────────

/// Full kernel configuration.
///
/// | Group      | Fields                                                    |
/// |------------|-----------------------------------------------------------|
/// | Population | `agent_count`, `seed`, `bounds`                           |
/// | Timing     | `dt_secs`, `neighbor_refresh_ticks`, `trail_stride_ticks` |
/// | Motion     | `max_speed`, `target_radius`, `reached_damping`           |
/// | Coordination | `mode`, `comm_radius`, `seek`, `flocking`, `consensus`  |
/// | Formation  | `pattern`, `formation_spacing`, `formation_kp`/`_kd`      |
/// | Diagnostics | `trail_capacity`, `energy_drain`, `output_interval_ticks` |
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KernelConfig {
    /// Number of agents.  Must be ≥ 1.
    pub agent_count: usize,
    /// Global RNG seed; fixes spawn positions and all per-agent jitter.
    pub seed: u64,
    /// World rectangle agents are clamped into.
    pub bounds: WorldBounds,

    /// Simulated seconds per physics tick (default 1/30).
    pub dt_secs: f64,
    /// Rebuild the neighbor graph every this many ticks.
    pub neighbor_refresh_ticks: u64,
    /// Sample each agent's trail every this many ticks.
    pub trail_stride_ticks: u64,
    /// Trail ring-buffer capacity per agent.
    pub trail_capacity: usize,

    /// Speed clamp in world units per tick.
    pub max_speed: f64,
    /// Arrival radius around the effective target.
    pub target_radius: f64,
    /// Per-tick velocity multiplier for reached agents (< 1).
    pub reached_damping: f64,
    /// Energy drained per unit of speed per tick (wraps to 100 at zero).
    pub energy_drain: f64,

    /// Active coordination strategy.
    pub mode: SwarmMode,
    /// Neighbor graph radius — the communication range.
    pub comm_radius: f64,
    /// Spatial index backend.
    pub index: IndexKind,

    /// Seek tuning (used standalone in `Gather`, embedded elsewhere).
    pub seek: Seek,
    /// Flocking tuning (`Flocking` mode).
    pub flocking: Flocking,
    /// Consensus tuning (`Consensus` mode).
    pub consensus: Consensus,

    /// Active formation shape (`Formation` mode).
    pub pattern: FormationPattern,
    /// Nearest-neighbor distance inside the formation.
    pub formation_spacing: f64,
    /// Formation PD proportional gain.
    pub formation_kp: f64,
    /// Formation PD derivative gain.
    pub formation_kd: f64,

    /// Observer snapshot cadence in ticks (0 disables `on_snapshot`).
    pub output_interval_ticks: u64,
}

impl KernelConfig {
    /// Reject a configuration the tick loop could not run with.
    ///
    /// Called by [`SwarmKernel::new`][crate::SwarmKernel::new]; malformed
    /// input surfaces here, never mid-loop.
    pub fn validate(&self) -> SwarmResult<()> {
        if self.agent_count == 0 {
            return Err(SwarmError::InvalidAgentCount(0));
        }
        if let IndexKind::Grid { cell_size } = self.index
            && !(cell_size.is_finite() && cell_size > 0.0)
        {
            return Err(SwarmError::InvalidCellSize(cell_size));
        }
        if !(self.dt_secs.is_finite() && self.dt_secs > 0.0) {
            return Err(SwarmError::Config(format!(
                "tick duration must be positive (got {})",
                self.dt_secs
            )));
        }
        if self.max_speed <= 0.0 {
            return Err(SwarmError::Config(format!(
                "max speed must be positive (got {})",
                self.max_speed
            )));
        }
        if self.comm_radius <= 0.0 {
            return Err(SwarmError::Config(format!(
                "communication radius must be positive (got {})",
                self.comm_radius
            )));
        }
        if self.neighbor_refresh_ticks == 0 {
            return Err(SwarmError::Config(
                "neighbor refresh period must be at least 1 tick".into(),
            ));
        }
        if self.trail_stride_ticks == 0 {
            return Err(SwarmError::Config(
                "trail stride must be at least 1 tick".into(),
            ));
        }
        Ok(())
    }
}

impl Default for KernelConfig {
    /// The interactive-demo defaults: 100 agents at 30 Hz in a 1000×700 world.
    fn default() -> Self {
        Self {
            agent_count: 100,
            seed: 0,
            bounds: WorldBounds::default(),

            dt_secs: 1.0 / 30.0,
            neighbor_refresh_ticks: 3,
            trail_stride_ticks: 5,
            trail_capacity: 24,

            max_speed: 5.0,
            target_radius: 12.0,
            reached_damping: 0.9,
            energy_drain: 0.15,

            mode: SwarmMode::Gather,
            comm_radius: 80.0,
            index: IndexKind::default(),

            seek: Seek::default(),
            flocking: Flocking::default(),
            consensus: Consensus::default(),

            pattern: FormationPattern::Circle,
            formation_spacing: 40.0,
            formation_kp: 0.3,
            formation_kd: 0.5,

            output_interval_ticks: 0,
        }
    }
}
