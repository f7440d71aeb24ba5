//! Formation pattern generators.
//!
//! A pattern is a pure function `(agent_count, spacing) → offsets`: one
//! target offset per agent, relative to the formation anchor.  Offsets are
//! centered so the anchor sits at the formation's centroid (the V nose sits
//! on the anchor — centering a V looks wrong).

use std::fmt;
use std::str::FromStr;

use swarm_core::{SwarmError, Vec2};

/// The shape a `Formation`-mode swarm assembles into.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FormationPattern {
    /// Evenly spaced around a circle whose circumference fits all agents.
    Circle,
    /// A horizontal line, centered on the anchor.
    Line,
    /// A near-square grid, row-major, centered on the anchor.
    Grid,
    /// A V (two trailing arms), nose at the anchor.
    Vee,
}

impl FormationPattern {
    /// Generate one offset per agent.
    ///
    /// `spacing` is the nearest-neighbor distance within the pattern; the
    /// generated offsets are deterministic for a given `(count, spacing)`.
    pub fn generate(self, count: usize, spacing: f64) -> Vec<Vec2> {
        match self {
            FormationPattern::Circle => circle(count, spacing),
            FormationPattern::Line => line(count, spacing),
            FormationPattern::Grid => grid(count, spacing),
            FormationPattern::Vee => vee(count, spacing),
        }
    }
}

impl FromStr for FormationPattern {
    type Err = SwarmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "circle" => Ok(FormationPattern::Circle),
            "line" => Ok(FormationPattern::Line),
            "grid" => Ok(FormationPattern::Grid),
            "vee" | "v" => Ok(FormationPattern::Vee),
            other => Err(SwarmError::UnknownPattern(other.to_string())),
        }
    }
}

impl fmt::Display for FormationPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FormationPattern::Circle => "circle",
            FormationPattern::Line => "line",
            FormationPattern::Grid => "grid",
            FormationPattern::Vee => "vee",
        };
        f.write_str(s)
    }
}

// ── Generators ────────────────────────────────────────────────────────────────

fn circle(count: usize, spacing: f64) -> Vec<Vec2> {
    // Radius chosen so adjacent agents sit ~spacing apart along the arc.
    let radius = (spacing * count as f64) / (2.0 * std::f64::consts::PI);
    let step = 2.0 * std::f64::consts::PI / count as f64;
    (0..count)
        .map(|i| Vec2::from_angle(i as f64 * step) * radius)
        .collect()
}

fn line(count: usize, spacing: f64) -> Vec<Vec2> {
    let half = (count as f64 - 1.0) * 0.5;
    (0..count)
        .map(|i| Vec2::new((i as f64 - half) * spacing, 0.0))
        .collect()
}

fn grid(count: usize, spacing: f64) -> Vec<Vec2> {
    let cols = (count as f64).sqrt().ceil() as usize;
    let rows = count.div_ceil(cols);
    let half_x = (cols as f64 - 1.0) * 0.5;
    let half_y = (rows as f64 - 1.0) * 0.5;
    (0..count)
        .map(|i| {
            let col = i % cols;
            let row = i / cols;
            Vec2::new(
                (col as f64 - half_x) * spacing,
                (row as f64 - half_y) * spacing,
            )
        })
        .collect()
}

fn vee(count: usize, spacing: f64) -> Vec<Vec2> {
    // Agent 0 is the nose; the rest alternate onto the two trailing arms
    // at 45° behind it.
    let arm = spacing * std::f64::consts::FRAC_1_SQRT_2;
    (0..count)
        .map(|i| {
            if i == 0 {
                Vec2::ZERO
            } else {
                let rank = i.div_ceil(2) as f64;
                let side = if i % 2 == 1 { -1.0 } else { 1.0 };
                Vec2::new(side * rank * arm, rank * arm)
            }
        })
        .collect()
}
