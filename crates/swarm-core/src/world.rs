//! World bounds and the hard position clamp.
//!
//! The world is an axis-aligned rectangle with the origin at the top-left
//! corner, matching the demo canvas coordinate convention.  Every agent
//! position is clamped into bounds after integration — agents never escape,
//! they stop at the wall.

use crate::math::Vec2;
use crate::rng::SimRng;

/// An axis-aligned world rectangle `[0, width] × [0, height]`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldBounds {
    pub width: f64,
    pub height: f64,
}

impl WorldBounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }

    /// Clamp `p` into bounds component-wise.
    #[inline]
    pub fn clamp(self, p: Vec2) -> Vec2 {
        Vec2::new(p.x.clamp(0.0, self.width), p.y.clamp(0.0, self.height))
    }

    /// Uniformly distributed point inside the bounds.
    pub fn random_point(self, rng: &mut SimRng) -> Vec2 {
        Vec2::new(
            rng.gen_range(0.0..=self.width),
            rng.gen_range(0.0..=self.height),
        )
    }
}

impl Default for WorldBounds {
    /// The demo canvas default: 1000 × 700 world units.
    fn default() -> Self {
        Self { width: 1000.0, height: 700.0 }
    }
}
