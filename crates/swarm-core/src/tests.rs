//! Unit tests for swarm-core.

use crate::math::{Pose, Quat, Vec2, Vec3};
use crate::rng::{AgentRng, SimRng};
use crate::time::{Tick, TickClock};
use crate::world::WorldBounds;
use crate::AgentId;

const EPS: f64 = 1e-9;

// ── Vec2 ─────────────────────────────────────────────────────────────────────

mod vec2 {
    use super::*;

    #[test]
    fn arithmetic() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, -1.0);
        assert_eq!(a + b, Vec2::new(4.0, 1.0));
        assert_eq!(a - b, Vec2::new(-2.0, 3.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
        assert_eq!(b / 2.0, Vec2::new(1.5, -0.5));
        assert_eq!(-a, Vec2::new(-1.0, -2.0));
    }

    #[test]
    fn length_and_distance() {
        let v = Vec2::new(3.0, 4.0);
        assert!((v.length() - 5.0).abs() < EPS);
        assert!((v.length_sq() - 25.0).abs() < EPS);
        assert!((Vec2::ZERO.distance(v) - 5.0).abs() < EPS);
    }

    #[test]
    fn normalize_zero_is_zero() {
        assert_eq!(Vec2::ZERO.normalized_or_zero(), Vec2::ZERO);
        let unit = Vec2::new(0.0, -7.0).normalized_or_zero();
        assert!((unit.length() - 1.0).abs() < EPS);
        assert!((unit.y - -1.0).abs() < EPS);
    }

    #[test]
    fn clamped_length_caps_only_long_vectors() {
        let long = Vec2::new(6.0, 8.0).clamped_length(5.0);
        assert!((long.length() - 5.0).abs() < EPS);
        // Direction preserved.
        assert!((long.angle() - Vec2::new(6.0, 8.0).angle()).abs() < EPS);

        let short = Vec2::new(1.0, 1.0);
        assert_eq!(short.clamped_length(5.0), short);
    }

    #[test]
    fn angle_roundtrip() {
        for theta in [-2.5_f64, -0.3, 0.0, 1.1, 3.0] {
            let v = Vec2::from_angle(theta);
            assert!((v.angle() - theta).abs() < 1e-9);
        }
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, -4.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Vec2::new(5.0, -2.0));
    }
}

// ── Quat / Pose ──────────────────────────────────────────────────────────────

mod rotation {
    use super::*;

    #[test]
    fn yaw_quarter_turn_rotates_x_to_y() {
        let q = Quat::from_yaw(std::f64::consts::FRAC_PI_2);
        let v = q.rotate(Vec3::new(1.0, 0.0, 0.0));
        assert!(v.x.abs() < EPS);
        assert!((v.y - 1.0).abs() < EPS);
        assert!(v.z.abs() < EPS);
    }

    #[test]
    fn yaw_extraction_roundtrips() {
        for angle in [-1.2_f64, 0.0, 0.7, 2.9] {
            assert!((Quat::from_yaw(angle).yaw() - angle).abs() < EPS);
        }
    }

    #[test]
    fn identity_rotation_is_noop() {
        let v = Vec3::new(0.3, -2.0, 5.0);
        let r = Quat::IDENTITY.rotate(v);
        assert!((r - v).length() < EPS);
    }

    #[test]
    fn composed_yaws_add() {
        let q = Quat::from_yaw(0.4) * Quat::from_yaw(0.5);
        assert!((q.yaw() - 0.9).abs() < EPS);
    }

    #[test]
    fn pose_applies_heading_then_translation() {
        let pose = Pose::new(Vec2::new(10.0, 0.0), std::f64::consts::FRAC_PI_2);
        let world = pose.apply(Vec2::new(1.0, 0.0));
        assert!((world.x - 10.0).abs() < EPS);
        assert!((world.y - 1.0).abs() < EPS);
    }
}

// ── Tick / TickClock ─────────────────────────────────────────────────────────

mod time {
    use super::*;

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t.offset(5), Tick(15));
        assert_eq!(Tick(15).since(t), 5);
        assert_eq!(Tick(15) - t, 5);
        assert_eq!(t + 2, Tick(12));
    }

    #[test]
    fn clock_elapsed_matches_dt() {
        let mut clock = TickClock::new(1.0 / 30.0);
        for _ in 0..60 {
            clock.advance();
        }
        assert!((clock.elapsed_secs() - 2.0).abs() < EPS);
        assert!((clock.secs_since(Tick(30)) - 1.0).abs() < EPS);
    }

    #[test]
    fn ticks_for_secs_rounds_up() {
        let clock = TickClock::new(1.0 / 30.0);
        assert_eq!(clock.ticks_for_secs(1.0), 30);
        assert_eq!(clock.ticks_for_secs(0.01), 1);
    }
}

// ── WorldBounds ──────────────────────────────────────────────────────────────

mod world {
    use super::*;

    #[test]
    fn clamp_pins_to_edges() {
        let w = WorldBounds::new(100.0, 50.0);
        assert_eq!(w.clamp(Vec2::new(-5.0, 25.0)), Vec2::new(0.0, 25.0));
        assert_eq!(w.clamp(Vec2::new(120.0, 60.0)), Vec2::new(100.0, 50.0));
        let inside = Vec2::new(40.0, 10.0);
        assert_eq!(w.clamp(inside), inside);
    }

    #[test]
    fn random_points_stay_inside() {
        let w = WorldBounds::new(300.0, 200.0);
        let mut rng = SimRng::new(7);
        for _ in 0..200 {
            assert!(w.contains(w.random_point(&mut rng)));
        }
    }

    #[test]
    fn center_is_half_extent() {
        assert_eq!(WorldBounds::new(10.0, 6.0).center(), Vec2::new(5.0, 3.0));
    }
}

// ── RNG ──────────────────────────────────────────────────────────────────────

mod rng {
    use super::*;

    #[test]
    fn agent_rngs_are_deterministic_per_seed() {
        let mut a = AgentRng::new(42, AgentId(3));
        let mut b = AgentRng::new(42, AgentId(3));
        for _ in 0..10 {
            let x: f64 = a.gen_range(0.0..1.0);
            let y: f64 = b.gen_range(0.0..1.0);
            assert_eq!(x, y);
        }
    }

    #[test]
    fn different_agents_diverge() {
        let mut a = AgentRng::new(42, AgentId(0));
        let mut b = AgentRng::new(42, AgentId(1));
        let xs: Vec<f64> = (0..8).map(|_| a.gen_range(0.0..1.0)).collect();
        let ys: Vec<f64> = (0..8).map(|_| b.gen_range(0.0..1.0)).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn jitter_is_bounded_and_zero_for_nonpositive_magnitude() {
        let mut rng = AgentRng::new(1, AgentId(0));
        for _ in 0..100 {
            let j = rng.jitter(0.25);
            assert!(j.x.abs() <= 0.25 && j.y.abs() <= 0.25);
        }
        assert_eq!(rng.jitter(0.0), Vec2::ZERO);
    }

    #[test]
    fn sim_rng_children_differ_from_parent_stream() {
        let mut root = SimRng::new(99);
        let mut c1 = root.child(1);
        let mut c2 = root.child(2);
        let a: u64 = c1.random();
        let b: u64 = c2.random();
        assert_ne!(a, b);
    }
}
