//! Unit tests for swarm-behavior.

use swarm_agent::{AgentRngs, AgentStore, AgentStoreBuilder, OPINION_DIM};
use swarm_core::{AgentId, SwarmError, Tick, Vec2};
use swarm_spatial::{NeighborGraph, SpatialIndex, UniformGrid};

use crate::consensus::Consensus;
use crate::context::SteerContext;
use crate::flocking::Flocking;
use crate::formation::{Formation, FormationMap};
use crate::model::SteeringModel;
use crate::pattern::FormationPattern;
use crate::seek::Seek;

const DT: f64 = 1.0 / 30.0;

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Store with explicit positions, zero velocities, default everything else.
fn store_at(positions: &[Vec2]) -> (AgentStore, AgentRngs) {
    let (mut store, rngs) = AgentStoreBuilder::new(positions.len(), 42)
        .build()
        .expect("non-empty population");
    store.positions.copy_from_slice(positions);
    (store, rngs)
}

/// Neighbor graph over `positions` at `radius`.
fn graph_at(positions: &[Vec2], radius: f64) -> NeighborGraph {
    let mut grid = UniformGrid::new(radius.max(1.0)).expect("valid cell size");
    grid.sync(positions);
    let mut graph = NeighborGraph::new();
    graph.rebuild(&grid, positions, radius);
    graph
}

fn ctx<'a>(
    target: Vec2,
    store: &'a AgentStore,
    graph: &'a NeighborGraph,
) -> SteerContext<'a> {
    SteerContext::new(Tick::ZERO, DT, target, store, graph)
}

// ── Seek ─────────────────────────────────────────────────────────────────────

mod seek {
    use super::*;

    #[test]
    fn force_points_at_target_with_fixed_magnitude() {
        let positions = [Vec2::new(100.0, 100.0)];
        let (store, mut rngs) = store_at(&positions);
        let graph = graph_at(&positions, 80.0);
        let c = ctx(Vec2::new(200.0, 100.0), &store, &graph);

        let seek = Seek::new(1.5, 0.0); // jitter off for exactness
        let s = seek.evaluate(AgentId(0), &c, rngs.get_mut(AgentId(0)));
        assert!(s.opinion.is_none());
        assert!((s.force.x - 1.5).abs() < 1e-12);
        assert!(s.force.y.abs() < 1e-12);
    }

    #[test]
    fn at_target_force_is_zero() {
        let target = Vec2::new(50.0, 50.0);
        let positions = [target];
        let (store, mut rngs) = store_at(&positions);
        let graph = graph_at(&positions, 80.0);
        let c = ctx(target, &store, &graph);

        let s = Seek::new(1.0, 0.0).evaluate(AgentId(0), &c, rngs.get_mut(AgentId(0)));
        assert_eq!(s.force, Vec2::ZERO);
    }

    #[test]
    fn jitter_stays_within_bounds() {
        let positions = [Vec2::new(0.0, 0.0)];
        let (store, mut rngs) = store_at(&positions);
        let graph = graph_at(&positions, 80.0);
        let c = ctx(Vec2::new(100.0, 0.0), &store, &graph);

        let seek = Seek::new(1.0, 0.2);
        for _ in 0..100 {
            let s = seek.evaluate(AgentId(0), &c, rngs.get_mut(AgentId(0)));
            assert!((s.force.x - 1.0).abs() <= 0.2 + 1e-12);
            assert!(s.force.y.abs() <= 0.2 + 1e-12);
        }
    }
}

// ── Flocking ─────────────────────────────────────────────────────────────────

mod flocking {
    use super::*;

    #[test]
    fn isolated_pair_reduces_to_pure_seek() {
        // Two agents 200 units apart, communication radius 80: both isolated.
        let positions = [Vec2::new(100.0, 100.0), Vec2::new(300.0, 100.0)];
        let (store, mut rngs) = store_at(&positions);
        let graph = graph_at(&positions, 80.0);
        let target = Vec2::new(200.0, 400.0);
        let c = ctx(target, &store, &graph);

        assert!(graph.neighbors(AgentId(0)).is_empty());
        assert!(graph.neighbors(AgentId(1)).is_empty());

        let flocking = Flocking {
            seek: Seek::new(1.0, 0.0),
            ..Flocking::default()
        };
        for agent in [AgentId(0), AgentId(1)] {
            let got = flocking.evaluate(agent, &c, rngs.get_mut(agent));
            let expected = (target - positions[agent.index()]).normalized_or_zero();
            assert!((got.force - expected).length() < 1e-12);
        }
    }

    #[test]
    fn separation_pushes_close_agents_apart() {
        // Two agents 10 units apart (inside r_sep), target far to the side so
        // the seek term is perpendicular to the separation axis.
        let positions = [Vec2::new(100.0, 100.0), Vec2::new(110.0, 100.0)];
        let (store, mut rngs) = store_at(&positions);
        let graph = graph_at(&positions, 80.0);
        let c = ctx(Vec2::new(105.0, 500.0), &store, &graph);

        let flocking = Flocking {
            seek: Seek::new(0.0, 0.0), // isolate the flocking terms
            ..Flocking::default()
        };
        let left = flocking.evaluate(AgentId(0), &c, rngs.get_mut(AgentId(0)));
        let right = flocking.evaluate(AgentId(1), &c, rngs.get_mut(AgentId(1)));
        // Separation dominates cohesion at this distance with default weights.
        assert!(left.force.x < 0.0, "left agent pushed further left");
        assert!(right.force.x > 0.0, "right agent pushed further right");
    }

    #[test]
    fn cohesion_pulls_toward_distant_neighbor() {
        // 60 units apart: outside r_sep (25) and r_align (50), inside
        // r_cohere (80) — only cohesion fires.
        let positions = [Vec2::new(100.0, 100.0), Vec2::new(160.0, 100.0)];
        let (store, mut rngs) = store_at(&positions);
        let graph = graph_at(&positions, 80.0);
        let c = ctx(Vec2::new(130.0, 100.0), &store, &graph);

        let flocking = Flocking {
            seek: Seek::new(0.0, 0.0),
            ..Flocking::default()
        };
        let s = flocking.evaluate(AgentId(0), &c, rngs.get_mut(AgentId(0)));
        assert!(s.force.x > 0.0, "pulled toward the neighbor centroid");
        assert!(s.force.y.abs() < 1e-9);
    }

    #[test]
    fn alignment_matches_neighbor_velocity_difference() {
        let positions = [Vec2::new(100.0, 100.0), Vec2::new(130.0, 100.0)];
        let (mut store, mut rngs) = store_at(&positions);
        store.velocities[1] = Vec2::new(0.0, 2.0);
        let graph = graph_at(&positions, 80.0);
        let c = ctx(Vec2::new(115.0, 100.0), &store, &graph);

        let flocking = Flocking {
            seek: Seek::new(0.0, 0.0),
            w_sep: 0.0,
            w_cohere: 0.0,
            ..Flocking::default()
        };
        let s = flocking.evaluate(AgentId(0), &c, rngs.get_mut(AgentId(0)));
        // Only alignment: force = (v_other - v_self) * w_align = (0, 2).
        assert!((s.force - Vec2::new(0.0, 2.0)).length() < 1e-12);
    }
}

// ── Consensus ────────────────────────────────────────────────────────────────

mod consensus {
    use super::*;

    fn fully_connected(n: usize) -> Vec<Vec2> {
        // All within 80 of each other.
        (0..n).map(|i| Vec2::new(100.0 + i as f64 * 10.0, 100.0)).collect()
    }

    #[test]
    fn zero_neighbors_leaves_opinion_untouched() {
        let positions = [Vec2::new(0.0, 0.0), Vec2::new(500.0, 500.0)];
        let (store, mut rngs) = store_at(&positions);
        let graph = graph_at(&positions, 80.0);
        let c = ctx(Vec2::new(250.0, 250.0), &store, &graph);

        let s = Consensus::default().evaluate(AgentId(0), &c, rngs.get_mut(AgentId(0)));
        assert!(s.opinion.is_none());
        // Motion still happens.
        assert!(s.force.length() > 0.0);
    }

    #[test]
    fn opinions_stay_inside_initial_hull_extended_by_target() {
        let positions = fully_connected(6);
        let (mut store, mut rngs) = store_at(&positions);
        let graph = graph_at(&positions, 80.0);
        let model = Consensus::default();

        let lo: Vec<f64> = (0..OPINION_DIM)
            .map(|k| {
                store.opinions.iter().map(|o| o[k]).fold(f64::INFINITY, f64::min)
                    .min(model.target_opinion[k])
            })
            .collect();
        let hi: Vec<f64> = (0..OPINION_DIM)
            .map(|k| {
                store.opinions.iter().map(|o| o[k]).fold(f64::NEG_INFINITY, f64::max)
                    .max(model.target_opinion[k])
            })
            .collect();

        for _ in 0..200 {
            let c = ctx(Vec2::new(130.0, 100.0), &store, &graph);
            let updates: Vec<Option<[f64; OPINION_DIM]>> = (0..store.count)
                .map(|i| {
                    let a = AgentId(i as u32);
                    model.evaluate(a, &c, rngs.get_mut(a)).opinion
                })
                .collect();
            drop(c);
            for (i, up) in updates.into_iter().enumerate() {
                if let Some(o) = up {
                    store.opinions[i] = o;
                }
            }
            for o in &store.opinions {
                for k in 0..OPINION_DIM {
                    assert!(o[k] >= lo[k] - 1e-9 && o[k] <= hi[k] + 1e-9);
                }
            }
        }
    }

    #[test]
    fn connected_graph_converges_to_target_opinion() {
        let positions = fully_connected(5);
        let (mut store, mut rngs) = store_at(&positions);
        let graph = graph_at(&positions, 80.0);
        let model = Consensus::default();

        for _ in 0..400 {
            let c = ctx(Vec2::new(120.0, 100.0), &store, &graph);
            let updates: Vec<Option<[f64; OPINION_DIM]>> = (0..store.count)
                .map(|i| {
                    let a = AgentId(i as u32);
                    model.evaluate(a, &c, rngs.get_mut(a)).opinion
                })
                .collect();
            drop(c);
            for (i, up) in updates.into_iter().enumerate() {
                if let Some(o) = up {
                    store.opinions[i] = o;
                }
            }
        }

        for o in &store.opinions {
            for k in 0..OPINION_DIM {
                assert!(
                    (o[k] - model.target_opinion[k]).abs() < 1e-6,
                    "opinion component {k} did not converge: {}",
                    o[k]
                );
            }
        }
    }
}

// ── Formation patterns ───────────────────────────────────────────────────────

mod pattern {
    use super::*;

    #[test]
    fn every_pattern_emits_one_offset_per_agent() {
        for p in [
            FormationPattern::Circle,
            FormationPattern::Line,
            FormationPattern::Grid,
            FormationPattern::Vee,
        ] {
            for n in [1, 2, 7, 30] {
                assert_eq!(p.generate(n, 40.0).len(), n, "{p} with {n} agents");
            }
        }
    }

    #[test]
    fn line_is_centered_with_exact_spacing() {
        let offsets = FormationPattern::Line.generate(4, 40.0);
        assert_eq!(offsets[0], Vec2::new(-60.0, 0.0));
        assert_eq!(offsets[3], Vec2::new(60.0, 0.0));
        for pair in offsets.windows(2) {
            assert!((pair[0].distance(pair[1]) - 40.0).abs() < 1e-9);
        }
        let centroid = offsets.iter().fold(Vec2::ZERO, |a, &b| a + b) / 4.0;
        assert!(centroid.length() < 1e-9);
    }

    #[test]
    fn circle_offsets_share_a_radius() {
        let offsets = FormationPattern::Circle.generate(12, 40.0);
        let r = offsets[0].length();
        assert!(r > 0.0);
        for o in &offsets {
            assert!((o.length() - r).abs() < 1e-9);
        }
        // Adjacent agents sit ~spacing apart along the arc (chord ≤ arc).
        let chord = offsets[0].distance(offsets[1]);
        assert!(chord <= 40.0 + 1e-9 && chord > 30.0);
    }

    #[test]
    fn grid_rows_are_row_major_and_spaced() {
        let offsets = FormationPattern::Grid.generate(9, 40.0);
        // 3×3 grid: first row shares y, columns 40 apart.
        assert!((offsets[0].y - offsets[2].y).abs() < 1e-9);
        assert!((offsets[1].x - offsets[0].x - 40.0).abs() < 1e-9);
        assert!((offsets[3].y - offsets[0].y - 40.0).abs() < 1e-9);
    }

    #[test]
    fn vee_nose_leads_two_symmetric_arms() {
        let offsets = FormationPattern::Vee.generate(5, 40.0);
        assert_eq!(offsets[0], Vec2::ZERO);
        // Pairs flank symmetrically.
        assert!((offsets[1].x + offsets[2].x).abs() < 1e-9);
        assert!((offsets[1].y - offsets[2].y).abs() < 1e-9);
        // Arms trail behind the nose.
        assert!(offsets[1].y > 0.0);
        assert!(offsets[3].y > offsets[1].y);
    }

    #[test]
    fn parse_roundtrip_and_unknown_rejection() {
        for p in [
            FormationPattern::Circle,
            FormationPattern::Line,
            FormationPattern::Grid,
            FormationPattern::Vee,
        ] {
            assert_eq!(p.to_string().parse::<FormationPattern>().unwrap(), p);
        }
        assert_eq!("V".parse::<FormationPattern>().unwrap(), FormationPattern::Vee);
        let err = "spiral".parse::<FormationPattern>().unwrap_err();
        assert!(matches!(err, SwarmError::UnknownPattern(name) if name == "spiral"));
    }
}

// ── Formation control ────────────────────────────────────────────────────────

mod formation {
    use super::*;

    #[test]
    fn map_target_is_anchor_plus_offset() {
        let map = FormationMap::generate(FormationPattern::Line, 3, 40.0);
        let anchor = Vec2::new(500.0, 300.0);
        assert_eq!(map.target_for(AgentId(0), anchor), Vec2::new(460.0, 300.0));
        assert_eq!(map.target_for(AgentId(1), anchor), anchor);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn pd_law_converges_to_slot_without_sustained_oscillation() {
        // Single-agent closed loop: v += force; p += v.  Default gains must
        // pull the error under a demo-scale target radius quickly.
        let map = FormationMap::generate(FormationPattern::Line, 1, 40.0);
        let model = Formation::with_default_gains(map);
        let anchor = Vec2::new(300.0, 200.0);

        let positions = [Vec2::new(80.0, 90.0)];
        let (mut store, mut rngs) = store_at(&positions);
        let graph = graph_at(&positions, 80.0);

        let initial_error = store.positions[0].distance(anchor);
        let mut final_error = f64::INFINITY;
        for _ in 0..200 {
            let c = ctx(anchor, &store, &graph);
            let s = model.evaluate(AgentId(0), &c, rngs.get_mut(AgentId(0)));
            drop(c);
            store.velocities[0] += s.force;
            store.velocities[0] = store.velocities[0].clamped_length(5.0);
            let v = store.velocities[0];
            store.positions[0] += v;
            final_error = store.positions[0].distance(anchor);
        }
        assert!(final_error < 12.0, "error {final_error} after 200 ticks");
        assert!(final_error < initial_error * 0.05);
    }

    #[test]
    fn derivative_term_opposes_velocity() {
        let map = FormationMap::generate(FormationPattern::Line, 1, 40.0);
        let model = Formation::new(0.0, 1.0, map); // kp off: pure damping
        let positions = [Vec2::new(100.0, 100.0)];
        let (mut store, mut rngs) = store_at(&positions);
        store.velocities[0] = Vec2::new(3.0, -2.0);
        let graph = graph_at(&positions, 80.0);
        let c = ctx(Vec2::new(100.0, 100.0), &store, &graph);

        let s = model.evaluate(AgentId(0), &c, rngs.get_mut(AgentId(0)));
        assert!((s.force - Vec2::new(-3.0, 2.0)).length() < 1e-12);
    }
}
