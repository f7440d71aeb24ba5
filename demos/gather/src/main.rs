//! gather — the interactive swarm demo, run headless.
//!
//! 100 agents spawn scattered over a 1000×700 world and race to a sequence
//! of targets, first in `Gather` mode, then re-forming into a circle in
//! `Formation` mode.  Snapshots are recorded to `output/` as CSV every half
//! second of simulated time; completion times are printed as they happen.
//!
//! The interactive build drives the same kernel through `PhysicsDriver` and
//! reads `RenderSnapshot`s at the display refresh rate; everything this
//! binary exercises is identical below the input layer.

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use swarm_agent::AgentStore;
use swarm_behavior::FormationPattern;
use swarm_core::{Tick, Vec2};
use swarm_output::{CsvWriter, KernelOutputObserver, OutputWriter};
use swarm_sim::{KernelConfig, KernelObserver, Metrics, SwarmKernel, SwarmMode};

// ── Constants ─────────────────────────────────────────────────────────────────

const AGENT_COUNT: usize = 100;
const SEED: u64 = 42;
const TICKS_PER_PHASE: u64 = 1_500; // 50 s of simulated time at 30 Hz
const OUTPUT_INTERVAL_TICKS: u64 = 15; // snapshot every half second
const OUTPUT_DIR: &str = "output";

// ── Observer: CSV recording + console progress ────────────────────────────────

struct DemoObserver<W: OutputWriter> {
    inner: KernelOutputObserver<W>,
}

impl<W: OutputWriter> KernelObserver for DemoObserver<W> {
    fn on_all_reached(&mut self, tick: Tick, elapsed_secs: f64, new_best: bool) {
        let mark = if new_best { "  ← new best" } else { "" };
        println!("{tick}: all agents reached in {elapsed_secs:.2}s{mark}");
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &AgentStore, metrics: &Metrics) {
        self.inner.on_snapshot(tick, agents, metrics);
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let config = KernelConfig {
        agent_count: AGENT_COUNT,
        seed: SEED,
        output_interval_ticks: OUTPUT_INTERVAL_TICKS,
        ..KernelConfig::default()
    };
    let bounds = config.bounds;
    let mut kernel = SwarmKernel::new(config)?;

    fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut observer = DemoObserver { inner: KernelOutputObserver::new(writer) };

    let wall_start = Instant::now();

    // Phase 1: gather at the world center.
    println!("phase 1: {AGENT_COUNT} agents gathering at the center");
    kernel.set_target(bounds.center());
    kernel.run_ticks(TICKS_PER_PHASE, &mut observer)?;

    // Phase 2: re-form as a circle around a corner target.
    println!("phase 2: circle formation in the upper-left quadrant");
    kernel.set_mode(SwarmMode::Formation);
    kernel.set_pattern(FormationPattern::Circle);
    kernel.set_target(Vec2::new(bounds.width * 0.25, bounds.height * 0.25));
    kernel.run_ticks(TICKS_PER_PHASE, &mut observer)?;

    observer.inner.finish();
    if let Some(e) = observer.inner.take_error() {
        eprintln!("output error: {e}");
    }

    let metrics = kernel.metrics();
    println!(
        "done: {} simulated ticks in {:.2}s wall time",
        kernel.clock.current_tick.0,
        wall_start.elapsed().as_secs_f64()
    );
    println!(
        "reached {}/{}, best completion {}",
        kernel.agents.reached_count(),
        kernel.agents.count,
        metrics
            .best_secs
            .map(|b| format!("{b:.2}s"))
            .unwrap_or_else(|| "n/a".into())
    );
    println!("snapshots written to {OUTPUT_DIR}/");
    Ok(())
}
