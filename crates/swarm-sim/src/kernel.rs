//! The `SwarmKernel` struct and its tick loop.

use swarm_agent::{AgentRngs, AgentStore, AgentStoreBuilder};
use swarm_behavior::{
    Formation, FormationMap, FormationPattern, SteerContext, Steering, SteeringModel,
};
use swarm_core::{AgentId, SimRng, SwarmError, SwarmResult, Tick, TickClock, Vec2};
use swarm_spatial::{NeighborGraph, RStarIndex, SpatialIndex, UniformGrid};

use crate::command::Command;
use crate::config::{IndexKind, KernelConfig, SwarmMode};
use crate::observer::{KernelObserver, NoopObserver};
use crate::snapshot::{Metrics, RenderSnapshot};

// ── RunState ──────────────────────────────────────────────────────────────────

/// Global kernel state machine.
///
/// ```text
/// Idle ──SetTarget──▶ Running ──last agent arrives──▶ AllReached
///                        ▲                                │
///                        └────────────SetTarget───────────┘
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RunState {
    /// No target has been set; agents hold position.
    Idle,
    /// A target is active and the completion timer is running.
    Running,
    /// Every agent is within the target radius; the timer is stopped.
    AllReached,
}

// ── SwarmKernel ───────────────────────────────────────────────────────────────

/// The simulation kernel: exclusive owner of all agent state.
///
/// The kernel drives the five-phase tick pipeline (see the crate docs) at a
/// fixed `dt`.  Everything mutable — the agent store, the spatial index, the
/// neighbor graph — is owned here; external collaborators interact only
/// through queued [`Command`]s and read-only [`RenderSnapshot`]s.
///
/// Create via [`SwarmKernel::new`]; run headless via [`run_ticks`]
/// [`SwarmKernel::run_ticks`] or threaded via
/// [`PhysicsDriver::spawn`][crate::PhysicsDriver::spawn].
pub struct SwarmKernel {
    /// Active configuration.  Mutated only by the command drain.
    pub config: KernelConfig,

    /// Fixed-`dt` physics clock.
    pub clock: TickClock,

    /// SoA agent state, rebuilt on mode / pattern / count changes.
    pub agents: AgentStore,

    /// Per-agent deterministic RNGs, separated for the split-borrow pattern.
    pub rngs: AgentRngs,

    /// Broad-phase spatial index (backend per `config.index`).
    index: Box<dyn SpatialIndex>,

    /// CSR neighbor adjacency, rebuilt every `neighbor_refresh_ticks`.
    graph: NeighborGraph,

    /// Formation slot map + PD law, regenerated with the population.
    formation: Formation,

    /// The shared target; `None` until the first `SetTarget`.
    target: Option<Vec2>,

    state: RunState,
    /// Tick the current run started at (meaningful while `Running`).
    run_started: Tick,
    /// Elapsed seconds frozen at the moment of completion.
    frozen_elapsed: f64,
    best_secs: Option<f64>,

    /// Commands queued for the next tick boundary.
    pending: Vec<Command>,

    /// Simulation-level RNG; derives a fresh spawn seed per rebuild.
    sim_rng: SimRng,

    /// Produce-phase output, reused across ticks.
    steering: Vec<Steering>,
}

impl std::fmt::Debug for SwarmKernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwarmKernel").finish_non_exhaustive()
    }
}

impl SwarmKernel {
    // ── Construction ──────────────────────────────────────────────────────

    /// Validate `config` and build a ready-to-tick kernel.
    pub fn new(config: KernelConfig) -> SwarmResult<Self> {
        config.validate()?;

        let mut sim_rng = SimRng::new(config.seed);
        let (agents, rngs) = spawn_population(&config, &mut sim_rng)?;

        let mut index = make_index(config.index)?;
        index.sync(&agents.positions);
        let mut graph = NeighborGraph::new();
        graph.rebuild(index.as_ref(), &agents.positions, config.comm_radius);

        let formation = make_formation(&config);

        Ok(Self {
            clock: TickClock::new(config.dt_secs),
            agents,
            rngs,
            index,
            graph,
            formation,
            target: None,
            state: RunState::Idle,
            run_started: Tick::ZERO,
            frozen_elapsed: 0.0,
            best_secs: None,
            pending: Vec::new(),
            sim_rng,
            steering: Vec::new(),
            config,
        })
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Queue a command for the next tick boundary.
    ///
    /// Payload validation happens here, so the tick loop itself never
    /// rejects a command.
    pub fn push_command(&mut self, command: Command) -> SwarmResult<()> {
        if let Command::SetAgentCount(0) = command {
            return Err(SwarmError::InvalidAgentCount(0));
        }
        self.pending.push(command);
        Ok(())
    }

    /// Queue a new shared target (gather point / formation anchor).
    pub fn set_target(&mut self, target: Vec2) {
        self.pending.push(Command::SetTarget(target));
    }

    /// Queue a mode switch.
    pub fn set_mode(&mut self, mode: SwarmMode) {
        self.pending.push(Command::SetMode(mode));
    }

    /// Queue a formation pattern switch.
    pub fn set_pattern(&mut self, pattern: FormationPattern) {
        self.pending.push(Command::SetPattern(pattern));
    }

    /// Queue a population resize.  Rejects a zero count immediately.
    pub fn set_agent_count(&mut self, count: usize) -> SwarmResult<()> {
        self.push_command(Command::SetAgentCount(count))
    }

    // ── Read-only accessors ───────────────────────────────────────────────

    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }

    #[inline]
    pub fn target(&self) -> Option<Vec2> {
        self.target
    }

    /// Simulated seconds since the current run started.
    ///
    /// 0 while idle; frozen at its final value after completion.
    pub fn elapsed_secs(&self) -> f64 {
        match self.state {
            RunState::Idle => 0.0,
            RunState::Running => self.clock.secs_since(self.run_started),
            RunState::AllReached => self.frozen_elapsed,
        }
    }

    #[inline]
    pub fn best_secs(&self) -> Option<f64> {
        self.best_secs
    }

    /// The neighbor graph as of the last refresh.
    #[inline]
    pub fn graph(&self) -> &NeighborGraph {
        &self.graph
    }

    /// The effective per-agent target: the formation slot in `Formation`
    /// mode, the shared target otherwise.
    pub fn effective_target(&self, agent: AgentId, shared: Vec2) -> Vec2 {
        match self.config.mode {
            SwarmMode::Formation => self.formation.map.target_for(agent, shared),
            _ => shared,
        }
    }

    /// Seed the best time from the out-of-scope persistence layer.
    ///
    /// Keeps the better of the stored and the supplied value, so loading
    /// after a completed run never regresses the record.
    pub fn preload_best(&mut self, secs: f64) {
        self.best_secs = Some(match self.best_secs {
            Some(best) => best.min(secs),
            None => secs,
        });
    }

    /// Aggregate metrics for the current tick.
    pub fn metrics(&self) -> Metrics {
        let n = self.agents.count as f64;
        let mean_opinion0 =
            self.agents.opinions.iter().map(|o| o[0]).sum::<f64>() / n;
        Metrics {
            elapsed_secs: self.elapsed_secs(),
            best_secs: self.best_secs,
            mean_neighbors: self.graph.mean_degree(),
            mean_opinion0,
        }
    }

    /// Capture an immutable render snapshot of the current state.
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(
            self.clock.current_tick,
            self.config.mode,
            self.state,
            self.target,
            self.metrics(),
            &self.agents,
        )
    }

    // ── Tick loop ─────────────────────────────────────────────────────────

    /// Run exactly `n` ticks, invoking observer hooks at every boundary.
    pub fn run_ticks<O: KernelObserver>(
        &mut self,
        n: u64,
        observer: &mut O,
    ) -> SwarmResult<()> {
        for _ in 0..n {
            let now = self.clock.current_tick;
            observer.on_tick_start(now);
            let completion = self.process_tick(now)?;
            observer.on_tick_end(now, self.state);
            if let Some((elapsed, new_best)) = completion {
                observer.on_all_reached(now, elapsed, new_best);
            }
            if self.config.output_interval_ticks > 0
                && now.0.is_multiple_of(self.config.output_interval_ticks)
            {
                let metrics = self.metrics();
                observer.on_snapshot(now, &self.agents, &metrics);
            }
            self.clock.advance();
        }
        Ok(())
    }

    /// Advance one tick without observer callbacks.
    pub fn step(&mut self) -> SwarmResult<()> {
        self.run_ticks(1, &mut NoopObserver)
    }

    /// One full tick.  Returns `(elapsed_secs, new_best)` on the tick the
    /// last agent arrives.
    fn process_tick(&mut self, now: Tick) -> SwarmResult<Option<(f64, bool)>> {
        // ── Phase 0: drain commands ───────────────────────────────────────
        self.drain_commands()?;

        // ── Phase 1: neighbor refresh ─────────────────────────────────────
        //
        // The index is reconciled lazily here — refresh time is its only
        // read point, so per-tick membership updates would be wasted work.
        if now.0.is_multiple_of(self.config.neighbor_refresh_ticks) {
            self.refresh_neighbors();
        }

        // ── Phases 2-3: steer and integrate (only with an active target) ──
        if let Some(target) = self.target {
            self.produce_steering(now, target);
            self.apply_steering();
        }

        // ── Phase 4: trail sampling ───────────────────────────────────────
        if now.0.is_multiple_of(self.config.trail_stride_ticks) {
            for i in 0..self.agents.count {
                let p = self.agents.positions[i];
                self.agents.trails[i].push(p);
            }
        }

        // ── Phase 5: arrival detection and the run-state machine ──────────
        match self.target {
            Some(target) => Ok(self.detect_arrivals(target)),
            None => Ok(None),
        }
    }

    fn drain_commands(&mut self) -> SwarmResult<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let pending = std::mem::take(&mut self.pending);
        for command in pending {
            match command {
                Command::SetTarget(target) => self.begin_run(target),
                Command::SetMode(mode) => {
                    if mode != self.config.mode {
                        self.config.mode = mode;
                        self.rebuild_population()?;
                    }
                }
                Command::SetPattern(pattern) => {
                    if pattern != self.config.pattern {
                        self.config.pattern = pattern;
                        self.rebuild_population()?;
                    }
                }
                Command::SetAgentCount(count) => {
                    if count != self.config.agent_count {
                        self.config.agent_count = count;
                        self.rebuild_population()?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Start (or restart) a run toward `target`.
    fn begin_run(&mut self, target: Vec2) {
        self.target = Some(target);
        self.agents.reached.fill(false);
        self.state = RunState::Running;
        self.run_started = self.clock.current_tick;
        self.frozen_elapsed = 0.0;
        log::debug!(
            "run started at {} toward ({:.0}, {:.0})",
            self.clock.current_tick,
            target.x,
            target.y
        );
    }

    /// Discard the population and rebuild it for the current configuration.
    ///
    /// The best time survives; the elapsed timer resets.  An active target
    /// stays active — the fresh population immediately starts a new run
    /// toward it.
    fn rebuild_population(&mut self) -> SwarmResult<()> {
        let (agents, rngs) = spawn_population(&self.config, &mut self.sim_rng)?;
        self.agents = agents;
        self.rngs = rngs;
        self.index = make_index(self.config.index)?;
        self.formation = make_formation(&self.config);
        self.steering.clear();
        self.refresh_neighbors();

        self.frozen_elapsed = 0.0;
        match self.target {
            Some(_) => {
                self.state = RunState::Running;
                self.run_started = self.clock.current_tick;
            }
            None => self.state = RunState::Idle,
        }
        log::debug!(
            "population rebuilt: {} agents, mode {}, pattern {}",
            self.config.agent_count,
            self.config.mode,
            self.config.pattern
        );
        Ok(())
    }

    fn refresh_neighbors(&mut self) {
        self.index.sync(&self.agents.positions);
        self.graph.rebuild(
            self.index.as_ref(),
            &self.agents.positions,
            self.config.comm_radius,
        );
    }

    /// Produce phase: evaluate the active strategy for every non-reached
    /// agent into `self.steering`.  Reached agents contribute no force.
    fn produce_steering(&mut self, now: Tick, target: Vec2) {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let agents = &self.agents;
        let graph = &self.graph;
        let rngs = &mut self.rngs;
        let model: &dyn SteeringModel = match self.config.mode {
            SwarmMode::Gather => &self.config.seek,
            SwarmMode::Flocking => &self.config.flocking,
            SwarmMode::Consensus => &self.config.consensus,
            SwarmMode::Formation => &self.formation,
        };

        let ctx = SteerContext::new(now, self.clock.dt_secs, target, agents, graph);
        let reached = agents.reached.as_slice();

        #[cfg(not(feature = "parallel"))]
        {
            self.steering.clear();
            self.steering
                .extend(rngs.inner.iter_mut().enumerate().map(|(i, rng)| {
                    if reached[i] {
                        Steering::NONE
                    } else {
                        model.evaluate(AgentId(i as u32), &ctx, rng)
                    }
                }));
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            rngs.inner
                .par_iter_mut()
                .enumerate()
                .map(|(i, rng)| {
                    if reached[i] {
                        Steering::NONE
                    } else {
                        model.evaluate(AgentId(i as u32), &ctx, rng)
                    }
                })
                .collect_into_vec(&mut self.steering);
        }
    }

    /// Apply phase: sequential, ascending `AgentId`, so results are
    /// deterministic even when the produce phase ran in parallel.
    fn apply_steering(&mut self) {
        let max_speed = self.config.max_speed;
        let damping = self.config.reached_damping;
        let drain = self.config.energy_drain;
        let bounds = self.config.bounds;

        for i in 0..self.agents.count {
            let delta = self.steering[i];

            let v = &mut self.agents.velocities[i];
            *v = (*v + delta.force).clamped_length(max_speed);
            if self.agents.reached[i] {
                // Decay rather than hard-stop, to avoid visual snapping.
                *v = *v * damping;
            }
            let velocity = *v;

            self.agents.positions[i] =
                bounds.clamp(self.agents.positions[i] + velocity);

            if let Some(opinion) = delta.opinion {
                self.agents.opinions[i] = opinion;
            }

            let speed = velocity.length();
            if speed > 0.0 {
                let energy = &mut self.agents.energy[i];
                *energy -= drain * speed;
                if *energy <= 0.0 {
                    *energy = 100.0;
                }
            }
        }
    }

    /// Arrival detection and the `Running → AllReached` transition.
    fn detect_arrivals(&mut self, target: Vec2) -> Option<(f64, bool)> {
        let radius = self.config.target_radius;
        for i in 0..self.agents.count {
            if self.agents.reached[i] {
                continue;
            }
            let agent = AgentId(i as u32);
            let goal = self.effective_target(agent, target);
            if self.agents.positions[i].distance(goal) < radius {
                self.agents.reached[i] = true;
                self.agents.velocities[i] =
                    self.agents.velocities[i] * self.config.reached_damping;
            }
        }

        if self.state == RunState::Running && self.agents.all_reached() {
            self.state = RunState::AllReached;
            let elapsed = self.clock.secs_since(self.run_started);
            self.frozen_elapsed = elapsed;
            let new_best = self.best_secs.is_none_or(|best| elapsed < best);
            if new_best {
                self.best_secs = Some(elapsed);
            }
            log::debug!(
                "all {} agents reached in {elapsed:.2}s{}",
                self.agents.count,
                if new_best { " (new best)" } else { "" }
            );
            return Some((elapsed, new_best));
        }
        None
    }
}

// ── Construction helpers ──────────────────────────────────────────────────────

/// Build a fresh store + RNGs; each call draws a new spawn seed so repeated
/// rebuilds scatter agents differently while staying reproducible from the
/// configured global seed.
fn spawn_population(
    config: &KernelConfig,
    sim_rng: &mut SimRng,
) -> SwarmResult<(AgentStore, AgentRngs)> {
    let spawn_seed: u64 = sim_rng.random();
    AgentStoreBuilder::new(config.agent_count, spawn_seed)
        .bounds(config.bounds)
        .trail_capacity(config.trail_capacity)
        .build()
}

fn make_index(kind: IndexKind) -> SwarmResult<Box<dyn SpatialIndex>> {
    Ok(match kind {
        IndexKind::Grid { cell_size } => Box::new(UniformGrid::new(cell_size)?),
        IndexKind::RTree => Box::new(RStarIndex::new()),
    })
}

fn make_formation(config: &KernelConfig) -> Formation {
    Formation::new(
        config.formation_kp,
        config.formation_kd,
        FormationMap::generate(
            config.pattern,
            config.agent_count,
            config.formation_spacing,
        ),
    )
}
