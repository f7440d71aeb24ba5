//! `PhysicsDriver` — the dedicated physics thread and its handle.
//!
//! The driver owns the kernel exclusively: commands flow in over an mpsc
//! channel and are queued onto the kernel (taking effect at the next tick
//! boundary, per the kernel's atomicity rule); snapshots flow out through a
//! shared [`SnapshotSlot`].  No other mutable state crosses the boundary, so
//! the render side needs no locking beyond the slot's pointer swap.
//!
//! Cadence: the thread ticks once per `dt` of wall time, absorbing commands
//! while waiting for the deadline.  When a tick overruns its budget the
//! driver re-anchors to the present instead of bursting to catch up —
//! simulated time simply advances slower than wall time under overload.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use swarm_behavior::FormationPattern;
use swarm_core::{SwarmError, SwarmResult, Vec2};

use crate::command::Command;
use crate::config::SwarmMode;
use crate::kernel::SwarmKernel;
use crate::snapshot::{RenderSnapshot, SnapshotSlot};

enum DriverMsg {
    Command(Command),
    Shutdown,
}

// ── PhysicsDriver ─────────────────────────────────────────────────────────────

/// Spawner for the physics thread.
pub struct PhysicsDriver;

impl PhysicsDriver {
    /// Move `kernel` onto a dedicated thread ticking at its configured `dt`.
    ///
    /// Returns a [`KernelHandle`] for commands and snapshot reads.  The
    /// thread runs until [`KernelHandle::shutdown`] or until the handle is
    /// dropped (channel disconnect).
    pub fn spawn(kernel: SwarmKernel) -> SwarmResult<KernelHandle> {
        let (tx, rx) = mpsc::channel();
        let slot = Arc::new(SnapshotSlot::new());
        let thread_slot = Arc::clone(&slot);

        let join = thread::Builder::new()
            .name("swarm-physics".into())
            .spawn(move || drive(kernel, rx, thread_slot))
            .map_err(|_| SwarmError::Worker)?;

        Ok(KernelHandle { commands: tx, slot, join: Some(join) })
    }
}

/// The thread body: tick at a fixed cadence, absorbing commands in between.
fn drive(
    mut kernel: SwarmKernel,
    rx: Receiver<DriverMsg>,
    slot: Arc<SnapshotSlot>,
) -> SwarmKernel {
    let period = Duration::from_secs_f64(kernel.clock.dt_secs);
    log::debug!(
        "physics driver started: {} agents at {:.1} Hz",
        kernel.agents.count,
        1.0 / kernel.clock.dt_secs
    );

    let mut deadline = Instant::now() + period;
    loop {
        // Absorb commands until the tick deadline.
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            match rx.recv_timeout(timeout) {
                Ok(DriverMsg::Command(command)) => {
                    if let Err(e) = kernel.push_command(command) {
                        log::warn!("rejected command: {e}");
                    }
                }
                Ok(DriverMsg::Shutdown) => {
                    log::debug!("physics driver shutting down at {}", kernel.clock.current_tick);
                    return kernel;
                }
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => {
                    log::debug!("kernel handle dropped; stopping physics driver");
                    return kernel;
                }
            }
        }

        if let Err(e) = kernel.step() {
            log::error!("tick failed, stopping physics driver: {e}");
            return kernel;
        }
        slot.publish(kernel.snapshot());

        deadline += period;
        let now = Instant::now();
        if deadline < now {
            // Overran the budget: re-anchor rather than burst.
            deadline = now + period;
        }
    }
}

// ── KernelHandle ──────────────────────────────────────────────────────────────

/// Render-side handle to a running [`PhysicsDriver`] thread.
///
/// All command methods are fire-and-forget: they enqueue and return; the
/// kernel applies them at its next tick boundary.  Dropping the handle stops
/// the driver (the command channel disconnects); call [`shutdown`]
/// [`KernelHandle::shutdown`] instead to get the kernel back.
pub struct KernelHandle {
    commands: Sender<DriverMsg>,
    slot: Arc<SnapshotSlot>,
    join: Option<JoinHandle<SwarmKernel>>,
}

impl KernelHandle {
    /// Queue a new shared target.
    pub fn set_target(&self, target: Vec2) -> SwarmResult<()> {
        self.send(Command::SetTarget(target))
    }

    /// Queue a coordination-mode switch.
    pub fn set_mode(&self, mode: SwarmMode) -> SwarmResult<()> {
        self.send(Command::SetMode(mode))
    }

    /// Queue a formation-pattern switch.
    pub fn set_pattern(&self, pattern: FormationPattern) -> SwarmResult<()> {
        self.send(Command::SetPattern(pattern))
    }

    /// Queue a population resize.  A zero count is rejected here, before it
    /// ever reaches the physics thread.
    pub fn set_agent_count(&self, count: usize) -> SwarmResult<()> {
        if count == 0 {
            return Err(SwarmError::InvalidAgentCount(0));
        }
        self.send(Command::SetAgentCount(count))
    }

    /// The most recent snapshot the physics thread published, if any.
    pub fn latest(&self) -> Option<Arc<RenderSnapshot>> {
        self.slot.latest()
    }

    /// Stop the physics thread and recover the kernel.
    pub fn shutdown(mut self) -> SwarmResult<SwarmKernel> {
        // A send failure means the thread already exited; join still works.
        let _ = self.commands.send(DriverMsg::Shutdown);
        match self.join.take() {
            Some(join) => join.join().map_err(|_| SwarmError::Worker),
            None => Err(SwarmError::Worker),
        }
    }

    fn send(&self, command: Command) -> SwarmResult<()> {
        self.commands
            .send(DriverMsg::Command(command))
            .map_err(|_| SwarmError::Worker)
    }
}
