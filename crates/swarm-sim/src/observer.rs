//! Kernel observer trait for progress reporting and data collection.

use swarm_agent::AgentStore;
use swarm_core::Tick;

use crate::kernel::RunState;
use crate::snapshot::Metrics;

/// Callbacks invoked by [`SwarmKernel::run_ticks`][crate::SwarmKernel::run_ticks]
/// at key points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — completion printer
///
/// ```rust,ignore
/// struct CompletionPrinter;
///
/// impl KernelObserver for CompletionPrinter {
///     fn on_all_reached(&mut self, tick: Tick, elapsed_secs: f64, new_best: bool) {
///         let mark = if new_best { " (best!)" } else { "" };
///         println!("{tick}: swarm gathered in {elapsed_secs:.2}s{mark}");
///     }
/// }
/// ```
pub trait KernelObserver {
    /// Called at the very start of each tick, before commands are drained.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick with the kernel's run state.
    fn on_tick_end(&mut self, _tick: Tick, _state: RunState) {}

    /// Called on the tick the last agent arrives.
    ///
    /// `new_best` is `true` when `elapsed_secs` improved the recorded best.
    fn on_all_reached(&mut self, _tick: Tick, _elapsed_secs: f64, _new_best: bool) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks; never when that is 0).
    ///
    /// Provides read-only access to the full agent state so output writers
    /// can record a snapshot without the kernel knowing any output format.
    fn on_snapshot(&mut self, _tick: Tick, _agents: &AgentStore, _metrics: &Metrics) {}
}

/// A [`KernelObserver`] that does nothing.  Use when you need to call
/// `run_ticks` but don't want progress callbacks.
pub struct NoopObserver;

impl KernelObserver for NoopObserver {}
