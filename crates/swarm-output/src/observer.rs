//! `KernelOutputObserver<W>` — bridges `KernelObserver` to an `OutputWriter`.

use swarm_agent::AgentStore;
use swarm_core::Tick;
use swarm_sim::{KernelObserver, Metrics};

use crate::OutputError;
use crate::row::{AgentSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;

/// A [`KernelObserver`] that records agent snapshots and tick summaries to
/// any [`OutputWriter`] backend.
///
/// Recording follows the kernel's `output_interval_ticks` cadence — the
/// observer writes whenever `on_snapshot` fires and is silent otherwise.
///
/// Errors from the writer are stored internally because observer methods have
/// no return value.  After the run, call [`finish`][Self::finish] and check
/// [`take_error`][Self::take_error].
pub struct KernelOutputObserver<W: OutputWriter> {
    writer: W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> KernelOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Flush the backend.  Call once after the run completes.
    pub fn finish(&mut self) {
        let result = self.writer.finish();
        self.store_err(result);
    }

    /// Take the stored write error (if any) after the run.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> KernelObserver for KernelOutputObserver<W> {
    fn on_snapshot(&mut self, tick: Tick, agents: &AgentStore, metrics: &Metrics) {
        let rows: Vec<AgentSnapshotRow> = (0..agents.count)
            .map(|i| AgentSnapshotRow {
                agent_id: i as u32,
                tick: tick.0,
                x: agents.positions[i].x,
                y: agents.positions[i].y,
                role: agents.roles[i],
                reached: agents.reached[i],
                opinion0: agents.opinions[i][0],
                energy: agents.energy[i],
            })
            .collect();
        let result = self.writer.write_snapshots(&rows);
        self.store_err(result);

        let summary = TickSummaryRow {
            tick: tick.0,
            elapsed_secs: metrics.elapsed_secs,
            best_secs: metrics.best_secs,
            reached_count: agents.reached_count(),
            mean_neighbors: metrics.mean_neighbors,
            mean_opinion0: metrics.mean_opinion0,
        };
        let result = self.writer.write_tick_summary(&summary);
        self.store_err(result);
    }
}
