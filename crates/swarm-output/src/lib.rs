//! `swarm-output` — CSV recording of simulation runs.
//!
//! Two files are created in the configured output directory:
//!
//! | File                  | One row per…                        |
//! |-----------------------|-------------------------------------|
//! | `agent_snapshots.csv` | agent, per snapshot tick            |
//! | `tick_summaries.csv`  | snapshot tick (aggregate metrics)   |
//!
//! The writer is driven by [`KernelOutputObserver`], which implements
//! `swarm_sim::KernelObserver` and records at the kernel's configured
//! `output_interval_ticks` cadence.
//!
//! # Usage
//!
//! ```rust,ignore
//! use swarm_output::{CsvWriter, KernelOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = KernelOutputObserver::new(writer);
//! kernel.run_ticks(3000, &mut obs)?;
//! obs.finish();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::KernelOutputObserver;
pub use row::{AgentSnapshotRow, TickSummaryRow};
pub use writer::OutputWriter;
