//! Integration tests for swarm-output.

use std::fs;

use swarm_sim::{KernelConfig, SwarmKernel};

use crate::{CsvWriter, KernelOutputObserver, OutputWriter};

fn recorded_kernel(agent_count: usize, output_interval_ticks: u64) -> SwarmKernel {
    let config = KernelConfig {
        agent_count,
        seed: 42,
        output_interval_ticks,
        ..KernelConfig::default()
    };
    SwarmKernel::new(config).expect("valid test config")
}

mod csv_tests {
    use super::*;

    #[test]
    fn creates_both_files_with_headers() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = CsvWriter::new(dir.path()).unwrap();
        writer.finish().unwrap();

        let snapshots = fs::read_to_string(dir.path().join("agent_snapshots.csv")).unwrap();
        assert!(snapshots.starts_with("agent_id,tick,x,y,role,reached,opinion0,energy"));

        let summaries = fs::read_to_string(dir.path().join("tick_summaries.csv")).unwrap();
        assert!(summaries.starts_with(
            "tick,elapsed_secs,best_secs,reached_count,mean_neighbors,mean_opinion0"
        ));
    }

    #[test]
    fn missing_directory_errors_at_open() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        assert!(CsvWriter::new(&missing).is_err());
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = CsvWriter::new(dir.path()).unwrap();
        writer.finish().unwrap();
        writer.finish().unwrap();
    }
}

mod recording_tests {
    use super::*;

    #[test]
    fn records_one_row_per_agent_per_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let mut obs = KernelOutputObserver::new(CsvWriter::new(dir.path()).unwrap());

        let mut kernel = recorded_kernel(5, 10);
        kernel.set_target(kernel.config.bounds.center());
        // Ticks 0..=30 → snapshots at 0, 10, 20, 30.
        kernel.run_ticks(31, &mut obs).unwrap();
        obs.finish();
        assert!(obs.take_error().is_none());

        let snapshots = fs::read_to_string(dir.path().join("agent_snapshots.csv")).unwrap();
        assert_eq!(snapshots.lines().count(), 1 + 4 * 5, "header + 4 snapshots × 5 agents");

        let summaries = fs::read_to_string(dir.path().join("tick_summaries.csv")).unwrap();
        assert_eq!(summaries.lines().count(), 1 + 4, "header + 4 summaries");
    }

    #[test]
    fn summary_best_time_empty_until_first_completion() {
        let dir = tempfile::tempdir().unwrap();
        let mut obs = KernelOutputObserver::new(CsvWriter::new(dir.path()).unwrap());

        let mut kernel = recorded_kernel(10, 1);
        kernel.set_target(kernel.config.bounds.center());
        kernel.run_ticks(500, &mut obs).unwrap();
        obs.finish();
        assert!(obs.take_error().is_none());
        assert!(kernel.agents.all_reached(), "run should complete within 500 ticks");

        let summaries = fs::read_to_string(dir.path().join("tick_summaries.csv")).unwrap();
        let mut lines = summaries.lines().skip(1); // header
        let first = lines.next().unwrap();
        let last = lines.last().unwrap();

        // best_secs is the third field.
        assert_eq!(first.split(',').nth(2), Some(""), "no best before any completion");
        assert_ne!(last.split(',').nth(2), Some(""), "best recorded after completion");
    }

    #[test]
    fn rows_carry_role_and_reached_flags() {
        let dir = tempfile::tempdir().unwrap();
        let mut obs = KernelOutputObserver::new(CsvWriter::new(dir.path()).unwrap());

        let mut kernel = recorded_kernel(8, 500);
        kernel.set_target(kernel.config.bounds.center());
        kernel.run_ticks(501, &mut obs).unwrap();
        obs.finish();

        let snapshots = fs::read_to_string(dir.path().join("agent_snapshots.csv")).unwrap();
        // Snapshot at tick 500: everyone has arrived by then.
        let final_rows: Vec<&str> = snapshots
            .lines()
            .filter(|l| l.split(',').nth(1) == Some("500"))
            .collect();
        assert_eq!(final_rows.len(), 8);
        assert!(final_rows[0].contains(",leader,"));
        for row in &final_rows {
            assert_eq!(row.split(',').nth(5), Some("1"), "reached flag set: {row}");
        }
    }
}
