//! The `OutputWriter` trait implemented by all backend writers.

use pk_ssa::Trajectory;

use crate::row::snapshot_rows;
use crate::{OutputResult, RunSummaryRow, TrajectoryRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// When driven by [`TrajectoryOutputObserver`][crate::TrajectoryOutputObserver]
/// errors are stored and retrieved with `take_error` afterwards.
pub trait OutputWriter {
    /// Write a batch of trajectory rows.
    fn write_events(&mut self, rows: &[TrajectoryRow]) -> OutputResult<()>;

    /// Write one run summary row.
    fn write_run_summary(&mut self, row: &RunSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying handles.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Write every snapshot of a finished `trajectory` as run `run`.
///
/// Does not call [`OutputWriter::finish`], so several runs can share one
/// writer.
pub fn write_trajectory<W: OutputWriter + ?Sized>(
    writer:     &mut W,
    run:        u32,
    trajectory: &Trajectory,
) -> OutputResult<()> {
    let mut rows = Vec::with_capacity(trajectory.len() * trajectory.width());
    for (event, (time, counts)) in trajectory.iter().enumerate() {
        rows.extend(snapshot_rows(run, event as u64, time, counts));
    }
    writer.write_events(&rows)
}
