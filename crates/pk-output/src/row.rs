//! Plain data row types written by output backends.

use pk_ssa::{RunSummary, TerminationReason};

/// Count of one compartment in one recorded snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryRow {
    pub run:         u32,
    /// Snapshot index; 0 is the initial state.
    pub event:       u64,
    pub time:        f64,
    /// `CompartmentId` index.
    pub compartment: u32,
    pub count:       u64,
}

/// Outcome of one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummaryRow {
    pub run:        u32,
    pub events:     u64,
    pub final_time: f64,
    pub reason:     TerminationReason,
}

impl RunSummaryRow {
    pub fn new(run: u32, summary: &RunSummary) -> Self {
        Self {
            run,
            events:     summary.events,
            final_time: summary.final_time,
            reason:     summary.reason,
        }
    }
}

/// Long-format rows for one snapshot.
pub(crate) fn snapshot_rows(
    run:    u32,
    event:  u64,
    time:   f64,
    counts: &[u64],
) -> impl Iterator<Item = TrajectoryRow> + '_ {
    counts.iter().enumerate().map(move |(c, &count)| TrajectoryRow {
        run,
        event,
        time,
        compartment: c as u32,
        count,
    })
}
