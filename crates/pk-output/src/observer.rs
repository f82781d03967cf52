//! `TrajectoryOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use pk_core::ReactionId;
use pk_network::SystemState;
use pk_ssa::{RunSummary, SimObserver};

use crate::row::{snapshot_rows, RunSummaryRow, TrajectoryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// Rows buffered before handing a batch to the writer.
const BATCH_ROWS: usize = 4096;

/// A [`SimObserver`] that streams every snapshot of one run, then its
/// summary, to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].  The writer is finished when the run
/// terminates.
pub struct TrajectoryOutputObserver<W: OutputWriter> {
    writer:     W,
    run:        u32,
    event:      u64,
    buffer:     Vec<TrajectoryRow>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> TrajectoryOutputObserver<W> {
    /// Create an observer that labels its rows with `run`.
    pub fn new(writer: W, run: u32) -> Self {
        Self {
            writer,
            run,
            event:      0,
            buffer:     Vec::with_capacity(BATCH_ROWS),
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn push_snapshot(&mut self, time: f64, state: &SystemState) {
        self.buffer.extend(snapshot_rows(self.run, self.event, time, state.counts()));
        self.event += 1;
        if self.buffer.len() >= BATCH_ROWS {
            self.flush();
        }
    }

    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let result = self.writer.write_events(&self.buffer);
        self.buffer.clear();
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            log::warn!("output write failed for run {}: {e}", self.run);
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for TrajectoryOutputObserver<W> {
    fn on_start(&mut self, time: f64, state: &SystemState) {
        self.push_snapshot(time, state);
    }

    fn on_event(&mut self, time: f64, _reaction: ReactionId, state: &SystemState) {
        self.push_snapshot(time, state);
    }

    fn on_terminate(&mut self, summary: &RunSummary) {
        self.flush();
        let result = self.writer.write_run_summary(&RunSummaryRow::new(self.run, summary));
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
