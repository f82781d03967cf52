//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `trajectory.csv`
//! - `run_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{OutputResult, RunSummaryRow, TrajectoryRow};
use crate::writer::OutputWriter;

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    events:    Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut events = Writer::from_path(dir.join("trajectory.csv"))?;
        events.write_record(["run", "event", "time", "compartment", "count"])?;

        let mut summaries = Writer::from_path(dir.join("run_summaries.csv"))?;
        summaries.write_record(["run", "events", "final_time", "reason"])?;

        Ok(Self {
            events,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_events(&mut self, rows: &[TrajectoryRow]) -> OutputResult<()> {
        for row in rows {
            self.events.write_record(&[
                row.run.to_string(),
                row.event.to_string(),
                row.time.to_string(),
                row.compartment.to_string(),
                row.count.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_run_summary(&mut self, row: &RunSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.run.to_string(),
            row.events.to_string(),
            row.final_time.to_string(),
            row.reason.as_str().to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
