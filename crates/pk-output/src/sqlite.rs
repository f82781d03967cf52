//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `trajectory` and `run_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::{OutputResult, RunSummaryRow, TrajectoryRow};
use crate::writer::OutputWriter;

/// Writes simulation output to an SQLite database.
///
/// Like the CSV backend, opening replaces any output of a previous
/// invocation: both tables are dropped and recreated.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise a fresh schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             DROP TABLE IF EXISTS trajectory;
             DROP TABLE IF EXISTS run_summaries;
             CREATE TABLE trajectory (
                 run         INTEGER NOT NULL,
                 event       INTEGER NOT NULL,
                 time        REAL    NOT NULL,
                 compartment INTEGER NOT NULL,
                 count       INTEGER NOT NULL
             );
             CREATE TABLE run_summaries (
                 run        INTEGER PRIMARY KEY,
                 events     INTEGER NOT NULL,
                 final_time REAL    NOT NULL,
                 reason     TEXT    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_events(&mut self, rows: &[TrajectoryRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO trajectory (run, event, time, compartment, count) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for row in rows {
                // SQLite integers are i64; counts and event indices fit.
                stmt.execute(rusqlite::params![
                    row.run,
                    row.event as i64,
                    row.time,
                    row.compartment,
                    row.count as i64,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_run_summary(&mut self, row: &RunSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO run_summaries (run, events, final_time, reason) \
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![row.run, row.events as i64, row.final_time, row.reason.as_str()],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
