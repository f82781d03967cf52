//! `pk-output` — trajectory writers for the rust_pk simulator.
//!
//! | Feature   | Backend | Files created                                 |
//! |-----------|---------|-----------------------------------------------|
//! | *(none)*  | CSV     | `trajectory.csv`, `run_summaries.csv`         |
//! | `sqlite`  | SQLite  | `output.db`                                   |
//!
//! Both backends implement [`OutputWriter`].  Stream a single run through
//! [`TrajectoryOutputObserver`], or dump finished trajectories (e.g. from an
//! ensemble) with [`write_trajectory`].
//!
//! Trajectories are written in long format: one row per
//! `(snapshot, compartment)`, where `event` 0 is the initial state.
//!
//! ```rust,ignore
//! use pk_output::{CsvWriter, TrajectoryOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = TrajectoryOutputObserver::new(writer, 0);
//! sim.run(&mut trajectory, &mut obs)?;
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TrajectoryOutputObserver;
pub use row::{RunSummaryRow, TrajectoryRow};
pub use writer::{write_trajectory, OutputWriter};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
