//! Integration tests for pk-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use pk_ssa::TerminationReason;

    use crate::csv::CsvWriter;
    use crate::row::{RunSummaryRow, TrajectoryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn event_row(event: u64, compartment: u32, count: u64) -> TrajectoryRow {
        TrajectoryRow { run: 0, event, time: event as f64 * 0.5, compartment, count }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("trajectory.csv").exists());
        assert!(dir.path().join("run_summaries.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("trajectory.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["run", "event", "time", "compartment", "count"]);

        let mut rdr2 = csv::Reader::from_path(dir.path().join("run_summaries.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, ["run", "events", "final_time", "reason"]);
    }

    #[test]
    fn csv_event_round_trip() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_events(&[event_row(0, 0, 10), event_row(0, 1, 0), event_row(1, 0, 9)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("trajectory.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[1][3], "1");    // compartment
        assert_eq!(&rows[2][1], "1");    // event
        assert_eq!(&rows[2][2], "0.5");  // time
        assert_eq!(&rows[2][4], "9");    // count
    }

    #[test]
    fn csv_run_summary_round_trip() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_run_summary(&RunSummaryRow {
            run:        4,
            events:     120,
            final_time: 20.25,
            reason:     TerminationReason::HorizonReached,
        })
        .unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("run_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "4");
        assert_eq!(&rows[0][1], "120");
        assert_eq!(&rows[0][2], "20.25");
        assert_eq!(&rows[0][3], "horizon_reached");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_batch_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_events(&[]).unwrap();
    }

    #[test]
    fn missing_dir_is_error() {
        let dir = tmp();
        let result = CsvWriter::new(&dir.path().join("does-not-exist"));
        assert!(result.is_err());
    }
}

// ── Observer and trajectory dumps ─────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use tempfile::TempDir;

    use pk_core::SimConfig;
    use pk_network::presets;
    use pk_ssa::{Ensemble, SimBuilder, TerminationReason};

    use crate::csv::CsvWriter;
    use crate::observer::TrajectoryOutputObserver;
    use crate::row::{RunSummaryRow, TrajectoryRow};
    use crate::writer::{write_trajectory, OutputWriter};
    use crate::{OutputError, OutputResult};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    /// Writer that keeps rows in memory.
    #[derive(Default)]
    struct MemoryWriter {
        events:    Vec<TrajectoryRow>,
        summaries: Vec<RunSummaryRow>,
        finished:  usize,
    }

    impl OutputWriter for MemoryWriter {
        fn write_events(&mut self, rows: &[TrajectoryRow]) -> OutputResult<()> {
            self.events.extend_from_slice(rows);
            Ok(())
        }

        fn write_run_summary(&mut self, row: &RunSummaryRow) -> OutputResult<()> {
            self.summaries.push(*row);
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            self.finished += 1;
            Ok(())
        }
    }

    /// Writer whose every call fails.
    struct BrokenWriter;

    impl OutputWriter for BrokenWriter {
        fn write_events(&mut self, _rows: &[TrajectoryRow]) -> OutputResult<()> {
            Err(std::io::Error::other("disk full").into())
        }

        fn write_run_summary(&mut self, _row: &RunSummaryRow) -> OutputResult<()> {
            Err(std::io::Error::other("disk full").into())
        }

        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn observer_streams_every_snapshot() {
        let net = presets::two_compartment(0.5, 0.5).unwrap();
        let mut sim = SimBuilder::new(&net, SimConfig::new(20, presets::HEART, 5.0, 3))
            .build()
            .unwrap();
        let mut traj = sim.new_trajectory();
        let mut obs = TrajectoryOutputObserver::new(MemoryWriter::default(), 7);
        let summary = sim.run(&mut traj, &mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let w = obs.into_writer();
        assert_eq!(w.events.len(), traj.len() * 2);
        assert_eq!(w.finished, 1);
        assert_eq!(w.summaries, vec![RunSummaryRow::new(7, &summary)]);

        // Row 2k + c holds compartment c of snapshot k.
        for (k, (time, counts)) in traj.iter().enumerate() {
            for (c, &count) in counts.iter().enumerate() {
                let row = w.events[2 * k + c];
                assert_eq!(row.run, 7);
                assert_eq!(row.event, k as u64);
                assert_eq!(row.time, time);
                assert_eq!(row.compartment, c as u32);
                assert_eq!(row.count, count);
            }
        }
    }

    #[test]
    fn observer_keeps_first_error() {
        let net = presets::two_compartment(0.5, 0.5).unwrap();
        let mut sim = SimBuilder::new(&net, SimConfig::new(5, presets::HEART, 1.0, 3))
            .build()
            .unwrap();
        let mut traj = sim.new_trajectory();
        let mut obs = TrajectoryOutputObserver::new(BrokenWriter, 0);
        sim.run(&mut traj, &mut obs).unwrap();

        assert!(matches!(obs.take_error(), Some(OutputError::Io(_))));
        assert!(obs.take_error().is_none());
    }

    #[test]
    fn observer_writes_csv() {
        let net = presets::vital_organs().unwrap();
        let cfg = SimConfig::new(50, presets::HEART, 2.0, 9).with_max_events(30);
        let mut sim = SimBuilder::new(&net, cfg).build().unwrap();
        let mut traj = sim.new_trajectory();

        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = TrajectoryOutputObserver::new(writer, 0);
        sim.run(&mut traj, &mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        let mut rdr = csv::Reader::from_path(dir.path().join("trajectory.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), traj.len() * 5);

        let mut rdr = csv::Reader::from_path(dir.path().join("run_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][1], traj.event_count().to_string());
    }

    #[test]
    fn ensemble_dump_labels_runs() {
        let net = presets::two_compartment(0.5, 0.5).unwrap();
        let runs = Ensemble::new(&net, SimConfig::new(10, presets::HEART, 3.0, 1))
            .runs(3)
            .run()
            .unwrap();

        let mut w = MemoryWriter::default();
        for r in &runs {
            write_trajectory(&mut w, r.run as u32, &r.trajectory).unwrap();
            w.write_run_summary(&RunSummaryRow::new(r.run as u32, &r.summary)).unwrap();
        }

        let expected: usize = runs.iter().map(|r| r.trajectory.len() * 2).sum();
        assert_eq!(w.events.len(), expected);
        assert_eq!(w.finished, 0);
        assert_eq!(w.summaries.iter().map(|s| s.run).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert!(w.summaries.iter().all(|s| s.reason != TerminationReason::EventLimit));
        // Every initial snapshot holds the whole dose in Heart.
        assert!(w
            .events
            .iter()
            .filter(|row| row.event == 0 && row.compartment == 0)
            .all(|row| row.count == 10));
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use pk_ssa::TerminationReason;

    use crate::row::{RunSummaryRow, TrajectoryRow};
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn sqlite_event_count() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        let rows = vec![
            TrajectoryRow { run: 0, event: 0, time: 0.0,  compartment: 0, count: 2 },
            TrajectoryRow { run: 0, event: 0, time: 0.0,  compartment: 1, count: 0 },
            TrajectoryRow { run: 0, event: 1, time: 0.75, compartment: 0, count: 1 },
        ];
        w.write_events(&rows).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM trajectory", [], |r| r.get(0)
        ).unwrap();
        assert_eq!(count, 3);

        let time: f64 = conn.query_row(
            "SELECT time FROM trajectory WHERE event = 1", [], |r| r.get(0)
        ).unwrap();
        assert_eq!(time, 0.75);
    }

    #[test]
    fn sqlite_run_summary() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_run_summary(&RunSummaryRow {
            run: 2, events: 42, final_time: 7.5, reason: TerminationReason::NoPropensity,
        }).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let (events, final_time, reason): (i64, f64, String) = conn.query_row(
            "SELECT events, final_time, reason FROM run_summaries WHERE run = 2",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        ).unwrap();
        assert_eq!(events, 42);
        assert_eq!(final_time, 7.5);
        assert_eq!(reason, "no_propensity");
    }

    #[test]
    fn sqlite_reopen_replaces_previous_output() {
        let dir = tmp();
        let row = RunSummaryRow {
            run: 0, events: 3, final_time: 1.5, reason: TerminationReason::HorizonReached,
        };
        for _ in 0..2 {
            let mut w = SqliteWriter::new(dir.path()).unwrap();
            w.write_events(&[
                TrajectoryRow { run: 0, event: 0, time: 0.0, compartment: 0, count: 3 },
            ]).unwrap();
            w.write_run_summary(&row).unwrap();
            w.finish().unwrap();
        }

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let summaries: i64 = conn.query_row(
            "SELECT COUNT(*) FROM run_summaries", [], |r| r.get(0)
        ).unwrap();
        let events: i64 = conn.query_row(
            "SELECT COUNT(*) FROM trajectory", [], |r| r.get(0)
        ).unwrap();
        assert_eq!(summaries, 1);
        assert_eq!(events, 1);
    }

    #[test]
    fn sqlite_finish_idempotent() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}
