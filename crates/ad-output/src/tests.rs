//! Integration tests for ad-output.

use ad_core::{Priority, UnitId};

use crate::row::{DispatchRow, SummaryRow};

fn dispatch_row(cycle: u64, hospital: Option<(&str, u64)>) -> DispatchRow {
    DispatchRow {
        cycle,
        patient:           "Connaught Place".to_owned(),
        priority:          Priority::High,
        unit:              UnitId(2),
        origin:            "AIIMS".to_owned(),
        distance:          7,
        hospital:          hospital.map(|(name, _)| name.to_owned()),
        hospital_distance: hospital.map(|(_, d)| d),
    }
}

fn summary_row(served: u64, total: u64) -> SummaryRow {
    SummaryRow {
        served,
        unassigned:       1,
        total_distance:   total,
        average_distance: (served > 0).then(|| total / served),
    }
}

#[cfg(test)]
mod rows {
    use ad_dispatch::SessionStats;

    use super::*;

    #[test]
    fn log_line_format() {
        let row = dispatch_row(0, Some(("Safdarjung", 4)));
        assert_eq!(
            row.to_string(),
            "Patient at Connaught Place | Priority: High | Ambulance: #2 | Distance: 7 | Hospital: Safdarjung"
        );
    }

    #[test]
    fn log_line_without_hospital() {
        let row = dispatch_row(0, None);
        assert!(row.to_string().ends_with("| Hospital: N/A"));
    }

    #[test]
    fn summary_from_stats() {
        let stats = SessionStats { served: 3, unassigned: 2, total_distance: 10 };
        let row = SummaryRow::from(&stats);
        assert_eq!(row.served, 3);
        assert_eq!(row.unassigned, 2);
        assert_eq!(row.average_distance, Some(3));

        let empty = SummaryRow::from(&SessionStats::default());
        assert_eq!(empty.average_distance, None);
    }
}

#[cfg(test)]
mod text_tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::text::TextLogWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn log_lines_appended() {
        let dir = tmp();
        let mut w = TextLogWriter::new(dir.path()).unwrap();
        w.write_dispatch(&dispatch_row(0, Some(("Safdarjung", 4)))).unwrap();
        w.write_dispatch(&dispatch_row(1, None)).unwrap();
        w.finish().unwrap();

        let text = fs::read_to_string(dir.path().join("logs.txt")).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("Hospital: Safdarjung"));
        assert!(lines[1].ends_with("Hospital: N/A"));
    }

    #[test]
    fn log_survives_reopen() {
        let dir = tmp();
        for cycle in 0..2 {
            let mut w = TextLogWriter::new(dir.path()).unwrap();
            w.write_dispatch(&dispatch_row(cycle, None)).unwrap();
            w.finish().unwrap();
        }
        let text = fs::read_to_string(dir.path().join("logs.txt")).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn summary_with_average() {
        let dir = tmp();
        let mut w = TextLogWriter::new(dir.path()).unwrap();
        w.write_summary(&summary_row(2, 9)).unwrap();

        let text = fs::read_to_string(dir.path().join("summary.txt")).unwrap();
        assert_eq!(
            text,
            "Patients Served: 2\nTotal Distance Covered: 9 km\nAverage Distance per Patient: 4 km\n"
        );
    }

    #[test]
    fn summary_without_patients_has_no_average() {
        let dir = tmp();
        let mut w = TextLogWriter::new(dir.path()).unwrap();
        w.write_summary(&summary_row(5, 50)).unwrap();
        w.write_summary(&summary_row(0, 0)).unwrap();

        let text = fs::read_to_string(dir.path().join("summary.txt")).unwrap();
        assert_eq!(text, "Patients Served: 0\nTotal Distance Covered: 0 km\n");
    }

    #[test]
    fn summary_not_created_until_written() {
        let dir = tmp();
        let mut w = TextLogWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert!(dir.path().join("logs.txt").exists());
        assert!(!dir.path().join("summary.txt").exists());
    }

    #[test]
    fn finish_idempotent() {
        let dir = tmp();
        let mut w = TextLogWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::csv::CsvWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn read_all(path: std::path::PathBuf) -> (Vec<String>, Vec<csv::StringRecord>) {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        let headers = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        let rows = rdr.records().map(|r| r.unwrap()).collect();
        (headers, rows)
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let (headers, rows) = read_all(dir.path().join("dispatches.csv"));
        assert_eq!(
            headers,
            ["cycle", "patient", "priority", "unit", "origin", "distance", "hospital", "hospital_distance"]
        );
        assert!(rows.is_empty());

        let (headers, _) = read_all(dir.path().join("summary.csv"));
        assert_eq!(headers, ["served", "unassigned", "total_distance", "average_distance"]);
    }

    #[test]
    fn csv_dispatch_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_dispatch(&dispatch_row(0, Some(("Safdarjung", 4)))).unwrap();
        w.write_dispatch(&dispatch_row(3, None)).unwrap();
        w.finish().unwrap();

        let (_, rows) = read_all(dir.path().join("dispatches.csv"));
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "Connaught Place");
        assert_eq!(&rows[0][2], "High");
        assert_eq!(&rows[0][3], "2");
        assert_eq!(&rows[0][6], "Safdarjung");
        assert_eq!(&rows[0][7], "4");
        assert_eq!(&rows[1][0], "3");
        assert_eq!(&rows[1][6], "");
        assert_eq!(&rows[1][7], "");
    }

    #[test]
    fn csv_summary_row() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_summary(&summary_row(0, 0)).unwrap();
        w.finish().unwrap();

        let (_, rows) = read_all(dir.path().join("summary.csv"));
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "0");
        assert_eq!(&rows[0][1], "1");
        assert_eq!(&rows[0][3], "");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use std::fs;
    use std::io;

    use ad_core::{DispatchConfig, FixedRng, VertexId};
    use ad_dispatch::{Dispatcher, DispatcherBuilder, Request};
    use ad_graph::{DijkstraRouter, GraphBuilder};

    use super::*;
    use crate::observer::DispatchOutputObserver;
    use crate::text::TextLogWriter;
    use crate::writer::OutputWriter;
    use crate::{OutputError, OutputResult};

    /// A -1- B -2- C -1- D; one unit at B, one hospital at A.  FixedRng(0.9)
    /// never passes the release trial, so the unit stays busy.
    fn dispatcher() -> Dispatcher<DijkstraRouter, FixedRng> {
        let mut b = GraphBuilder::new();
        let ids: Vec<_> = ["A", "B", "C", "D"].into_iter().map(|n| b.add_location(n)).collect();
        b.add_road(ids[0], ids[1], 1);
        b.add_road(ids[1], ids[2], 2);
        b.add_road(ids[2], ids[3], 1);
        let config = DispatchConfig {
            unit_positions: vec![VertexId(1)],
            hospitals:      vec![VertexId(0)],
            ..DispatchConfig::default()
        };
        DispatcherBuilder::new(config, b.build().unwrap(), DijkstraRouter)
            .random_source(FixedRng(0.9))
            .build()
            .unwrap()
    }

    #[derive(Default)]
    struct Recording {
        dispatches: Vec<DispatchRow>,
        summaries:  Vec<SummaryRow>,
        finishes:   usize,
    }

    impl OutputWriter for Recording {
        fn write_dispatch(&mut self, row: &DispatchRow) -> OutputResult<()> {
            self.dispatches.push(row.clone());
            Ok(())
        }
        fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()> {
            self.summaries.push(*row);
            Ok(())
        }
        fn finish(&mut self) -> OutputResult<()> {
            self.finishes += 1;
            Ok(())
        }
    }

    struct Failing;

    impl OutputWriter for Failing {
        fn write_dispatch(&mut self, _row: &DispatchRow) -> OutputResult<()> {
            Err(io::Error::other("disk full").into())
        }
        fn write_summary(&mut self, _row: &SummaryRow) -> OutputResult<()> {
            Err(io::Error::other("still full").into())
        }
        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn rows_carry_location_names() {
        let mut d = dispatcher();
        let mut obs = DispatchOutputObserver::new(Recording::default(), &d.graph);
        d.run(
            [Request::new(VertexId(3), Priority::Normal), Request::new(VertexId(0), Priority::Critical)],
            &mut obs,
        )
        .unwrap();
        d.finish(&mut obs);
        assert!(obs.take_error().is_none());

        let w = obs.into_writer();
        assert_eq!(w.dispatches.len(), 1);
        let row = &w.dispatches[0];
        assert_eq!(row.patient, "D");
        assert_eq!(row.origin, "B");
        assert_eq!(row.distance, 3);
        assert_eq!(row.hospital.as_deref(), Some("A"));
        assert_eq!(row.hospital_distance, Some(4));

        assert_eq!(w.summaries.len(), 1);
        assert_eq!(w.summaries[0].served, 1);
        assert_eq!(w.summaries[0].unassigned, 1);
        assert_eq!(w.finishes, 1);
    }

    #[test]
    fn session_written_to_text_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut d = dispatcher();
        let mut obs = DispatchOutputObserver::new(TextLogWriter::new(dir.path()).unwrap(), &d.graph);
        d.handle(Request::new(VertexId(3), Priority::Normal), &mut obs).unwrap();
        d.finish(&mut obs);
        assert!(obs.take_error().is_none());

        let log = fs::read_to_string(dir.path().join("logs.txt")).unwrap();
        assert_eq!(
            log,
            "Patient at D | Priority: Normal | Ambulance: #0 | Distance: 3 | Hospital: A\n"
        );
        let summary = fs::read_to_string(dir.path().join("summary.txt")).unwrap();
        assert_eq!(
            summary,
            "Patients Served: 1\nTotal Distance Covered: 3 km\nAverage Distance per Patient: 3 km\n"
        );
    }

    #[test]
    fn first_error_kept() {
        let mut d = dispatcher();
        let mut obs = DispatchOutputObserver::new(Failing, &d.graph);
        d.handle(Request::new(VertexId(2), Priority::High), &mut obs).unwrap();
        d.finish(&mut obs);

        match obs.take_error() {
            Some(OutputError::Io(e)) => assert_eq!(e.to_string(), "disk full"),
            other => panic!("expected stored I/O error, got {other:?}"),
        }
        assert!(obs.take_error().is_none());
    }

    #[test]
    fn fan_out_reaches_every_writer() {
        let mut writers: Vec<Box<dyn OutputWriter>> = vec![Box::new(Failing), Box::new(Recording::default())];
        let err = writers.write_dispatch(&dispatch_row(0, None));
        assert!(err.is_err());
        writers.finish().unwrap();
    }

    #[test]
    fn unassigned_requests_not_logged() {
        let mut d = dispatcher();
        let mut obs = DispatchOutputObserver::new(Recording::default(), &d.graph);
        d.registry.set_availability(UnitId(0), false).unwrap();
        assert!(d.handle(Request::new(VertexId(0), Priority::Normal), &mut obs).is_err());
        d.finish(&mut obs);

        let w = obs.into_writer();
        assert!(w.dispatches.is_empty());
        assert_eq!(w.summaries[0].unassigned, 1);
        assert_eq!(w.summaries[0].average_distance, None);
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use rusqlite::Connection;
    use tempfile::TempDir;

    use super::*;
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("dispatch.db").exists());
    }

    #[test]
    fn sqlite_dispatch_rows() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_dispatch(&dispatch_row(0, Some(("Safdarjung", 4)))).unwrap();
        w.write_dispatch(&dispatch_row(1, None)).unwrap();
        w.finish().unwrap();

        let conn = Connection::open(dir.path().join("dispatch.db")).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM dispatches", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 2);

        let hospital: Option<String> = conn
            .query_row("SELECT hospital FROM dispatches WHERE cycle = 1", [], |r| r.get(0))
            .unwrap();
        assert_eq!(hospital, None);
    }

    #[test]
    fn sqlite_sessions_accumulate() {
        let dir = tmp();
        let first = {
            let mut w = SqliteWriter::new(dir.path()).unwrap();
            w.write_summary(&summary_row(2, 9)).unwrap();
            w.finish().unwrap();
            w.session_id()
        };
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        assert!(w.session_id() > first);
        w.write_summary(&summary_row(0, 0)).unwrap();
        w.finish().unwrap();

        let conn = Connection::open(dir.path().join("dispatch.db")).unwrap();
        let avg: Option<i64> = conn
            .query_row("SELECT average_distance FROM sessions WHERE session_id = ?1", [first], |r| r.get(0))
            .unwrap();
        assert_eq!(avg, Some(4));
        let sessions: i64 = conn
            .query_row("SELECT COUNT(*) FROM sessions", [], |r| r.get(0))
            .unwrap();
        assert_eq!(sessions, 2);
    }

    #[test]
    fn sqlite_finish_idempotent() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}
