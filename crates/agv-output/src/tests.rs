//! Integration tests for agv-output.

use agv_core::{MotionState, SimConfig, Tick};
use agv_fleet::TelemetryRecord;

fn record(id: u32, x: f32, y: f32, status: MotionState) -> TelemetryRecord {
    TelemetryRecord {
        id,
        name:              format!("AGV-{:02}", id + 1),
        x,
        y,
        heading:           90.0,
        speed:             2.5,
        status,
        zone:              (id == 0).then(|| "Workshop".to_owned()),
        energy:            99.5,
        distance:          12.25,
        waypoints_reached: 3,
        timestamp_ms:      1_000 + id as i64,
    }
}

fn test_config(total_ticks: u64, publish_interval_ticks: u64) -> SimConfig {
    SimConfig {
        start_unix_ms:    0,
        tick_duration_ms: 200,
        total_ticks,
        seed:             1,
        publish_interval_ticks,
    }
}

// ── CSV tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::csv::CsvWriter;
    use crate::row::{MapCoverageRow, TickSummaryRow};
    use crate::writer::TelemetryWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn headers(path: std::path::PathBuf) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("telemetry.csv").exists());
        assert!(dir.path().join("tick_summaries.csv").exists());
        assert!(dir.path().join("map_coverage.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(headers(dir.path().join("telemetry.csv")), [
            "tick", "id", "name", "x", "y", "heading", "speed", "status",
            "zone", "energy", "distance", "waypoints_reached", "timestamp_ms",
        ]);
        assert_eq!(headers(dir.path().join("tick_summaries.csv")), [
            "tick", "unix_ms", "activated", "moving", "waiting", "idle",
            "arrivals", "yielded", "rejected",
        ]);
        assert_eq!(headers(dir.path().join("map_coverage.csv")), [
            "tick", "unix_ms", "version", "unknown", "free", "wall",
        ]);
    }

    #[test]
    fn csv_records_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let records = vec![
            record(0, 12.5, 5.0, MotionState::Moving),
            record(1, 3.333, 7.0, MotionState::Waiting),
        ];
        w.write_records(Tick(4), &records).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("telemetry.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "4");       // tick
        assert_eq!(&rows[0][2], "AGV-01");
        assert_eq!(&rows[0][3], "12.50");
        assert_eq!(&rows[0][6], "2.50");    // speed
        assert_eq!(&rows[0][7], "MOVING");
        assert_eq!(&rows[0][8], "Workshop");
        assert_eq!(&rows[1][3], "3.33");
        assert_eq!(&rows[1][7], "WAITING");
        assert_eq!(&rows[1][8], "");
        assert_eq!(&rows[1][12], "1001");
    }

    #[test]
    fn csv_tick_summary_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&TickSummaryRow {
            tick: 3, unix_ms: 600, activated: 1, moving: 2, waiting: 1,
            idle: 0, arrivals: 1, yielded: 1, rejected: 0,
        })
        .unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "3");
        assert_eq!(&rows[0][1], "600");
        assert_eq!(&rows[0][3], "2");       // moving
        assert_eq!(&rows[0][7], "1");       // yielded
    }

    #[test]
    fn csv_map_coverage_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_map_coverage(&MapCoverageRow { tick: 0, unix_ms: 50, version: 1, unknown: 90, free: 8, wall: 2 })
            .unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("map_coverage.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][1], "50");
        assert_eq!(&rows[0][3], "90");
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
        w.write_records(Tick(0), &[]).unwrap();
    }

    #[test]
    fn integration_csv() {
        use agv_fleet::FleetConfig;
        use agv_map::{FloorPlan, MapEngine};
        use agv_route::Route;
        use agv_sim::SimBuilder;

        use crate::observer::TelemetryObserver;

        let config = test_config(6, 2);
        let engine = MapEngine::new(&FloorPlan::standard_factory()).unwrap();
        let routes = vec![
            Route::from_pairs(&[(5.0, 5.0), (144.0, 5.0)]).unwrap(),
            Route::from_pairs(&[(5.0, 94.0), (144.0, 94.0)]).unwrap(),
            Route::from_pairs(&[(5.0, 42.0), (52.0, 42.0)]).unwrap(),
        ];
        let mut sim = SimBuilder::new(config.clone(), engine, FleetConfig::default())
            .routes(routes)
            .build()
            .unwrap();

        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = TelemetryObserver::new(writer, &config);
        sim.run(&mut obs);
        assert!(obs.take_error().is_none(), "no write errors expected");

        // publish_interval = 2 → publishes at ticks 0, 2, 4 (3 ticks × 3 vehicles)
        let mut rdr = csv::Reader::from_path(dir.path().join("telemetry.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 9, "expected 3 ticks × 3 vehicles = 9 rows, got {}", rows.len());

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        assert_eq!(rdr.records().count(), 6);

        // Every publish tick moved at least one vehicle, so the map changed each time.
        let mut rdr = csv::Reader::from_path(dir.path().join("map_coverage.csv")).unwrap();
        assert_eq!(rdr.records().count(), 3);
    }
}

// ── JSON-lines tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod jsonl_tests {
    use std::fs;

    use super::*;
    use crate::jsonl::{JsonLinesWriter, PublishPayload};
    use crate::writer::TelemetryWriter;

    #[test]
    fn payload_carries_publish_fields() {
        let r = record(0, 12.5, 5.0, MotionState::Moving);
        let value = serde_json::to_value(PublishPayload::from(&r)).unwrap();
        assert_eq!(value["id"], "AGV-01");
        assert_eq!(value["x"], 12.5);
        assert_eq!(value["y"], 5.0);
        assert_eq!(value["speed"], 2.5);
        assert_eq!(value["battery"], 99.5);
        assert_eq!(value["status"], "MOVING");
        assert_eq!(value["zone"], "Workshop");
        assert_eq!(value["timestamp"], 1_000);
        assert_eq!(value.as_object().unwrap().len(), 8);
    }

    #[test]
    fn payload_omits_zone_outside_zones() {
        let r = record(1, 3.0, 4.0, MotionState::Waiting);
        let value = serde_json::to_value(PublishPayload::from(&r)).unwrap();
        assert!(value.get("zone").is_none());
        assert_eq!(value.as_object().unwrap().len(), 7);
    }

    #[test]
    fn one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = JsonLinesWriter::new(dir.path()).unwrap();
        w.write_records(Tick(0), &[
            record(0, 1.0, 2.0, MotionState::Moving),
            record(1, 3.0, 4.0, MotionState::Waiting),
        ])
        .unwrap();
        w.write_records(Tick(1), &[record(2, 5.0, 6.0, MotionState::Idle)]).unwrap();
        w.finish().unwrap();

        let text = fs::read_to_string(dir.path().join("telemetry.jsonl")).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1]["status"], "WAITING");
        assert_eq!(lines[2]["id"], "AGV-03");
        assert_eq!(lines[2]["status"], "IDLE");
    }

    #[test]
    fn integration_jsonl() {
        use agv_fleet::FleetConfig;
        use agv_map::OpenFloor;
        use agv_route::Route;
        use agv_sim::SimBuilder;

        use crate::observer::TelemetryObserver;

        let config = test_config(5, 1);
        let mut sim = SimBuilder::new(config.clone(), OpenFloor, FleetConfig::default())
            .routes(vec![Route::from_pairs(&[(0.0, 0.0), (100.0, 0.0)]).unwrap()])
            .build()
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let mut obs = TelemetryObserver::new(JsonLinesWriter::new(dir.path()).unwrap(), &config);
        sim.run(&mut obs);
        assert!(obs.take_error().is_none());

        let text = fs::read_to_string(dir.path().join("telemetry.jsonl")).unwrap();
        let stamps: Vec<i64> = text
            .lines()
            .map(|l| serde_json::from_str::<serde_json::Value>(l).unwrap()["timestamp"].as_i64().unwrap())
            .collect();
        assert_eq!(stamps, vec![0, 200, 400, 600, 800]);
    }
}

// ── Observer tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use agv_fleet::TickReport;
    use agv_map::{FloorPlan, MapEngine};
    use agv_sim::SimObserver;

    use super::*;
    use crate::observer::TelemetryObserver;
    use crate::row::{MapCoverageRow, TickSummaryRow};
    use crate::writer::TelemetryWriter;
    use crate::{OutputError, OutputResult};

    /// Counts calls; fails every summary write after the first.
    #[derive(Default)]
    struct Flaky {
        batches:   usize,
        summaries: usize,
        coverage:  Vec<MapCoverageRow>,
        finished:  usize,
    }

    impl TelemetryWriter for Flaky {
        fn write_records(&mut self, _tick: Tick, _records: &[TelemetryRecord]) -> OutputResult<()> {
            self.batches += 1;
            Ok(())
        }

        fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
            self.summaries += 1;
            if self.summaries > 1 {
                let msg = format!("disk full at tick {}", row.tick);
                return Err(OutputError::Io(std::io::Error::other(msg)));
            }
            Ok(())
        }

        fn write_map_coverage(&mut self, row: &MapCoverageRow) -> OutputResult<()> {
            self.coverage.push(*row);
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            self.finished += 1;
            Ok(())
        }
    }

    #[test]
    fn keeps_first_error_and_keeps_writing() {
        let mut obs = TelemetryObserver::new(Flaky::default(), &test_config(10, 1));
        for t in 0..3 {
            obs.on_tick_end(&TickReport { tick: Tick(t), ..TickReport::default() });
        }
        obs.on_sim_end(Tick(3));

        let err = obs.take_error().unwrap();
        assert!(err.to_string().contains("tick 1"), "got {err}");
        assert!(obs.take_error().is_none());
        let w = obs.into_writer();
        assert_eq!(w.summaries, 3);
        assert_eq!(w.finished, 1);
    }

    #[test]
    fn empty_batches_are_skipped() {
        let mut obs = TelemetryObserver::new(Flaky::default(), &test_config(10, 1));
        obs.on_publish(Tick(0), 0, &[], None);
        obs.on_publish(Tick(1), 200, &[record(0, 0.0, 0.0, MotionState::Idle)], None);
        assert_eq!(obs.into_writer().batches, 1);
    }

    #[test]
    fn unchanged_maps_written_once() {
        let mut engine = MapEngine::new(&FloorPlan::new(20, 20)).unwrap();
        let mut obs = TelemetryObserver::new(Flaky::default(), &test_config(10, 1));

        let first = engine.snapshot();
        obs.on_publish(Tick(0), 0, &[], Some(&first));
        obs.on_publish(Tick(1), 200, &[], Some(&engine.snapshot()));
        engine.scan(agv_core::Point::new(10.0, 10.0));
        obs.on_publish(Tick(2), 9_999, &[], Some(&engine.snapshot()));

        let w = obs.into_writer();
        assert_eq!(w.coverage.len(), 2);
        assert_eq!(w.coverage[0].unknown, 400);
        assert_eq!(w.coverage[1].tick, 2);
        // Stamped with the publish time it was handed.
        assert_eq!(w.coverage[1].unix_ms, 9_999);
        assert!(w.coverage[1].free > 0);
        assert_eq!(w.coverage[1].unknown + w.coverage[1].free + w.coverage[1].wall, 400);
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::row::TickSummaryRow;
    use crate::sqlite::SqliteWriter;
    use crate::writer::TelemetryWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("telemetry.db").exists());
    }

    #[test]
    fn sqlite_record_count() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_records(Tick(1), &[
            record(0, 1.0, 1.0, MotionState::Moving),
            record(1, 2.0, 2.0, MotionState::Waiting),
            record(2, 3.0, 3.0, MotionState::Idle),
        ])
        .unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("telemetry.db")).unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM telemetry", [], |r| r.get(0)
        ).unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn sqlite_status_stored_as_label() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_records(Tick(0), &[record(0, 1.0, 1.0, MotionState::Waiting)]).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("telemetry.db")).unwrap();
        let status: String = conn.query_row(
            "SELECT status FROM telemetry WHERE vehicle_id = 0", [], |r| r.get(0)
        ).unwrap();
        assert_eq!(status, "WAITING");
    }

    #[test]
    fn sqlite_zone_and_speed() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_records(Tick(0), &[
            record(0, 1.0, 1.0, MotionState::Moving),
            record(1, 2.0, 2.0, MotionState::Moving),
        ])
        .unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("telemetry.db")).unwrap();
        let zones: Vec<Option<String>> = conn
            .prepare("SELECT zone FROM telemetry ORDER BY vehicle_id")
            .unwrap()
            .query_map([], |r| r.get(0))
            .unwrap()
            .map(|z| z.unwrap())
            .collect();
        assert_eq!(zones, [Some("Workshop".to_owned()), None]);
        let speed: f64 = conn.query_row(
            "SELECT speed FROM telemetry WHERE vehicle_id = 1", [], |r| r.get(0)
        ).unwrap();
        assert_eq!(speed, 2.5);
    }

    #[test]
    fn sqlite_tick_summary() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&TickSummaryRow {
            tick: 7, unix_ms: 1_400, activated: 0, moving: 3, waiting: 0,
            idle: 0, arrivals: 1, yielded: 0, rejected: 0,
        })
        .unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("telemetry.db")).unwrap();
        let moving: i64 = conn.query_row(
            "SELECT moving FROM tick_summaries WHERE tick = 7", [], |r| r.get(0)
        ).unwrap();
        assert_eq!(moving, 3);
    }

    #[test]
    fn sqlite_finish_idempotent() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}
