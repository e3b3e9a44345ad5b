//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `telemetry.db` file in the configured output directory
//! with three tables: `telemetry`, `tick_summaries`, and `map_coverage`.

use std::path::Path;

use agv_core::Tick;
use agv_fleet::TelemetryRecord;
use rusqlite::Connection;

use crate::{MapCoverageRow, OutputResult, TickSummaryRow};
use crate::writer::TelemetryWriter;

/// Writes telemetry to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `telemetry.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("telemetry.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS telemetry (
                 tick              INTEGER NOT NULL,
                 vehicle_id        INTEGER NOT NULL,
                 name              TEXT    NOT NULL,
                 x                 REAL    NOT NULL,
                 y                 REAL    NOT NULL,
                 heading           REAL    NOT NULL,
                 speed             REAL    NOT NULL,
                 status            TEXT    NOT NULL,
                 zone              TEXT,
                 energy            REAL    NOT NULL,
                 distance          REAL    NOT NULL,
                 waypoints_reached INTEGER NOT NULL,
                 timestamp_ms      INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick      INTEGER PRIMARY KEY,
                 unix_ms   INTEGER NOT NULL,
                 activated INTEGER NOT NULL,
                 moving    INTEGER NOT NULL,
                 waiting   INTEGER NOT NULL,
                 idle      INTEGER NOT NULL,
                 arrivals  INTEGER NOT NULL,
                 yielded   INTEGER NOT NULL,
                 rejected  INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS map_coverage (
                 tick    INTEGER PRIMARY KEY,
                 unix_ms INTEGER NOT NULL,
                 version INTEGER NOT NULL,
                 unknown INTEGER NOT NULL,
                 free    INTEGER NOT NULL,
                 wall    INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl TelemetryWriter for SqliteWriter {
    fn write_records(&mut self, tick: Tick, records: &[TelemetryRecord]) -> OutputResult<()> {
        if records.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO telemetry \
                 (tick, vehicle_id, name, x, y, heading, speed, status, zone, energy, \
                  distance, waypoints_reached, timestamp_ms) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            )?;
            for r in records {
                stmt.execute(rusqlite::params![
                    tick.0 as i64,
                    r.id,
                    r.name,
                    r.x as f64,
                    r.y as f64,
                    r.heading as f64,
                    r.speed as f64,
                    r.status.as_str(),
                    r.zone,
                    r.energy as f64,
                    r.distance as f64,
                    r.waypoints_reached as i64,
                    r.timestamp_ms,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries \
             (tick, unix_ms, activated, moving, waiting, idle, arrivals, yielded, rejected) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            rusqlite::params![
                row.tick as i64,
                row.unix_ms,
                row.activated,
                row.moving,
                row.waiting,
                row.idle,
                row.arrivals,
                row.yielded,
                row.rejected,
            ],
        )?;
        Ok(())
    }

    fn write_map_coverage(&mut self, row: &MapCoverageRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO map_coverage (tick, unix_ms, version, unknown, free, wall) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                row.tick as i64,
                row.unix_ms,
                row.version as i64,
                row.unknown as i64,
                row.free as i64,
                row.wall as i64,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
