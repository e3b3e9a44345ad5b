//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `telemetry.csv`
//! - `tick_summaries.csv`
//! - `map_coverage.csv`

use std::fs::File;
use std::path::Path;

use agv_core::Tick;
use agv_fleet::TelemetryRecord;
use csv::Writer;

use crate::{MapCoverageRow, OutputResult, TickSummaryRow};
use crate::writer::TelemetryWriter;

/// Writes telemetry to CSV files.
pub struct CsvWriter {
    telemetry: Writer<File>,
    summaries: Writer<File>,
    coverage:  Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut telemetry = Writer::from_path(dir.join("telemetry.csv"))?;
        telemetry.write_record([
            "tick", "id", "name", "x", "y", "heading", "speed", "status",
            "zone", "energy", "distance", "waypoints_reached", "timestamp_ms",
        ])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record([
            "tick", "unix_ms", "activated", "moving", "waiting", "idle",
            "arrivals", "yielded", "rejected",
        ])?;

        let mut coverage = Writer::from_path(dir.join("map_coverage.csv"))?;
        coverage.write_record(["tick", "unix_ms", "version", "unknown", "free", "wall"])?;

        Ok(Self {
            telemetry,
            summaries,
            coverage,
            finished: false,
        })
    }
}

impl TelemetryWriter for CsvWriter {
    fn write_records(&mut self, tick: Tick, records: &[TelemetryRecord]) -> OutputResult<()> {
        for r in records {
            self.telemetry.write_record(&[
                tick.0.to_string(),
                r.id.to_string(),
                r.name.clone(),
                format!("{:.2}", r.x),
                format!("{:.2}", r.y),
                format!("{:.1}", r.heading),
                format!("{:.2}", r.speed),
                r.status.as_str().to_owned(),
                r.zone.clone().unwrap_or_default(),
                format!("{:.2}", r.energy),
                format!("{:.2}", r.distance),
                r.waypoints_reached.to_string(),
                r.timestamp_ms.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.unix_ms.to_string(),
            row.activated.to_string(),
            row.moving.to_string(),
            row.waiting.to_string(),
            row.idle.to_string(),
            row.arrivals.to_string(),
            row.yielded.to_string(),
            row.rejected.to_string(),
        ])?;
        Ok(())
    }

    fn write_map_coverage(&mut self, row: &MapCoverageRow) -> OutputResult<()> {
        self.coverage.write_record(&[
            row.tick.to_string(),
            row.unix_ms.to_string(),
            row.version.to_string(),
            row.unknown.to_string(),
            row.free.to_string(),
            row.wall.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.telemetry.flush()?;
        self.summaries.flush()?;
        self.coverage.flush()?;
        Ok(())
    }
}
