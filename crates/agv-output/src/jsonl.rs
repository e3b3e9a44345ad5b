//! JSON-lines output backend.
//!
//! Writes `telemetry.jsonl`: one [`PublishPayload`] object per line, the same
//! message a vehicle publishes to its telemetry topic.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use agv_core::Tick;
use agv_fleet::TelemetryRecord;
use serde::Serialize;

use crate::{OutputResult, TickSummaryRow};
use crate::writer::TelemetryWriter;

/// The wire form of one telemetry message.
///
/// ```json
/// {"id":"AGV-01","x":12.5,"y":5.0,"speed":2.5,"battery":99.75,"status":"MOVING","zone":"Workshop","timestamp":1700000000200}
/// ```
///
/// `zone` is omitted when the vehicle is outside every zone.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PublishPayload<'a> {
    pub id:        &'a str,
    pub x:         f32,
    pub y:         f32,
    pub speed:     f32,
    pub battery:   f32,
    pub status:    &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone:      Option<&'a str>,
    pub timestamp: i64,
}

impl<'a> From<&'a TelemetryRecord> for PublishPayload<'a> {
    fn from(r: &'a TelemetryRecord) -> Self {
        Self {
            id:        &r.name,
            x:         r.x,
            y:         r.y,
            speed:     r.speed,
            battery:   r.energy,
            status:    r.status.as_str(),
            zone:      r.zone.as_deref(),
            timestamp: r.timestamp_ms,
        }
    }
}

/// Appends publish payloads to a JSON-lines file.  Tick summaries are not
/// part of the message stream and are dropped.
pub struct JsonLinesWriter {
    out:      BufWriter<File>,
    finished: bool,
}

impl JsonLinesWriter {
    /// Create (or truncate) `telemetry.jsonl` in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let file = File::create(dir.join("telemetry.jsonl"))?;
        Ok(Self { out: BufWriter::new(file), finished: false })
    }
}

impl TelemetryWriter for JsonLinesWriter {
    fn write_records(&mut self, _tick: Tick, records: &[TelemetryRecord]) -> OutputResult<()> {
        for r in records {
            serde_json::to_writer(&mut self.out, &PublishPayload::from(r))?;
            self.out.write_all(b"\n")?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.out.flush()?;
        Ok(())
    }
}
