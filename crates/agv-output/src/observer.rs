//! `TelemetryObserver<W>` — bridges `SimObserver` to a `TelemetryWriter`.

use agv_core::{SimClock, SimConfig, Tick};
use agv_fleet::{TelemetryRecord, TickReport};
use agv_map::MapSnapshot;
use agv_sim::SimObserver;

use crate::row::{MapCoverageRow, TickSummaryRow};
use crate::writer::TelemetryWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes telemetry, tick summaries, and map coverage
/// to any [`TelemetryWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct TelemetryObserver<W: TelemetryWriter> {
    writer:      W,
    clock:       SimClock,
    /// Version of the last map written; unchanged maps are skipped.
    map_version: Option<u64>,
    last_error:  Option<OutputError>,
}

impl<W: TelemetryWriter> TelemetryObserver<W> {
    /// Create an observer backed by `writer`, using `config` for wall-clock
    /// conversion.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            clock:       config.make_clock(),
            map_version: None,
            last_error:  None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                tracing::warn!(error = %e, "telemetry write failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: TelemetryWriter> SimObserver for TelemetryObserver<W> {
    fn on_tick_end(&mut self, report: &TickReport) {
        let row = TickSummaryRow::from_report(report, self.clock.unix_ms_at(report.tick));
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_publish(
        &mut self,
        tick:    Tick,
        unix_ms: i64,
        records: &[TelemetryRecord],
        map:     Option<&MapSnapshot>,
    ) {
        if !records.is_empty() {
            let result = self.writer.write_records(tick, records);
            self.store_err(result);
        }

        if let Some(map) = map {
            if self.map_version != Some(map.version()) {
                self.map_version = Some(map.version());
                let result = self.writer.write_map_coverage(&MapCoverageRow::from_snapshot(tick.0, unix_ms, map));
                self.store_err(result);
            }
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
