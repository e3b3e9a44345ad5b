//! The `TelemetryWriter` trait implemented by all backend writers.

use agv_core::Tick;
use agv_fleet::TelemetryRecord;

use crate::{MapCoverageRow, OutputResult, TickSummaryRow};

/// Trait implemented by the CSV, JSON-lines, and SQLite writers.
///
/// A [`TelemetryObserver`](crate::TelemetryObserver) keeps the first error
/// these return; retrieve it with
/// [`TelemetryObserver::take_error`](crate::TelemetryObserver::take_error).
pub trait TelemetryWriter {
    /// Write one publish batch: a record per vehicle, all for `tick`.
    fn write_records(&mut self, tick: Tick, records: &[TelemetryRecord]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Record how much of the map is known.  Backends without a coverage
    /// table ignore it.
    fn write_map_coverage(&mut self, _row: &MapCoverageRow) -> OutputResult<()> {
        Ok(())
    }

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
