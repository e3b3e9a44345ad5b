//! `agv-output` — telemetry writers for the AGV fleet twin.
//!
//! Three backends are provided:
//!
//! | Feature   | Backend     | Files created                                              |
//! |-----------|-------------|------------------------------------------------------------|
//! | *(none)*  | CSV         | `telemetry.csv`, `tick_summaries.csv`, `map_coverage.csv`  |
//! | *(none)*  | JSON lines  | `telemetry.jsonl`                                          |
//! | `sqlite`  | SQLite      | `telemetry.db`                                             |
//!
//! All backends implement [`TelemetryWriter`] and are driven by
//! [`TelemetryObserver`], which implements `agv_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use agv_output::{CsvWriter, TelemetryObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = TelemetryObserver::new(writer, &config);
//! sim.run(&mut obs);
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod jsonl;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use crate::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use jsonl::{JsonLinesWriter, PublishPayload};
pub use observer::TelemetryObserver;
pub use row::{MapCoverageRow, TickSummaryRow};
pub use writer::TelemetryWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
