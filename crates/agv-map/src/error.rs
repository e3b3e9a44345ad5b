//! Map-subsystem error type.

use thiserror::Error;

/// Errors produced by `agv-map`.  All of them are construction-time
/// configuration defects; runtime motion never errors.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("grid must be at least 1x1, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("zone {name:?} has zero height or width")]
    DegenerateZone { name: String },

    #[error("invalid sensor configuration: {0}")]
    InvalidSensor(String),

    #[error("corridor network has no segments")]
    EmptyPathNetwork,

    #[error("corridor segment {index} is degenerate or non-finite")]
    DegenerateSegment { index: usize },
}

pub type MapResult<T> = Result<T, MapError>;
