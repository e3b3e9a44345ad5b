//! Framework error type.
//!
//! Sub-crates define their own error enums and either convert into `AgvError`
//! or wrap it as one variant.  Prefer whichever keeps error sites clean.

use thiserror::Error;

use crate::VehicleId;

/// The top-level error type for `agv-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum AgvError {
    #[error("vehicle {0} not found")]
    VehicleNotFound(VehicleId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `agv-*` crates.
pub type AgvResult<T> = Result<T, AgvError>;
