use agv_core::AgvError;
use agv_fleet::FleetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] AgvError),

    #[error("{what} given twice; use either routes or vehicles")]
    Conflict { what: &'static str },

    #[error("fleet error: {0}")]
    Fleet(#[from] FleetError),
}

pub type SimResult<T> = Result<T, SimError>;
