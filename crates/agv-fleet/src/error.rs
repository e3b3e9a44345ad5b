use agv_map::MapError;
use agv_route::RouteError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("invalid fleet configuration: {0}")]
    InvalidConfig(String),

    #[error("activation delay count ({delays}) does not match vehicle count ({vehicles})")]
    DelayCountMismatch { delays: usize, vehicles: usize },

    #[error("route error: {0}")]
    Route(#[from] RouteError),

    #[error("map error: {0}")]
    Map(#[from] MapError),
}

pub type FleetResult<T> = Result<T, FleetError>;
