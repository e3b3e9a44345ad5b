use thiserror::Error;

use agv_core::VehicleId;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("route has no waypoints")]
    Empty,

    #[error("waypoint {index} is not finite")]
    NonFiniteWaypoint { index: usize },

    #[error("route file has no rows for {0}")]
    MissingVehicle(VehicleId),

    #[error("{vehicle} lists sequence number {seq} twice")]
    DuplicateSeq { vehicle: VehicleId, seq: u32 },

    #[error("route parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RouteResult<T> = Result<T, RouteError>;
