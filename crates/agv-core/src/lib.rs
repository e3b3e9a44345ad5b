//! `agv-core` — foundational types for the AGV fleet twin.
//!
//! This crate is a dependency of every other `agv-*` crate.  It has no
//! `agv-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `VehicleId`                                           |
//! | [`geom`]        | `Point`, `Segment`, `Pose`, nearest-point projection  |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `VehicleRng` (per-vehicle), `SimRng` (global)         |
//! | [`status`]      | `MotionState` enum                                    |
//! | [`error`]       | `AgvError`, `AgvResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geom;
pub mod ids;
pub mod rng;
pub mod status;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{AgvError, AgvResult};
pub use geom::{Point, Pose, Segment};
pub use ids::VehicleId;
pub use rng::{SimRng, VehicleRng};
pub use status::MotionState;
pub use time::{SimClock, SimConfig, Tick};
