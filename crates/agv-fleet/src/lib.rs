//! `agv-fleet` — the Fleet Motion Controller.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`config`]     | `FleetConfig`, `LookAhead`, `DrainPolicy`                    |
//! | [`vehicle`]    | `Vehicle`, `TelemetryRecord`                                 |
//! | [`decision`]   | `Decision`, `decide` — the pure per-vehicle rule             |
//! | [`controller`] | `FleetController`, `TickReport`                              |
//! | [`manual`]     | `ManualDrive`, `DriveInput`, `ScriptedInput`, `WanderInput`  |
//! | [`error`]      | `FleetError`, `FleetResult<T>`                               |
//!
//! # Two-phase tick
//!
//! 1. **Decide** (optionally parallel): every vehicle's [`Decision`] is
//!    computed from the *pre-tick* fleet, read through `&[Vehicle]`.  Nothing
//!    is mutated, so the result does not depend on vehicle order.
//! 2. **Apply** (sequential, ascending `VehicleId`): each decision's move is
//!    committed through a [`Floor`](agv_map::Floor), which may still refuse
//!    it (walls).
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Runs the decide phase on Rayon's thread pool.             |
//! | `serde`    | Derives `Serialize`/`Deserialize` on configs and records. |

pub mod config;
pub mod controller;
pub mod decision;
pub mod error;
pub mod manual;
pub mod vehicle;


pub use config::{DrainPolicy, FleetConfig, LookAhead};
pub use controller::{FleetController, TickReport};
pub use decision::{Decision, decide};
pub use error::{FleetError, FleetResult};
pub use manual::{DriveInput, ManualDrive, ScriptedInput, WanderInput};
pub use vehicle::{TelemetryRecord, Vehicle};
