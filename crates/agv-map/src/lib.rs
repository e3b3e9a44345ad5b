//! `agv-map` — the Map & Sensing Engine.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`cell`]      | `CellState` (`Unknown`, `Free`, `Wall`)                     |
//! | [`grid`]      | `Grid` — dense row-major cell array                         |
//! | [`plan`]      | `Zone`, `FloorPlan` (border + zone outlines)                |
//! | [`engine`]    | `MapEngine`, `SensorConfig` — scan, reveal, move            |
//! | [`snapshot`]  | `MapSnapshot` — immutable, shareable view for observers     |
//! | [`floor`]     | `Floor` trait, `OpenFloor`                                  |
//! | [`corridor`]  | `PathNetwork` (R-tree of corridor segments)                 |
//! | [`error`]     | `MapError`, `MapResult<T>`                                  |
//!
//! # Two grids
//!
//! The engine owns a *ground truth* grid, stamped once from a [`FloorPlan`]
//! and never written again, and a *discovered* grid that starts fully
//! `Unknown`.  Knowledge only ever flows from ground truth into the
//! discovered grid (raycast scans or a full reveal), so discovered cells
//! never regress to `Unknown`.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public config types.    |

pub mod cell;
pub mod corridor;
pub mod engine;
pub mod error;
pub mod floor;
pub mod grid;
pub mod plan;
pub mod snapshot;


pub use cell::CellState;
pub use corridor::PathNetwork;
pub use engine::{MapEngine, SensorConfig};
pub use error::{MapError, MapResult};
pub use floor::{Floor, OpenFloor};
pub use grid::Grid;
pub use plan::{FloorPlan, Zone};
pub use snapshot::{CellCounts, MapSnapshot};
