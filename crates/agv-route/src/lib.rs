//! `agv-route` — waypoint routes, activation queue, and CSV loading.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`route`]      | `Route` — non-empty cyclic waypoint sequence             |
//! | [`activation`] | `ActivationQueue` (`BTreeMap<Tick, Vec<VehicleId>>`)     |
//! | [`loader`]     | `load_routes_csv`, `load_routes_reader`                  |
//! | [`error`]      | `RouteError`, `RouteResult<T>`                           |
//!
//! # Cycle model
//!
//! A vehicle holds a target index into its route.  Reaching the target
//! advances the index modulo the route length, so the last waypoint is
//! followed by the first and a route never ends:
//!
//! ```text
//! next_index(i) = (i + 1) % len
//! ```

pub mod activation;
pub mod error;
pub mod loader;
pub mod route;


pub use activation::ActivationQueue;
pub use error::{RouteError, RouteResult};
pub use loader::{load_routes_csv, load_routes_reader};
pub use route::Route;
