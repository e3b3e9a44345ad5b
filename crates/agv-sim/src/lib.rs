//! `agv-sim` — tick loop orchestrator for the AGV fleet twin.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① on_tick_start
//!   ② FleetController::tick   — activation, decide, apply, drain
//!   ③ on_tick_end(report)
//!   ④ every publish_interval_ticks:
//!        on_publish(tick, unix_ms, telemetry, map snapshot)
//! ```
//!
//! Publishing is throttled independently of the tick rate: a 200 ms tick with
//! `publish_interval_ticks = 5` publishes once per simulated second.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the fleet's decide phase on Rayon's thread pool.  |
//! | `serde`    | Serde derives on every config and record type.         |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use agv_core::SimConfig;
//! use agv_fleet::FleetConfig;
//! use agv_map::OpenFloor;
//! use agv_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default(), OpenFloor, FleetConfig::default())
//!     .routes(routes)
//!     .build()?;
//! sim.run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
