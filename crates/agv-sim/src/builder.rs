//! Fluent builder for constructing a [`Sim`].

use agv_core::SimConfig;
use agv_fleet::{FleetConfig, FleetController, Vehicle};
use agv_map::Floor;
use agv_route::Route;

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<F>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — total ticks, seed, tick duration, publish interval
/// - `F: Floor` — what vehicles move on ([`agv_map::MapEngine`] or
///   [`agv_map::OpenFloor`])
/// - [`FleetConfig`] — speed, safety distance, drain, activation delays
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default                                 |
/// |------------------|-----------------------------------------|
/// | `.routes(v)`     | No vehicles                             |
/// | `.vehicles(v)`   | No vehicles (exclusive with `.routes`)  |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, engine, FleetConfig::default().staggered(3, 10))
///     .routes(routes)
///     .build()?;
/// sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder<F: Floor> {
    config:   SimConfig,
    floor:    F,
    fleet:    FleetConfig,
    routes:   Option<Vec<Route>>,
    vehicles: Option<Vec<Vehicle>>,
}

impl<F: Floor> SimBuilder<F> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, floor: F, fleet: FleetConfig) -> Self {
        Self {
            config,
            floor,
            fleet,
            routes:   None,
            vehicles: None,
        }
    }

    /// One vehicle per route, parked on the route's first waypoint.
    pub fn routes(mut self, routes: Vec<Route>) -> Self {
        self.routes = Some(routes);
        self
    }

    /// Pre-built vehicles, for custom start points or names.
    pub fn vehicles(mut self, vehicles: Vec<Vehicle>) -> Self {
        self.vehicles = Some(vehicles);
        self
    }

    /// Validate inputs, build the fleet, and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<F>> {
        self.config.validate()?;

        let fleet = match (self.routes, self.vehicles) {
            (Some(_), Some(_)) => return Err(SimError::Conflict { what: "fleet" }),
            (Some(routes), None)   => FleetController::new(self.fleet, routes)?,
            (None, Some(vehicles)) => FleetController::from_vehicles(self.fleet, vehicles)?,
            (None, None)           => FleetController::from_vehicles(self.fleet, Vec::new())?,
        };

        tracing::info!(
            vehicles    = fleet.len(),
            total_ticks = self.config.total_ticks,
            tick_ms     = self.config.tick_duration_ms,
            "simulation built",
        );

        Ok(Sim {
            clock:  self.config.make_clock(),
            config: self.config,
            floor:  self.floor,
            fleet,
        })
    }
}
