//! `FleetController` — activation, decide, apply, drain.

use agv_core::{MotionState, Tick, VehicleId};
use agv_map::Floor;
use agv_route::{ActivationQueue, Route};

use crate::{Decision, DrainPolicy, FleetConfig, FleetError, FleetResult, TelemetryRecord, Vehicle, decide};

// ── TickReport ────────────────────────────────────────────────────────────────

/// Fleet-wide summary of one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickReport {
    pub tick:      Tick,
    /// Vehicles that became active this tick.
    pub activated: Vec<VehicleId>,
    pub moving:    usize,
    pub waiting:   usize,
    pub idle:      usize,
    /// Waypoints reached this tick.
    pub arrivals:  usize,
    /// Vehicles that held position for a sibling.
    pub yielded:   usize,
    /// Moves the floor refused.
    pub rejected:  usize,
}

impl TickReport {
    fn count(&mut self, state: MotionState) {
        match state {
            MotionState::Moving  => self.moving += 1,
            MotionState::Waiting => self.waiting += 1,
            MotionState::Idle    => self.idle += 1,
        }
    }
}

// ── FleetController ───────────────────────────────────────────────────────────

/// Drives a fleet of waypoint-following vehicles over a [`Floor`].
pub struct FleetController {
    config:     FleetConfig,
    vehicles:   Vec<Vehicle>,
    activation: ActivationQueue,
}

impl FleetController {
    /// One vehicle per route, `VehicleId`s assigned in route order.  Each
    /// vehicle starts on its route's first waypoint.
    pub fn new(config: FleetConfig, routes: Vec<Route>) -> FleetResult<Self> {
        let vehicles = routes
            .into_iter()
            .enumerate()
            .map(|(i, route)| Vehicle::new(VehicleId(i as u32), route))
            .collect();
        Self::from_vehicles(config, vehicles)
    }

    /// Take pre-built vehicles.  `vehicles[i].id` must be `VehicleId(i)`;
    /// ids are reassigned to guarantee it.
    pub fn from_vehicles(config: FleetConfig, mut vehicles: Vec<Vehicle>) -> FleetResult<Self> {
        config.validate()?;
        let delays = config.activation_delays.len();
        if delays != 0 && delays != vehicles.len() {
            return Err(FleetError::DelayCountMismatch { delays, vehicles: vehicles.len() });
        }
        for (i, v) in vehicles.iter_mut().enumerate() {
            v.id = VehicleId(i as u32);
            v.active = false;
            v.state = MotionState::Waiting;
        }
        let delays: Vec<u64> = (0..vehicles.len()).map(|i| config.delay_for(i)).collect();
        let activation = ActivationQueue::from_delays(&delays, Tick::ZERO);
        tracing::debug!(vehicles = vehicles.len(), ?delays, "fleet built");
        Ok(Self { config, vehicles, activation })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn config(&self) -> &FleetConfig {
        &self.config
    }

    #[inline]
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    #[inline]
    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(id.index())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Vehicles still waiting for their activation delay to elapse.
    #[inline]
    pub fn pending_activations(&self) -> usize {
        self.activation.len()
    }

    /// One record per vehicle, in id order, tagged with the zone `floor`
    /// reports under each vehicle.
    pub fn telemetry<F: Floor>(&self, floor: &F, timestamp_ms: i64) -> Vec<TelemetryRecord> {
        self.vehicles
            .iter()
            .map(|v| TelemetryRecord {
                zone: floor.zone_at(v.position()).map(|z| z.name.clone()),
                ..v.telemetry(timestamp_ms)
            })
            .collect()
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance every vehicle by one tick.
    pub fn tick<F: Floor>(&mut self, now: Tick, floor: &mut F) -> TickReport {
        let mut report = TickReport { tick: now, ..TickReport::default() };

        // ── Phase 1: activation ───────────────────────────────────────────
        for id in self.activation.drain_due(now) {
            if let Some(v) = self.vehicles.get_mut(id.index()) {
                v.active = true;
                tracing::info!(vehicle = %v.name, %now, "activated");
                report.activated.push(id);
            }
        }

        // ── Phase 2: decide against the pre-tick fleet ────────────────────
        let decisions = self.decide_all();

        // ── Phase 3: apply in id order ────────────────────────────────────
        for (v, decision) in self.vehicles.iter_mut().zip(decisions) {
            let before = v.position();
            let state = match decision {
                Decision::Hold => MotionState::Waiting,
                Decision::Yield { blocker } => {
                    tracing::debug!(vehicle = %v.name, %blocker, "yielding");
                    report.yielded += 1;
                    MotionState::Waiting
                }
                Decision::Arrive { to, next } => {
                    if floor.try_move_to(&mut v.pose, to) {
                        v.target = next;
                        v.waypoints_reached += 1;
                        report.arrivals += 1;
                        MotionState::Moving
                    } else {
                        report.rejected += 1;
                        MotionState::Waiting
                    }
                }
                Decision::Advance { to } => {
                    if floor.try_move_to(&mut v.pose, to) {
                        MotionState::Moving
                    } else {
                        tracing::debug!(vehicle = %v.name, %to, "floor refused move");
                        report.rejected += 1;
                        MotionState::Waiting
                    }
                }
            };

            let travelled = before.distance(v.position());
            v.odometer += travelled;
            v.last_step = travelled;
            v.state = state;
            if v.active {
                let drains = match self.config.drain_policy {
                    DrainPolicy::WhileActive    => true,
                    DrainPolicy::OnDisplacement => travelled > 0.0,
                };
                if drains {
                    v.drain(self.config.drain_per_tick);
                }
            }
            report.count(state);
        }

        report
    }

    #[cfg(not(feature = "parallel"))]
    fn decide_all(&self) -> Vec<Decision> {
        self.vehicles
            .iter()
            .map(|v| decide(v, &self.vehicles, &self.config))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn decide_all(&self) -> Vec<Decision> {
        use rayon::prelude::*;

        self.vehicles
            .par_iter()
            .map(|v| decide(v, &self.vehicles, &self.config))
            .collect()
    }
}
