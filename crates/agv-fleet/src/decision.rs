//! The per-vehicle waypoint rule.
//!
//! [`decide`] looks at one vehicle and a read-only view of the fleet as it
//! stood at the start of the tick, and says what the vehicle wants to do.
//! It never mutates anything, so the controller can evaluate it for every
//! vehicle before applying any of them.
//!
//! ```text
//! d = |target - pos|
//! d ≤ step   →  Arrive  (snap onto target, advance index)
//! otherwise  →  candidate = pos + (target - pos) · step / d
//!               any active sibling within the bubble of candidate → Yield
//!               else → Advance
//! ```

use agv_core::{Point, VehicleId};

use crate::{FleetConfig, LookAhead, Vehicle};

/// What a vehicle intends to do this tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Decision {
    /// Not yet active: stay at the start point.
    Hold,
    /// Within one step of the target: snap onto it and seek `next`.
    Arrive { to: Point, next: usize },
    /// Move one step toward the target.
    Advance { to: Point },
    /// A sibling is inside the bubble around where we would end up.
    Yield { blocker: VehicleId },
}

impl Decision {
    /// Destination of the intended move, if any.
    #[inline]
    pub fn destination(&self) -> Option<Point> {
        match *self {
            Decision::Arrive { to, .. } | Decision::Advance { to } => Some(to),
            Decision::Hold | Decision::Yield { .. } => None,
        }
    }
}

/// Decide `vehicle`'s move against the pre-tick `fleet`.
///
/// `fleet` may include `vehicle` itself; it is skipped by id.  Inactive
/// siblings are ignored.
pub fn decide(vehicle: &Vehicle, fleet: &[Vehicle], config: &FleetConfig) -> Decision {
    if !vehicle.active {
        return Decision::Hold;
    }

    let pos    = vehicle.position();
    let target = vehicle.target_point();
    let d      = pos.distance(target);
    let step   = config.speed;

    if d <= step {
        let arrive = Decision::Arrive { to: target, next: vehicle.route.next_index(vehicle.target) };
        return match config.look_ahead {
            LookAhead::Candidate => arrive,
            LookAhead::Swept => match blocker(vehicle.id, target, fleet, config.bubble()) {
                Some(blocker) => Decision::Yield { blocker },
                None          => arrive,
            },
        };
    }

    let candidate = pos + (target - pos) * (step / d);
    match blocker(vehicle.id, candidate, fleet, config.bubble()) {
        Some(blocker) => Decision::Yield { blocker },
        None          => Decision::Advance { to: candidate },
    }
}

/// First active sibling strictly closer than `bubble` to `p`.
fn blocker(me: VehicleId, p: Point, fleet: &[Vehicle], bubble: f32) -> Option<VehicleId> {
    fleet
        .iter()
        .filter(|other| other.active && other.id != me)
        .find(|other| other.position().distance(p) < bubble)
        .map(|other| other.id)
}
