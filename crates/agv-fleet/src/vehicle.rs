//! Per-vehicle state and the telemetry record it publishes.

use agv_core::{MotionState, Point, Pose, VehicleId};
use agv_route::Route;

/// Energy of a freshly charged vehicle.
pub const FULL_ENERGY: f32 = 100.0;

/// One waypoint-following vehicle.
///
/// Before activation a vehicle sits at `start`, reports `Waiting`, and is
/// invisible to its siblings' collision checks.
#[derive(Clone, Debug)]
pub struct Vehicle {
    pub id:    VehicleId,
    pub name:  String,
    pub pose:  Pose,
    /// Where the vehicle waits before activation.
    pub start: Point,
    pub route: Route,
    /// Index of the waypoint being sought.  Always `< route.len()`.
    pub target: usize,
    pub state:  MotionState,
    /// In `[0, 100]`, never increases.
    pub energy: f32,
    pub active: bool,
    /// Total distance committed, in grid units.
    pub odometer: f32,
    /// Distance committed in the most recent tick.
    pub last_step: f32,
    pub waypoints_reached: u64,
}

impl Vehicle {
    /// A vehicle parked on its route's first waypoint, seeking that waypoint.
    pub fn new(id: VehicleId, route: Route) -> Self {
        let start = route.waypoint(0);
        Self {
            id,
            name: id.default_name(),
            pose: Pose::at(start),
            start,
            route,
            target: 0,
            state: MotionState::Waiting,
            energy: FULL_ENERGY,
            active: false,
            odometer: 0.0,
            last_step: 0.0,
            waypoints_reached: 0,
        }
    }

    /// Park the vehicle at `start` instead of the first waypoint.
    pub fn starting_at(mut self, start: Point) -> Self {
        self.start = start;
        self.pose = Pose::at(start);
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.pose.position
    }

    /// The waypoint currently being sought.
    #[inline]
    pub fn target_point(&self) -> Point {
        self.route.waypoint(self.target)
    }

    /// Remove `amount` energy, clamping at zero.
    pub fn drain(&mut self, amount: f32) {
        self.energy = (self.energy - amount).clamp(0.0, FULL_ENERGY);
    }

    /// Snapshot for publishing.  Coordinates are rounded to two decimals.
    pub fn telemetry(&self, timestamp_ms: i64) -> TelemetryRecord {
        let p = self.position().rounded_2dp();
        TelemetryRecord {
            id:                self.id.0,
            name:              self.name.clone(),
            x:                 p.x,
            y:                 p.y,
            heading:           self.pose.heading_deg,
            status:            self.state,
            energy:            self.energy,
            distance:          self.odometer,
            speed:             self.last_step,
            zone:              None,
            waypoints_reached: self.waypoints_reached,
            timestamp_ms,
        }
    }
}

// ── TelemetryRecord ───────────────────────────────────────────────────────────

/// What one vehicle publishes per publish interval.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TelemetryRecord {
    pub id:                u32,
    pub name:              String,
    pub x:                 f32,
    pub y:                 f32,
    /// Degrees.
    pub heading:           f32,
    pub status:            MotionState,
    pub energy:            f32,
    pub distance:          f32,
    /// Grid units covered in the last tick.
    pub speed:             f32,
    /// Name of the floor zone the vehicle is in, when the floor has a layout.
    pub zone:              Option<String>,
    pub waypoints_reached: u64,
    pub timestamp_ms:      i64,
}
