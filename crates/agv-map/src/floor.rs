//! The motion-validation seam between vehicles and the world.
//!
//! Everything that moves a vehicle goes through a [`Floor`].  The fleet
//! controller is generic over it, so the same controller drives a fleet
//! across the mapped factory ([`MapEngine`]) or across an unobstructed plane
//! ([`OpenFloor`]) in headless telemetry runs.

use agv_core::{Point, Pose};

use crate::{MapEngine, MapSnapshot, Zone};

/// A surface vehicles move on.
pub trait Floor {
    /// Validate a move of `pose` to `target` and commit it if allowed.
    ///
    /// Returns `false` and leaves `pose` untouched when the move is refused.
    fn try_move_to(&mut self, pose: &mut Pose, target: Point) -> bool;

    /// Relative form of [`try_move_to`](Self::try_move_to).
    fn try_move(&mut self, pose: &mut Pose, dx: f32, dy: f32) -> bool {
        let target = pose.position + Point::new(dx, dy);
        self.try_move_to(pose, target)
    }

    /// Current discovered map, if this floor maintains one.
    fn snapshot(&mut self) -> Option<MapSnapshot> {
        None
    }

    /// Named zone under `p`, if this floor has a layout.
    fn zone_at(&self, _p: Point) -> Option<&Zone> {
        None
    }
}

/// An obstacle-free floor that accepts every finite move.
#[derive(Copy, Clone, Debug, Default)]
pub struct OpenFloor;

impl Floor for OpenFloor {
    fn try_move_to(&mut self, pose: &mut Pose, target: Point) -> bool {
        if !target.is_finite() {
            return false;
        }
        pose.move_to(target);
        true
    }
}

impl Floor for MapEngine {
    #[inline]
    fn try_move_to(&mut self, pose: &mut Pose, target: Point) -> bool {
        MapEngine::try_move_to(self, pose, target)
    }

    fn snapshot(&mut self) -> Option<MapSnapshot> {
        Some(MapEngine::snapshot(self))
    }

    #[inline]
    fn zone_at(&self, p: Point) -> Option<&Zone> {
        MapEngine::zone_at(self, p)
    }
}
