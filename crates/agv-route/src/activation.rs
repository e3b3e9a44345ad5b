//! `ActivationQueue` — staggered vehicle start-up.
//!
//! Vehicles do not all start moving on the first tick.  Each one is queued at
//! the tick its activation delay expires; every tick the fleet drains the
//! vehicles that have come due and flips them active.  A vehicle leaves the
//! queue when it is drained, so activation happens exactly once.
//!
//! `drain_due` takes everything at or before `now`, not just `now` itself,
//! so a caller that starts stepping late (or skips ticks) still activates
//! every vehicle whose delay has elapsed.

use std::collections::BTreeMap;

use agv_core::{Tick, VehicleId};

/// Ticks → vehicles that become active at that tick.
#[derive(Clone, Debug, Default)]
pub struct ActivationQueue {
    inner: BTreeMap<Tick, Vec<VehicleId>>,
    /// Cached total vehicle count for O(1) `len()`.
    total: usize,
}

impl ActivationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue vehicle `i` at `start + delays[i]`.
    pub fn from_delays(delays: &[u64], start: Tick) -> Self {
        let mut queue = Self::new();
        for (i, &delay) in delays.iter().enumerate() {
            queue.push(start + delay, VehicleId(i as u32));
        }
        queue
    }

    /// Schedule `vehicle` to activate at `tick`.
    pub fn push(&mut self, tick: Tick, vehicle: VehicleId) {
        self.inner.entry(tick).or_default().push(vehicle);
        self.total += 1;
    }

    /// Remove and return every vehicle due at or before `now`, in tick
    /// order.  Empty when nothing is due (no allocation).
    pub fn drain_due(&mut self, now: Tick) -> Vec<VehicleId> {
        let later = self.inner.split_off(&(now + 1));
        let due = std::mem::replace(&mut self.inner, later);
        let vehicles: Vec<VehicleId> = due.into_values().flatten().collect();
        self.total -= vehicles.len();
        vehicles
    }

    /// The earliest tick with at least one queued vehicle.
    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    /// Number of vehicles still waiting to activate.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
