//! Fleet configuration.
//!
//! One record parameterizes every motion variant: waypoint fleets, the
//! manually driven probe, and the path-confined probe all read their speed
//! and drain rules from a [`FleetConfig`].

use crate::{FleetError, FleetResult};

/// How the collision check looks ahead.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LookAhead {
    /// Compare the candidate position with each sibling's pre-tick position
    /// using the plain safety distance.  Arrival snaps are never checked.
    #[default]
    Candidate,
    /// Widen the bubble by one step and check arrival snaps as well.
    ///
    /// A sibling moves at most one step per tick, so two vehicles that start
    /// a tick at or beyond the safety distance still are at its end.
    Swept,
}

/// When energy is drained.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DrainPolicy {
    /// Drain only on ticks where a nonzero displacement was committed.
    #[default]
    OnDisplacement,
    /// Drain on every tick the vehicle is active, moving or not.
    WhileActive,
}

/// Motion parameters shared by a whole fleet.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FleetConfig {
    /// Distance travelled per tick, in grid units.  Default: 2.5.
    pub speed: f32,

    /// Minimum separation between active vehicles.  Default: 8.
    pub safety_distance: f32,

    pub drain_policy: DrainPolicy,

    /// Energy removed per draining tick.  Energy runs from 100 down to 0.
    pub drain_per_tick: f32,

    /// Ticks before vehicle `i` activates.  Empty means everyone starts at
    /// tick 0; otherwise there must be one entry per vehicle.
    pub activation_delays: Vec<u64>,

    pub look_ahead: LookAhead,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            speed:             2.5,
            safety_distance:   8.0,
            drain_policy:      DrainPolicy::OnDisplacement,
            drain_per_tick:    0.05,
            activation_delays: Vec::new(),
            look_ahead:        LookAhead::Candidate,
        }
    }
}

impl FleetConfig {
    /// Delay vehicle `i` by `i * interval` ticks, for `count` vehicles.
    pub fn staggered(mut self, count: usize, interval: u64) -> Self {
        self.activation_delays = (0..count as u64).map(|i| i * interval).collect();
        self
    }

    /// Activation delay for the vehicle at `index`.
    #[inline]
    pub fn delay_for(&self, index: usize) -> u64 {
        self.activation_delays.get(index).copied().unwrap_or(0)
    }

    /// Radius of the bubble used by the collision check.
    #[inline]
    pub fn bubble(&self) -> f32 {
        match self.look_ahead {
            LookAhead::Candidate => self.safety_distance,
            LookAhead::Swept     => self.safety_distance + self.speed,
        }
    }

    pub fn validate(&self) -> FleetResult<()> {
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(FleetError::InvalidConfig(format!("speed {} must be positive", self.speed)));
        }
        if !(self.safety_distance.is_finite() && self.safety_distance >= 0.0) {
            return Err(FleetError::InvalidConfig(format!(
                "safety_distance {} must be non-negative",
                self.safety_distance
            )));
        }
        if !(self.drain_per_tick.is_finite() && self.drain_per_tick >= 0.0) {
            return Err(FleetError::InvalidConfig(format!(
                "drain_per_tick {} must be non-negative",
                self.drain_per_tick
            )));
        }
        Ok(())
    }
}
