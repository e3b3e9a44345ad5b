//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  The mapping to
//! wall-clock time is held in `SimClock`:
//!
//!   wall_time_ms = start_unix_ms + tick * tick_duration_ms
//!
//! An integer tick keeps activation delays and publish intervals exact.  The
//! default tick is 200 ms (a 5 Hz physics step); observers may be throttled
//! to a coarser publish interval without touching the physics rate.

use std::fmt;

use crate::{AgvError, AgvResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and Unix wall-clock milliseconds.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Unix timestamp (ms since epoch) of tick 0.
    pub start_unix_ms: i64,
    /// How many real milliseconds one tick represents.
    pub tick_duration_ms: u32,
    /// Advanced once per `Sim::step`.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(start_unix_ms: i64, tick_duration_ms: u32) -> Self {
        Self {
            start_unix_ms,
            tick_duration_ms,
            current_tick: Tick::ZERO,
        }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated milliseconds since tick 0.
    #[inline]
    pub fn elapsed_ms(&self) -> i64 {
        self.current_tick.0 as i64 * self.tick_duration_ms as i64
    }

    /// Unix timestamp (ms) of an arbitrary tick.
    #[inline]
    pub fn unix_ms_at(&self, tick: Tick) -> i64 {
        self.start_unix_ms + tick.0 as i64 * self.tick_duration_ms as i64
    }

    /// Unix timestamp (ms) corresponding to `current_tick`.
    #[inline]
    pub fn current_unix_ms(&self) -> i64 {
        self.unix_ms_at(self.current_tick)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.elapsed_ms().max(0);
        write!(f, "{} (+{}.{:03} s)", self.current_tick, ms / 1_000, ms % 1_000)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Built in memory by the application, or deserialized from JSON with the
/// `serde` feature.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Unix timestamp (ms) for tick 0.
    pub start_unix_ms: i64,

    /// Milliseconds per tick.  Default: 200 (5 Hz).
    pub tick_duration_ms: u32,

    /// Total ticks `Sim::run` executes.
    pub total_ticks: u64,

    /// Seed for randomized inputs such as wander exploration.  Fleet runs
    /// draw no random numbers and are identical for every seed.
    pub seed: u64,

    /// Publish telemetry every N ticks.  1 = every tick; 0 disables publishing.
    pub publish_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start_unix_ms:          0,
            tick_duration_ms:       200,
            total_ticks:            1_000,
            seed:                   42,
            publish_interval_ticks: 1,
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start_unix_ms, self.tick_duration_ms)
    }

    /// `true` if telemetry should be published at the end of `tick`.
    #[inline]
    pub fn publishes_at(&self, tick: Tick) -> bool {
        self.publish_interval_ticks > 0 && tick.0.is_multiple_of(self.publish_interval_ticks)
    }

    pub fn validate(&self) -> AgvResult<()> {
        if self.tick_duration_ms == 0 {
            return Err(AgvError::Config("tick_duration_ms must be positive".into()));
        }
        Ok(())
    }
}
