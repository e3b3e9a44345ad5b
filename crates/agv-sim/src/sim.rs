//! The `Sim` struct and its tick loop.

use agv_core::{SimClock, SimConfig, Tick};
use agv_fleet::{FleetController, TickReport};
use agv_map::Floor;

use crate::SimObserver;

/// The main simulation runner.
///
/// `Sim<F>` owns the floor and the fleet and drives them one tick at a time.
/// The fleet controller does the per-tick work; `Sim` adds the clock, the
/// end condition, publish throttling, and observer callbacks.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<F: Floor> {
    /// Global configuration (total ticks, tick duration, publish interval).
    pub config: SimConfig,

    /// Current tick and its wall-clock mapping.
    pub clock: SimClock,

    /// What the fleet drives on.  With a `MapEngine` floor every accepted
    /// move also scans, so the discovered map grows as the fleet drives.
    pub floor: F,

    pub fleet: FleetController,
}

impl<F: Floor> Sim<F> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary and returns the tick the
    /// run stopped at.  Use [`NoopObserver`][crate::NoopObserver] if you
    /// don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> Tick {
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer);
        }
        observer.on_sim_end(self.clock.current_tick);
        tracing::info!(tick = %self.clock.current_tick, "simulation finished");
        self.clock.current_tick
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.step(observer);
        }
    }

    /// Process one tick and advance the clock.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> TickReport {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        let report = self.fleet.tick(now, &mut self.floor);
        observer.on_tick_end(&report);

        if self.config.publishes_at(now) {
            self.publish(now, observer);
        }

        self.clock.advance();
        report
    }

    // ── Publishing ────────────────────────────────────────────────────────

    fn publish<O: SimObserver>(&mut self, now: Tick, observer: &mut O) {
        let unix_ms = self.clock.unix_ms_at(now);
        let records = self.fleet.telemetry(&self.floor, unix_ms);
        let map = self.floor.snapshot();
        tracing::trace!(%now, records = records.len(), "publish");
        observer.on_publish(now, unix_ms, &records, map.as_ref());
    }
}
