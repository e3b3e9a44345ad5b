//! Simulation observer trait for progress reporting and telemetry collection.

use agv_core::Tick;
use agv_fleet::{TelemetryRecord, TickReport};
use agv_map::MapSnapshot;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, report: &TickReport) {
///         if report.tick.0 % self.interval == 0 {
///             println!("{}: {} moving, {} waiting", report.tick, report.moving, report.waiting);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after the fleet has moved, with the tick's summary.
    fn on_tick_end(&mut self, _report: &TickReport) {}

    /// Called on publish ticks (every `config.publish_interval_ticks`).
    ///
    /// `records` holds one entry per vehicle in id order, stamped with
    /// `unix_ms`.  `map` is the floor's discovered map when the floor keeps
    /// one.  Both reflect post-tick state.
    fn on_publish(
        &mut self,
        _tick:    Tick,
        _unix_ms: i64,
        _records: &[TelemetryRecord],
        _map:     Option<&MapSnapshot>,
    ) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
