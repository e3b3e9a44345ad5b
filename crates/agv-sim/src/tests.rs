//! Integration tests for agv-sim.

use agv_core::{MotionState, Point, SimConfig, Tick, VehicleId};
use agv_fleet::{FleetConfig, TelemetryRecord, TickReport, Vehicle};
use agv_map::{FloorPlan, MapEngine, MapSnapshot, OpenFloor};
use agv_route::Route;

use crate::{NoopObserver, SimBuilder, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(total_ticks: u64, publish_interval_ticks: u64) -> SimConfig {
    SimConfig {
        start_unix_ms:    1_000,
        tick_duration_ms: 200,
        total_ticks,
        seed:             42,
        publish_interval_ticks,
    }
}

fn route(pairs: &[(f32, f32)]) -> Route {
    Route::from_pairs(pairs).unwrap()
}

/// Records every callback it receives.
#[derive(Default)]
struct Recorder {
    starts:    Vec<Tick>,
    reports:   Vec<TickReport>,
    publishes: Vec<(Tick, i64, Vec<TelemetryRecord>)>,
    maps:      Vec<Option<MapSnapshot>>,
    ended:     Option<Tick>,
}

impl SimObserver for Recorder {
    fn on_tick_start(&mut self, tick: Tick) {
        self.starts.push(tick);
    }

    fn on_tick_end(&mut self, report: &TickReport) {
        self.reports.push(report.clone());
    }

    fn on_publish(
        &mut self,
        tick:    Tick,
        unix_ms: i64,
        records: &[TelemetryRecord],
        map:     Option<&MapSnapshot>,
    ) {
        self.publishes.push((tick, unix_ms, records.to_vec()));
        self.maps.push(map.cloned());
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.ended = Some(final_tick);
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::SimError;

    #[test]
    fn builds_with_routes() {
        let sim = SimBuilder::new(test_config(10, 1), OpenFloor, FleetConfig::default())
            .routes(vec![route(&[(0.0, 0.0), (10.0, 0.0)]), route(&[(5.0, 5.0)])])
            .build()
            .unwrap();
        assert_eq!(sim.fleet.len(), 2);
        assert_eq!(sim.clock.current_tick, Tick::ZERO);
    }

    #[test]
    fn empty_fleet_is_allowed() {
        let mut sim = SimBuilder::new(test_config(5, 1), OpenFloor, FleetConfig::default())
            .build()
            .unwrap();
        assert!(sim.fleet.is_empty());
        let mut rec = Recorder::default();
        assert_eq!(sim.run(&mut rec), Tick(5));
        assert!(rec.publishes.iter().all(|(_, _, r)| r.is_empty()));
    }

    #[test]
    fn zero_tick_duration_errors() {
        let mut config = test_config(10, 1);
        config.tick_duration_ms = 0;
        let result = SimBuilder::new(config, OpenFloor, FleetConfig::default()).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn routes_and_vehicles_conflict() {
        let result = SimBuilder::new(test_config(10, 1), OpenFloor, FleetConfig::default())
            .routes(vec![route(&[(0.0, 0.0)])])
            .vehicles(vec![Vehicle::new(VehicleId(0), route(&[(1.0, 1.0)]))])
            .build();
        assert!(matches!(result, Err(SimError::Conflict { .. })));
    }

    #[test]
    fn fleet_errors_propagate() {
        let fleet = FleetConfig { activation_delays: vec![0, 5, 10], ..FleetConfig::default() };
        let result = SimBuilder::new(test_config(10, 1), OpenFloor, fleet)
            .routes(vec![route(&[(0.0, 0.0)])])
            .build();
        assert!(matches!(result, Err(SimError::Fleet(_))));
    }
}

// ── Run loop ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn run_stops_at_end_tick() {
        let mut sim = SimBuilder::new(test_config(7, 1), OpenFloor, FleetConfig::default())
            .routes(vec![route(&[(0.0, 0.0), (50.0, 0.0)])])
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        let end = sim.run(&mut rec);

        assert_eq!(end, Tick(7));
        assert_eq!(rec.ended, Some(Tick(7)));
        assert_eq!(rec.starts, (0..7).map(Tick).collect::<Vec<_>>());
        assert_eq!(rec.reports.len(), 7);
        assert_eq!(rec.reports[3].tick, Tick(3));

        // A second run is a no-op apart from the end hook.
        let again = sim.run(&mut NoopObserver);
        assert_eq!(again, Tick(7));
    }

    #[test]
    fn run_ticks_ignores_end_tick() {
        let mut sim = SimBuilder::new(test_config(2, 1), OpenFloor, FleetConfig::default())
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run_ticks(5, &mut rec);
        assert_eq!(sim.clock.current_tick, Tick(5));
        assert_eq!(rec.reports.len(), 5);
        assert_eq!(rec.ended, None);
    }

    #[test]
    fn step_returns_the_tick_report() {
        let mut sim = SimBuilder::new(test_config(10, 1), OpenFloor, FleetConfig::default())
            .routes(vec![route(&[(0.0, 0.0), (10.0, 0.0)])])
            .build()
            .unwrap();
        let report = sim.step(&mut NoopObserver);
        assert_eq!(report.tick, Tick(0));
        assert_eq!(report.activated, vec![VehicleId(0)]);
        // First tick snaps onto waypoint 0, which it already sits on.
        assert_eq!(report.arrivals, 1);
    }

    #[test]
    fn staggered_activation_through_sim() {
        let fleet = FleetConfig::default().staggered(3, 4);
        let routes = vec![
            route(&[(0.0, 0.0), (100.0, 0.0)]),
            route(&[(0.0, 50.0), (100.0, 50.0)]),
            route(&[(0.0, 100.0), (100.0, 100.0)]),
        ];
        let mut sim = SimBuilder::new(test_config(20, 1), OpenFloor, fleet)
            .routes(routes)
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec);

        let activated: Vec<(u64, Vec<VehicleId>)> = rec
            .reports
            .iter()
            .filter(|r| !r.activated.is_empty())
            .map(|r| (r.tick.0, r.activated.clone()))
            .collect();
        assert_eq!(activated, vec![
            (0, vec![VehicleId(0)]),
            (4, vec![VehicleId(1)]),
            (8, vec![VehicleId(2)]),
        ]);
        let at_5 = &rec.reports[5];
        assert_eq!(at_5.waiting, 1);
        assert_eq!(at_5.moving, 2);
    }
}

// ── Publishing ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod publish_tests {
    use super::*;

    #[test]
    fn publish_interval_throttles() {
        let mut sim = SimBuilder::new(test_config(10, 3), OpenFloor, FleetConfig::default())
            .routes(vec![route(&[(0.0, 0.0), (100.0, 0.0)])])
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec);

        let ticks: Vec<u64> = rec.publishes.iter().map(|(t, _, _)| t.0).collect();
        assert_eq!(ticks, vec![0, 3, 6, 9]);
        let stamps: Vec<i64> = rec.publishes.iter().map(|(_, ms, _)| *ms).collect();
        assert_eq!(stamps, vec![1_000, 1_600, 2_200, 2_800]);
        for (_, ms, records) in &rec.publishes {
            assert_eq!(records.len(), 1);
            assert_eq!(records[0].timestamp_ms, *ms);
        }
    }

    #[test]
    fn zero_interval_never_publishes() {
        let mut sim = SimBuilder::new(test_config(10, 0), OpenFloor, FleetConfig::default())
            .routes(vec![route(&[(0.0, 0.0)])])
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec);
        assert!(rec.publishes.is_empty());
        assert_eq!(rec.reports.len(), 10);
    }

    #[test]
    fn open_floor_publishes_no_map() {
        let mut sim = SimBuilder::new(test_config(3, 1), OpenFloor, FleetConfig::default())
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec);
        assert_eq!(rec.maps.len(), 3);
        assert!(rec.maps.iter().all(Option::is_none));
    }

    #[test]
    fn records_reflect_post_tick_state() {
        let mut sim = SimBuilder::new(test_config(2, 1), OpenFloor, FleetConfig::default())
            .vehicles(vec![
                Vehicle::new(VehicleId(0), route(&[(10.0, 0.0)])).starting_at(Point::ORIGIN),
            ])
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec);

        let first = &rec.publishes[0].2[0];
        assert_eq!(first.status, MotionState::Moving);
        assert_eq!((first.x, first.y), (2.5, 0.0));
        let second = &rec.publishes[1].2[0];
        assert_eq!((second.x, second.y), (5.0, 0.0));
    }

    /// The outer-loop route of the factory: every publish carries a map
    /// snapshot, and the discovered area grows as the vehicle drives.
    #[test]
    fn map_floor_publishes_growing_snapshots() {
        let engine = MapEngine::new(&FloorPlan::standard_factory()).unwrap();
        let mut sim = SimBuilder::new(test_config(40, 10), engine, FleetConfig::default())
            .routes(vec![route(&[(5.0, 5.0), (144.0, 5.0), (144.0, 94.0), (5.0, 94.0)])])
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec);

        assert_eq!(rec.maps.len(), 4);
        let maps: Vec<MapSnapshot> = rec.maps.into_iter().map(Option::unwrap).collect();
        assert!(maps[0].counts().known() > 0);
        for pair in maps.windows(2) {
            assert!(pair[1].version() >= pair[0].version());
            assert!(pair[1].counts().known() >= pair[0].counts().known());
        }
        assert!(maps[3].counts().known() > maps[0].counts().known());
        assert!(rec.reports.iter().all(|r| r.rejected == 0));
    }

    #[test]
    fn published_records_name_the_zone() {
        let engine = MapEngine::new(&FloorPlan::standard_factory()).unwrap();
        let mut sim = SimBuilder::new(test_config(1, 1), engine, FleetConfig::default())
            .vehicles(vec![
                Vehicle::new(VehicleId(0), route(&[(30.0, 20.0)])).starting_at(Point::new(20.0, 20.0)),
                Vehicle::new(VehicleId(1), route(&[(75.0, 60.0)])).starting_at(Point::new(75.0, 50.0)),
            ])
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec);

        let records = &rec.publishes[0].2;
        assert_eq!(records[0].zone.as_deref(), Some("Workshop"));
        assert_eq!(records[0].speed, 2.5);
        assert_eq!(records[1].zone, None);
    }

    #[test]
    fn fleet_runs_do_not_depend_on_seed() {
        let run = |seed| {
            let config = SimConfig { seed, ..test_config(30, 5) };
            let mut sim = SimBuilder::new(config, OpenFloor, FleetConfig::default().staggered(2, 3))
                .routes(vec![
                    route(&[(0.0, 0.0), (40.0, 0.0)]),
                    route(&[(40.0, 0.0), (0.0, 0.0)]),
                ])
                .build()
                .unwrap();
            let mut rec = Recorder::default();
            sim.run(&mut rec);
            (rec.reports, rec.publishes)
        };
        assert_eq!(run(1), run(99));
    }
}
