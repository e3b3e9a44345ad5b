//! explore — manually driven probe mapping the factory.
//!
//! A single probe wanders the standard factory from AGV-01's home waypoint.
//! By default it is held to the aisle network; `--free` lets it roam any
//! free cell.  Each accepted move scans, and the discovered map is printed
//! at the end.
//!
//! ```text
//! cargo run --bin explore [ticks] [--free]
//! ```

mod layout;

use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};

use agv_core::{Point, SimConfig, Tick};
use agv_fleet::{FleetConfig, ManualDrive, WanderInput};
use agv_map::{FloorPlan, MapEngine};
use agv_output::{CsvWriter, MapCoverageRow, TelemetryWriter};
use agv_route::load_routes_reader;

use layout::{ROUTES_CSV, corridor_network};

// ── Constants ─────────────────────────────────────────────────────────────────

const DEFAULT_TICKS:      u64 = 2_000;
const CORRIDOR_TOLERANCE: f32 = 0.5;
const TURN_PROBABILITY:   f64 = 0.02;
const REPORT_EVERY:       u64 = 250;
const OUTPUT_DIR:         &str = "output/explore";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();

    let mut ticks = DEFAULT_TICKS;
    let mut confined = true;
    for arg in std::env::args().skip(1) {
        if arg == "--free" {
            confined = false;
        } else {
            ticks = arg.parse().with_context(|| format!("invalid tick count {arg:?}"))?;
        }
    }

    let config = SimConfig { total_ticks: ticks, ..SimConfig::default() };
    config.validate()?;
    let mut clock = config.make_clock();
    let fleet = FleetConfig::default();

    let routes = load_routes_reader(Cursor::new(ROUTES_CSV))?;
    let start: Point = routes.first().map(|r| r.waypoint(0)).context("no routes in layout")?;
    let mut engine = MapEngine::new(&FloorPlan::standard_factory())?.with_probe_at(start);
    engine.scan(start);

    let mut drive = ManualDrive::new(&fleet)?.named("Probe");
    if confined {
        drive = drive.with_corridors(corridor_network()?, CORRIDOR_TOLERANCE);
    }
    let mut input = WanderInput::new(config.seed, fleet.speed)?.with_turn_probability(TURN_PROBABILITY);

    std::fs::create_dir_all(OUTPUT_DIR)?;
    let mut writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;

    println!("=== explore — {} ticks, {} ===", ticks, if confined { "aisles only" } else { "free roam" });

    let mut last_version = None;
    while clock.current_tick < config.end_tick() {
        let now: Tick = clock.current_tick;
        drive.step(&mut engine, &mut input, now);

        if config.publishes_at(now) {
            let record = drive.telemetry(&engine, clock.unix_ms_at(now));
            writer.write_records(now, std::slice::from_ref(&record))?;
        }
        let map = engine.snapshot();
        if last_version != Some(map.version()) {
            last_version = Some(map.version());
            writer.write_map_coverage(&MapCoverageRow::from_snapshot(now.0, clock.unix_ms_at(now), &map))?;
        }
        if now.0 % REPORT_EVERY == 0 {
            tracing::info!(%now, position = %engine.probe().position, coverage = map.coverage(), "exploring");
        }
        clock.advance();
    }
    writer.finish()?;

    let map = engine.snapshot();
    let counts = map.counts();
    println!("{}", map.to_ascii());
    println!(
        "Coverage {:.1} %  |  free {}  wall {}  unknown {}",
        map.coverage() * 100.0, counts.free, counts.wall, counts.unknown,
    );
    println!(
        "Probe at {}  |  odometer {:.1}  |  energy {:.2}",
        engine.probe().position, drive.odometer(), drive.energy(),
    );
    println!("Output: {OUTPUT_DIR}");

    Ok(())
}
