//! factory — three AGVs on the standard factory floor.
//!
//! Loads the fixed routes, staggers activation, and drives the fleet over the
//! mapped floor for ten simulated minutes at 5 Hz.  Every accepted move scans,
//! so the discovered map fills in as the fleet drives.  Telemetry goes to
//! `telemetry.csv` / `tick_summaries.csv` / `map_coverage.csv` and to
//! `telemetry.jsonl` (one publish payload per line).
//!
//! ```text
//! cargo run --bin factory [config.json]
//! RUST_LOG=agv_fleet=debug cargo run --bin factory
//! ```

mod layout;

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Deserialize;

use agv_core::{SimConfig, Tick};
use agv_fleet::{FleetConfig, TelemetryRecord, TickReport};
use agv_map::{FloorPlan, MapEngine, MapSnapshot};
use agv_output::{CsvWriter, JsonLinesWriter, TelemetryObserver, TelemetryWriter};
use agv_route::load_routes_reader;
use agv_sim::{SimBuilder, SimObserver};

use layout::{ROUTES_CSV, corridor_network};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:                  u64 = 42;
const TICK_DURATION_MS:      u32 = 200;        // 5 Hz
const SIM_MINUTES:           u64 = 10;
const ACTIVATION_STAGGER:    u64 = 25;         // 5 s between vehicles
const PUBLISH_INTERVAL_TICKS: u64 = 1;

// ── Configuration ─────────────────────────────────────────────────────────────

/// Optional JSON overrides; any omitted section keeps its default.
#[derive(Deserialize)]
#[serde(default)]
struct DemoConfig {
    sim:        SimConfig,
    fleet:      FleetConfig,
    output_dir: PathBuf,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig {
                start_unix_ms:          1_700_000_000_000,
                tick_duration_ms:       TICK_DURATION_MS,
                total_ticks:            SIM_MINUTES * 60 * 1_000 / TICK_DURATION_MS as u64,
                seed:                   SEED,
                publish_interval_ticks: PUBLISH_INTERVAL_TICKS,
            },
            fleet:      FleetConfig::default().staggered(3, ACTIVATION_STAGGER),
            output_dir: PathBuf::from("output/factory"),
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<DemoConfig> {
    let Some(path) = path else {
        return Ok(DemoConfig::default());
    };
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening config {}", path.display()))?;
    let config = serde_json::from_reader(file)
        .with_context(|| format!("parsing config {}", path.display()))?;
    tracing::info!(path = %path.display(), "config loaded");
    Ok(config)
}

// ── Observer fan-out ──────────────────────────────────────────────────────────

/// Feeds two telemetry observers and counts what went through.
struct FanOut<A: TelemetryWriter, B: TelemetryWriter> {
    csv:          TelemetryObserver<A>,
    jsonl:        TelemetryObserver<B>,
    records:      usize,
    summaries:    usize,
    yields:       usize,
    last_map:     Option<MapSnapshot>,
}

impl<A: TelemetryWriter, B: TelemetryWriter> FanOut<A, B> {
    fn new(csv: TelemetryObserver<A>, jsonl: TelemetryObserver<B>) -> Self {
        Self { csv, jsonl, records: 0, summaries: 0, yields: 0, last_map: None }
    }
}

impl<A: TelemetryWriter, B: TelemetryWriter> SimObserver for FanOut<A, B> {
    fn on_tick_end(&mut self, report: &TickReport) {
        self.summaries += 1;
        self.yields += report.yielded;
        self.csv.on_tick_end(report);
        self.jsonl.on_tick_end(report);
    }

    fn on_publish(
        &mut self,
        tick:    Tick,
        unix_ms: i64,
        records: &[TelemetryRecord],
        map:     Option<&MapSnapshot>,
    ) {
        self.records += records.len();
        self.last_map = map.cloned();
        self.csv.on_publish(tick, unix_ms, records, map);
        self.jsonl.on_publish(tick, unix_ms, records, map);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.csv.on_sim_end(final_tick);
        self.jsonl.on_sim_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let demo = load_config(config_path.as_deref())?;

    println!("=== factory — AGV fleet twin ===");
    println!(
        "Ticks: {}  |  Tick: {} ms  |  Speed: {}  |  Safety: {}",
        demo.sim.total_ticks, demo.sim.tick_duration_ms, demo.fleet.speed, demo.fleet.safety_distance,
    );
    println!();

    // 1. Floor and routes.
    let engine = MapEngine::new(&FloorPlan::standard_factory())?;
    let routes = load_routes_reader(Cursor::new(ROUTES_CSV))?;
    let aisles = corridor_network()?;
    for (i, r) in routes.iter().enumerate() {
        let off_aisle = r.waypoints().iter().filter(|&&p| !aisles.contains(p, 0.5)).count();
        if off_aisle > 0 {
            tracing::warn!(route = i, off_aisle, "route leaves the aisle network");
        }
        println!("Route {i}: {} waypoints, lap {:.1} cells", r.len(), r.lap_length());
    }
    println!();

    // 2. Build sim.
    let mut sim = SimBuilder::new(demo.sim.clone(), engine, demo.fleet.clone())
        .routes(routes)
        .build()?;

    // 3. Set up output.
    std::fs::create_dir_all(&demo.output_dir)?;
    let csv   = TelemetryObserver::new(CsvWriter::new(&demo.output_dir)?, &demo.sim);
    let jsonl = TelemetryObserver::new(JsonLinesWriter::new(&demo.output_dir)?, &demo.sim);
    let mut obs = FanOut::new(csv, jsonl);

    // 4. Run.
    let t0 = Instant::now();
    let end = sim.run(&mut obs);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.csv.take_error() {
        eprintln!("csv output error: {e}");
    }
    if let Some(e) = obs.jsonl.take_error() {
        eprintln!("jsonl output error: {e}");
    }

    // 5. Summary.
    println!("Simulation complete at {end} in {:.3} s", elapsed.as_secs_f64());
    println!("  telemetry records : {}", obs.records);
    println!("  tick summaries    : {}", obs.summaries);
    println!("  yield events      : {}", obs.yields);
    if let Some(map) = &obs.last_map {
        println!("  map coverage      : {:.1} %", map.coverage() * 100.0);
    }
    println!("  output            : {}", demo.output_dir.display());
    println!();

    // 6. Final vehicle table.
    println!(
        "{:<8} {:<8} {:>8} {:>8} {:>8} {:>10} {:>6}  {}",
        "Vehicle", "Status", "X", "Y", "Energy", "Distance", "Legs", "Zone",
    );
    println!("{}", "-".repeat(78));
    for r in sim.fleet.telemetry(&sim.floor, sim.clock.current_unix_ms()) {
        println!(
            "{:<8} {:<8} {:>8.2} {:>8.2} {:>8.2} {:>10.1} {:>6}  {}",
            r.name,
            r.status.as_str(),
            r.x,
            r.y,
            r.energy,
            r.distance,
            r.waypoints_reached,
            r.zone.as_deref().unwrap_or("-"),
        );
    }

    Ok(())
}
