//! CSV route loader.
//!
//! # CSV format
//!
//! One row per waypoint.  Rows may appear in any order; each vehicle's
//! waypoints are sorted by `seq`.
//!
//! ```csv
//! vehicle,seq,x,y
//! 0,0,20,20
//! 0,1,75,20
//! 1,0,130,80
//! ```
//!
//! Vehicle ids must be contiguous from 0: the result is indexed by
//! `VehicleId`, and a gap is reported as [`RouteError::MissingVehicle`].

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use agv_core::{Point, VehicleId};

use crate::{Route, RouteError, RouteResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RouteRecord {
    vehicle: u32,
    seq:     u32,
    x:       f32,
    y:       f32,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load per-vehicle routes from a CSV file.
pub fn load_routes_csv(path: &Path) -> RouteResult<Vec<Route>> {
    let file = std::fs::File::open(path)?;
    let routes = load_routes_reader(file)?;
    tracing::info!(path = %path.display(), vehicles = routes.len(), "routes loaded");
    Ok(routes)
}

/// Like [`load_routes_csv`] but accepts any `Read` source.
pub fn load_routes_reader<R: Read>(reader: R) -> RouteResult<Vec<Route>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut by_vehicle: BTreeMap<u32, Vec<RouteRecord>> = BTreeMap::new();

    for result in csv_reader.deserialize::<RouteRecord>() {
        let row = result.map_err(|e| RouteError::Parse(e.to_string()))?;
        by_vehicle.entry(row.vehicle).or_default().push(row);
    }

    let mut routes = Vec::with_capacity(by_vehicle.len());
    for (expected, (vehicle, mut rows)) in by_vehicle.into_iter().enumerate() {
        if vehicle as usize != expected {
            return Err(RouteError::MissingVehicle(VehicleId(expected as u32)));
        }
        rows.sort_unstable_by_key(|r| r.seq);
        if let Some(pair) = rows.windows(2).find(|w| w[0].seq == w[1].seq) {
            return Err(RouteError::DuplicateSeq { vehicle: VehicleId(vehicle), seq: pair[0].seq });
        }
        routes.push(Route::new(rows.iter().map(|r| Point::new(r.x, r.y)).collect())?);
    }
    Ok(routes)
}
