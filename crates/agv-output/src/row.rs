//! Plain data row types written by output backends.

use agv_fleet::TickReport;
use agv_map::MapSnapshot;

/// Fleet-wide counters for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:      u64,
    pub unix_ms:   i64,
    pub activated: u32,
    pub moving:    u32,
    pub waiting:   u32,
    pub idle:      u32,
    pub arrivals:  u32,
    pub yielded:   u32,
    pub rejected:  u32,
}

impl TickSummaryRow {
    pub fn from_report(report: &TickReport, unix_ms: i64) -> Self {
        Self {
            tick:      report.tick.0,
            unix_ms,
            activated: report.activated.len() as u32,
            moving:    report.moving as u32,
            waiting:   report.waiting as u32,
            idle:      report.idle as u32,
            arrivals:  report.arrivals as u32,
            yielded:   report.yielded as u32,
            rejected:  report.rejected as u32,
        }
    }
}

/// Discovered-map tallies at a publish tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapCoverageRow {
    pub tick:    u64,
    pub unix_ms: i64,
    pub version: u64,
    pub unknown: u64,
    pub free:    u64,
    pub wall:    u64,
}

impl MapCoverageRow {
    pub fn from_snapshot(tick: u64, unix_ms: i64, map: &MapSnapshot) -> Self {
        let counts = map.counts();
        Self {
            tick,
            unix_ms,
            version: map.version(),
            unknown: counts.unknown as u64,
            free:    counts.free as u64,
            wall:    counts.wall as u64,
        }
    }
}
