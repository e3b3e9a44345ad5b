//! The factory's fixed routes and corridor network.
//!
//! Coordinates are `(x, y)` = `(column, row)` on the 100 × 150 standard
//! factory plan.  Every route leg runs along free aisles between the zone
//! outlines.

use agv_core::{Point, Segment};
use agv_map::{MapResult, PathNetwork};

// ── Routes ────────────────────────────────────────────────────────────────────

// AGV-01 loops the outer aisle.  AGV-02 threads the middle aisle and the
// station's east side.  AGV-03 works the bottom aisles between supply and
// shipping.
//
// AGV-01 runs north up the x = 5 aisle on its closing leg while AGV-03 runs
// south down it from (5, 42).  Once both are on that aisle they meet head-on,
// each yields to the other, and both stay `WAITING` for the rest of the run.
// Yielding is the only collision response, so this standoff is expected.
pub const ROUTES_CSV: &str = "\
vehicle,seq,x,y\n\
0,0,5,5\n\
0,1,144,5\n\
0,2,144,94\n\
0,3,5,94\n\
1,0,5,42\n\
1,1,52,42\n\
1,2,52,5\n\
1,3,97,5\n\
1,4,107,5\n\
1,5,107,37\n\
1,6,144,37\n\
1,7,144,67\n\
1,8,97,67\n\
1,9,97,42\n\
1,10,50,42\n\
2,0,5,67\n\
2,1,52,67\n\
2,2,52,94\n\
2,3,97,94\n\
2,4,97,67\n\
2,5,52,67\n\
2,6,52,42\n\
2,7,5,42\n\
";

// ── Corridors ─────────────────────────────────────────────────────────────────

/// `(x0, y0, x1, y1)` for every aisle and zone spur.
const CORRIDORS: &[(f32, f32, f32, f32)] = &[
    // Outer loop.
    (5.0, 5.0, 5.0, 94.0),
    (5.0, 5.0, 144.0, 5.0),
    (144.0, 5.0, 144.0, 94.0),
    (5.0, 94.0, 144.0, 94.0),
    // Middle aisle and the climb past the material space.
    (5.0, 42.0, 52.0, 42.0),
    (52.0, 42.0, 52.0, 5.0),
    (50.0, 42.0, 97.0, 42.0),
    (97.0, 42.0, 97.0, 5.0),
    (97.0, 5.0, 107.0, 5.0),
    (107.0, 5.0, 107.0, 37.0),
    (107.0, 37.0, 144.0, 37.0),
    // Bottom aisle.
    (5.0, 67.0, 52.0, 67.0),
    (52.0, 67.0, 52.0, 94.0),
    (52.0, 42.0, 52.0, 67.0),
    // Station east side.
    (97.0, 67.0, 97.0, 94.0),
    (97.0, 67.0, 144.0, 67.0),
    // Zone door spurs.
    (27.0, 39.0, 27.0, 42.0),
    (75.0, 39.0, 75.0, 42.0),
    (125.0, 29.0, 125.0, 37.0),
    (97.0, 52.0, 100.0, 52.0),
    (27.0, 67.0, 27.0, 70.0),
    (75.0, 67.0, 75.0, 70.0),
    // Spur feeders.
    (27.0, 42.0, 52.0, 42.0),
    (75.0, 42.0, 97.0, 42.0),
    (125.0, 37.0, 144.0, 37.0),
    (97.0, 52.0, 97.0, 67.0),
    (27.0, 67.0, 52.0, 67.0),
    (75.0, 67.0, 97.0, 67.0),
];

/// The aisle network a path-confined vehicle is held to.
pub fn corridor_network() -> MapResult<PathNetwork> {
    let segments = CORRIDORS
        .iter()
        .map(|&(x0, y0, x1, y1)| Segment::new(Point::new(x0, y0), Point::new(x1, y1)))
        .collect();
    PathNetwork::new(segments)
}
