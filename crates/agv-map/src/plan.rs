//! Static obstacle layout: border wall plus zone outlines.
//!
//! Only a zone's outline becomes wall; its interior stays `Free`, so a
//! vehicle can sit inside a zone once it gets there.  Zones may touch,
//! overlap, or be separated by corridor gaps, and are clipped to the grid.

use agv_core::Point;

use crate::{CellState, Grid, MapError, MapResult};

/// An axis-aligned rectangular zone, addressed in cells.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Zone {
    pub name:   String,
    pub row:    usize,
    pub col:    usize,
    pub height: usize,
    pub width:  usize,
}

impl Zone {
    pub fn new(name: impl Into<String>, row: usize, col: usize, height: usize, width: usize) -> Self {
        Self { name: name.into(), row, col, height, width }
    }

    /// `true` if `(row, col)` lies in the zone, outline included.
    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.row
            && row < self.row + self.height
            && col >= self.col
            && col < self.col + self.width
    }

    /// `true` if `(row, col)` is on this zone's outline.
    #[inline]
    pub fn is_outline(&self, row: usize, col: usize) -> bool {
        self.contains(row, col)
            && (row == self.row
                || row == self.row + self.height - 1
                || col == self.col
                || col == self.col + self.width - 1)
    }
}

/// Grid dimensions plus the zones stamped into ground truth.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloorPlan {
    pub rows:  usize,
    pub cols:  usize,
    pub zones: Vec<Zone>,
}

impl FloorPlan {
    /// An empty `rows × cols` floor: border wall only.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols, zones: Vec::new() }
    }

    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.zones.push(zone);
        self
    }

    /// The factory layout: three zones along the top, the AGV station on the
    /// right, and two separated zones along the bottom.
    ///
    /// Designed for a 100 × 150 grid; smaller grids clip the zones.
    pub fn factory(rows: usize, cols: usize) -> Self {
        Self::new(rows, cols)
            .with_zone(Zone::new("Workshop",        10,  10, 30, 35))
            .with_zone(Zone::new("Material Space",  10,  55, 30, 40))
            .with_zone(Zone::new("Control Room",    10, 110, 20, 30))
            .with_zone(Zone::new("AGV Station",     40, 100, 25, 40))
            .with_zone(Zone::new("Supply Area",     70,  10, 22, 35))
            .with_zone(Zone::new("Shipping & Exit", 70,  55, 22, 40))
    }

    /// [`factory`](Self::factory) at its native 100 × 150 size.
    pub fn standard_factory() -> Self {
        Self::factory(100, 150)
    }

    /// The first zone whose rectangle holds the cell under `p`.
    pub fn zone_at(&self, p: Point) -> Option<&Zone> {
        if !p.is_finite() || p.x < 0.0 || p.y < 0.0 {
            return None;
        }
        let (row, col) = (p.y.floor() as usize, p.x.floor() as usize);
        self.zones.iter().find(|z| z.contains(row, col))
    }

    /// Reject empty grids and zero-area zones.
    pub fn validate(&self) -> MapResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(MapError::EmptyGrid { rows: self.rows, cols: self.cols });
        }
        if let Some(z) = self.zones.iter().find(|z| z.height == 0 || z.width == 0) {
            return Err(MapError::DegenerateZone { name: z.name.clone() });
        }
        Ok(())
    }

    /// Stamp the border and zone outlines into a fresh all-`Free` grid.
    pub fn ground_truth(&self) -> MapResult<Grid> {
        self.validate()?;
        let (rows, cols) = (self.rows, self.cols);
        let mut grid = Grid::filled(rows, cols, CellState::Free);

        for r in 0..rows {
            grid.set(r, 0, CellState::Wall);
            grid.set(r, cols - 1, CellState::Wall);
        }
        for c in 0..cols {
            grid.set(0, c, CellState::Wall);
            grid.set(rows - 1, c, CellState::Wall);
        }

        for zone in &self.zones {
            let row_end = (zone.row + zone.height).min(rows);
            let col_end = (zone.col + zone.width).min(cols);
            for r in zone.row..row_end {
                for c in zone.col..col_end {
                    if zone.is_outline(r, c) {
                        grid.set(r, c, CellState::Wall);
                    }
                }
            }
        }
        Ok(grid)
    }
}
