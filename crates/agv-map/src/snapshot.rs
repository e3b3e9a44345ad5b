//! Immutable discovered-grid snapshots handed to observers.
//!
//! Renderers and telemetry publishers never see the live grid.  They get a
//! `MapSnapshot`: an `Arc` of the cells taken at a tick boundary, tagged with
//! the engine's version counter.  Cloning a snapshot is a reference-count
//! bump, and the engine reuses the same allocation until the grid changes.

use std::sync::Arc;

use crate::{CellState, Grid};

/// Per-state cell tallies.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CellCounts {
    pub unknown: usize,
    pub free:    usize,
    pub wall:    usize,
}

impl CellCounts {
    #[inline]
    pub fn known(&self) -> usize {
        self.free + self.wall
    }
}

/// A frozen copy of the discovered grid.
#[derive(Clone, Debug)]
pub struct MapSnapshot {
    version: u64,
    rows:    usize,
    cols:    usize,
    cells:   Arc<[CellState]>,
}

impl MapSnapshot {
    pub(crate) fn capture(grid: &Grid, version: u64) -> Self {
        Self {
            version,
            rows:  grid.rows(),
            cols:  grid.cols(),
            cells: Arc::from(grid.cells()),
        }
    }

    /// Engine version at capture time.  Equal versions mean equal contents.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row-major cells.
    #[inline]
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// `true` if both snapshots share one allocation.
    #[inline]
    pub fn shares_storage_with(&self, other: &MapSnapshot) -> bool {
        Arc::ptr_eq(&self.cells, &other.cells)
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<CellState> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn counts(&self) -> CellCounts {
        let mut counts = CellCounts::default();
        for &c in self.cells.iter() {
            match c {
                CellState::Unknown => counts.unknown += 1,
                CellState::Free    => counts.free += 1,
                CellState::Wall    => counts.wall += 1,
            }
        }
        counts
    }

    /// Fraction of cells that are known, in `[0, 1]`.
    pub fn coverage(&self) -> f32 {
        if self.cells.is_empty() {
            return 0.0;
        }
        self.counts().known() as f32 / self.cells.len() as f32
    }

    /// One line per row using [`CellState::as_char`].
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.rows * (self.cols + 1));
        for row in self.cells.chunks(self.cols.max(1)) {
            out.extend(row.iter().map(|c| c.as_char()));
            out.push('\n');
        }
        out
    }
}
