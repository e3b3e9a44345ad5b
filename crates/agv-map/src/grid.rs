//! Dense row-major cell grid.
//!
//! Cell `(row, col)` lives at `cells[row * cols + col]`.  Continuous points
//! map to cells with `row = y`, `col = x` after quantization.  Sensing
//! floors, motion validation rounds.

use agv_core::Point;

use crate::CellState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows:  usize,
    cols:  usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// A `rows × cols` grid with every cell set to `state`.
    pub fn filled(rows: usize, cols: usize, state: CellState) -> Self {
        Self { rows, cols, cells: vec![state; rows * cols] }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row-major view of every cell.
    #[inline]
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// `true` if the signed cell address lies inside the grid.
    #[inline]
    pub fn in_bounds(&self, row: i64, col: i64) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    /// Cell at `(row, col)`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<CellState> {
        if row < self.rows && col < self.cols {
            Some(self.cells[self.index(row, col)])
        } else {
            None
        }
    }

    /// Like [`get`](Self::get) for signed addresses produced by quantization.
    #[inline]
    pub fn get_signed(&self, row: i64, col: i64) -> Option<CellState> {
        if self.in_bounds(row, col) {
            Some(self.cells[self.index(row as usize, col as usize)])
        } else {
            None
        }
    }

    /// Overwrite one cell.  Out-of-bounds writes are ignored.
    #[inline]
    pub(crate) fn set(&mut self, row: usize, col: usize, state: CellState) {
        if row < self.rows && col < self.cols {
            let i = self.index(row, col);
            self.cells[i] = state;
        }
    }

    /// Number of cells currently in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }

    // ── Quantizers ────────────────────────────────────────────────────────

    /// `(row, col)` of the cell containing `p` (floor).  Used by raycasting.
    #[inline]
    pub fn floor_cell(p: Point) -> (i64, i64) {
        (p.y.floor() as i64, p.x.floor() as i64)
    }

    /// `(row, col)` of the cell whose center is nearest to `p` (round).
    /// Used by motion validation.
    #[inline]
    pub fn round_cell(p: Point) -> (i64, i64) {
        (p.y.round() as i64, p.x.round() as i64)
    }
}
