//! Cell states shared by the ground-truth and discovered grids.

/// State of one grid cell.
///
/// Ground truth only ever holds `Free` or `Wall`.  The discovered grid starts
/// at `Unknown` and each cell moves to `Free` or `Wall` at most once.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum CellState {
    #[default]
    Unknown = 0,
    Free = 1,
    Wall = 2,
}

impl CellState {
    #[inline]
    pub fn is_known(self) -> bool {
        self != CellState::Unknown
    }

    #[inline]
    pub fn is_wall(self) -> bool {
        self == CellState::Wall
    }

    /// One-character rendering for headless dumps: `?`, `.`, `#`.
    pub fn as_char(self) -> char {
        match self {
            CellState::Unknown => '?',
            CellState::Free    => '.',
            CellState::Wall    => '#',
        }
    }
}
