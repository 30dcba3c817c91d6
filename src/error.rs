use thiserror::Error;

use crate::moves::Move;

/// Contract violations raised while moving tiles around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PuzzleError {
    /// The blank at `(row, col)` has no neighbour in `direction`.
    #[error("cannot move {direction} from ({row}, {col}): blank would leave the grid")]
    OutOfBounds {
        direction: Move,
        row: usize,
        col: usize,
    },
    /// The grid is not a permutation of its solved labeling.
    #[error("tile {label} not found in grid")]
    TileNotFound { label: u32 },
}

/// Errors from reading grids and move strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid move symbol {symbol:?} at position {position}")]
    InvalidMove { symbol: char, position: usize },
    #[error("invalid tile label {0:?}")]
    InvalidLabel(String),
    #[error("row {row} has {found} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("grid must be at least 2x2, got {height}x{width}")]
    TooSmall { height: usize, width: usize },
    #[error("labels are not a permutation of 0..{0}")]
    NotPermutation(usize),
}
