//! fifteen: a deterministic solver for rectangular sliding-tile puzzles.
//!
//! The solved grid holds `col + width * row` at `(row, col)`, with the blank
//! (`0`) in the top-left corner. [`solve`] reduces any solvable grid to that
//! labeling one row and column at a time, without search, and returns the
//! blank moves as a [`MoveSequence`] that callers replay with
//! [`apply_moves`].
//!
//! Quick start:
//! ```
//! use fifteen::{apply_moves, new_grid, solve};
//!
//! let mut grid = new_grid(3, 3, Some(vec![vec![3, 1, 2], vec![6, 4, 5], vec![0, 7, 8]]));
//! let moves = solve(&grid)?;
//! apply_moves(&mut grid, &moves)?;
//! assert!(grid.is_solved());
//! # Ok::<(), fifteen::PuzzleError>(())
//! ```

pub mod error;
pub mod moves;
pub mod puzzle;
pub mod solver;

pub use error::{ParseError, PuzzleError};
pub use moves::{Move, MoveSequence};
pub use puzzle::Puzzle;
pub use solver::{Solution, Solver};

/// Creates a `height` x `width` grid, solved unless `initial_labels` is
/// given.
///
/// `initial_labels` must be a permutation of `0..height*width` laid out in
/// rows.
pub fn new_grid(height: usize, width: usize, initial_labels: Option<Vec<Vec<u32>>>) -> Puzzle {
    match initial_labels {
        Some(labels) => Puzzle::with_labels(height, width, labels),
        None => Puzzle::new(height, width),
    }
}

/// Plays `moves` against `grid`, failing on the first move that would push
/// the blank off the grid.
pub fn apply_moves(grid: &mut Puzzle, moves: impl AsRef<[Move]>) -> Result<(), PuzzleError> {
    grid.apply_moves(moves)
}

/// Computes the moves that take `grid` to its solved labeling.
///
/// `grid` itself is left unchanged.
pub fn solve(grid: &Puzzle) -> Result<MoveSequence, PuzzleError> {
    solver::solve(grid).map(|solution| solution.moves)
}
