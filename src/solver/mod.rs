//! Constructive sliding-tile solver.
//!
//! The grid is reduced phase by phase: the bottom rows are filled in from
//! the bottom-right corner, then the top two rows column by column from the
//! right, and finally the top-left 2x2 block is rotated into place. Each
//! phase assumes one grid invariant and establishes the next, so no search
//! is involved and the move count stays polynomial in the grid size.

mod invariant;
mod phases;
mod positioner;

use tracing::debug;

use crate::error::PuzzleError;
use crate::moves::{Move, MoveSequence};
use crate::puzzle::Puzzle;

/// Drives one grid towards its solved labeling, recording every move.
///
/// Moves are applied to the grid and appended to the recorded sequence in a
/// single step, so the sequence always replays the grid's history exactly.
pub struct Solver<'a> {
    puzzle: &'a mut Puzzle,
    moves: MoveSequence,
}

/// Output of [`solve`]: the moves and the grid they produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub moves: MoveSequence,
    pub solved: Puzzle,
}

impl<'a> Solver<'a> {
    pub fn new(puzzle: &'a mut Puzzle) -> Self {
        Self {
            puzzle,
            moves: MoveSequence::new(),
        }
    }

    pub fn puzzle(&self) -> &Puzzle {
        self.puzzle
    }

    /// Moves recorded so far.
    pub fn moves(&self) -> &MoveSequence {
        &self.moves
    }

    pub fn into_moves(self) -> MoveSequence {
        self.moves
    }

    fn step(&mut self, movement: Move) -> Result<(), PuzzleError> {
        self.puzzle.apply_move(movement)?;
        self.moves.push(movement);
        Ok(())
    }

    fn repeat(&mut self, movement: Move, count: usize) -> Result<(), PuzzleError> {
        (0..count).try_for_each(|_| self.step(movement))
    }

    fn play(&mut self, moves: &[Move]) -> Result<(), PuzzleError> {
        moves.iter().try_for_each(|&movement| self.step(movement))
    }

    /// Walks the blank to the bottom-right corner, which trivially
    /// establishes the lower-row invariant there.
    pub fn move_blank_to_corner(&mut self) -> Result<(), PuzzleError> {
        let (blank_row, blank_col) = self.puzzle.blank_position();
        self.repeat(Move::Right, self.puzzle.width() - 1 - blank_col)?;
        self.repeat(Move::Down, self.puzzle.height() - 1 - blank_row)
    }

    /// Runs every phase in order until the grid is solved.
    ///
    /// Does nothing on an already solved grid.
    pub fn solve_puzzle(&mut self) -> Result<(), PuzzleError> {
        if self.puzzle.is_solved() {
            return Ok(());
        }

        let height = self.puzzle.height();
        let width = self.puzzle.width();

        self.move_blank_to_corner()?;

        for row in (2..height).rev() {
            for col in (1..width).rev() {
                self.solve_interior_tile(row, col)?;
            }
            self.solve_col0_tile(row)?;
        }

        for col in (2..width).rev() {
            self.solve_row1_tile(col)?;
            self.solve_row0_tile(col)?;
        }

        self.solve_2x2()?;

        debug!(height, width, moves = self.moves.len(), "solved puzzle");
        Ok(())
    }
}

/// Solves a copy of `puzzle`, leaving the original untouched.
///
/// `puzzle` must be solvable; no parity check is made.
pub fn solve(puzzle: &Puzzle) -> Result<Solution, PuzzleError> {
    let mut solved = puzzle.clone();
    let mut solver = Solver::new(&mut solved);
    solver.solve_puzzle()?;
    let moves = solver.into_moves();

    Ok(Solution { moves, solved })
}
