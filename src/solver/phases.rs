use tracing::trace;

use crate::error::PuzzleError;
use crate::moves::Move;
use crate::moves::Move::{Down as D, Left as L, Right as R, Up as U};

use super::Solver;

/// Seats a column-0 tile held at `(r - 1, 1)`, blank at `(r - 1, 0)`, into
/// `(r, 0)` while restoring the rest of row `r`.
const COLUMN_ZERO_MACRO: [Move; 19] = [R, U, L, D, R, D, L, U, R, D, L, U, U, R, D, D, L, U, R];

/// Seats a row-0 tile held at `(1, c - 1)`, blank at `(1, c - 2)`, into
/// `(0, c)` while restoring `(1, c)`.
const ROW_ZERO_MACRO: [Move; 17] = [U, R, D, L, U, R, R, D, L, U, L, D, R, R, U, L, D];

/// One lap of the blank around the top-left 2x2 block, starting at `(1, 1)`.
const ROTATION: [Move; 4] = [U, L, D, R];

/// Three tiles times four blank positions: every arrangement the rotation
/// can reach.
const ROTATION_LIMIT: usize = 12;

impl Solver<'_> {
    /// Places the tile for `(target_row, target_col)`, `target_col > 0`.
    ///
    /// Takes the lower-row invariant at `(target_row, target_col)` to the one
    /// at `(target_row, target_col - 1)`.
    pub fn solve_interior_tile(
        &mut self,
        target_row: usize,
        target_col: usize,
    ) -> Result<(), PuzzleError> {
        debug_assert!(target_col > 0);
        debug_assert!(self.puzzle.lower_row_invariant(target_row, target_col));
        let start = self.moves.len();

        self.position_tile(target_row, target_col)?;

        debug_assert!(self.puzzle.lower_row_invariant(target_row, target_col - 1));
        trace!(
            target_row,
            target_col,
            moves = self.moves.len() - start,
            "solved interior tile"
        );
        Ok(())
    }

    /// Places the tile for `(target_row, 0)`, `target_row > 1`, and parks the
    /// blank at the right end of the row above.
    pub fn solve_col0_tile(&mut self, target_row: usize) -> Result<(), PuzzleError> {
        debug_assert!(target_row > 1);
        debug_assert!(self.puzzle.lower_row_invariant(target_row, 0));
        let start = self.moves.len();
        let width = self.puzzle.width();

        self.play(&[U, R])?;
        if !self.puzzle.is_solved_at(target_row, 0) {
            self.position_tile_from(target_row - 1, 1, target_row, 0)?;
            self.play(&COLUMN_ZERO_MACRO)?;
        }
        self.repeat(R, width - 2)?;

        debug_assert!(self.puzzle.lower_row_invariant(target_row - 1, width - 1));
        trace!(
            target_row,
            moves = self.moves.len() - start,
            "solved column zero tile"
        );
        Ok(())
    }

    /// Places the tile for `(1, target_col)`, `target_col > 1`, leaving the
    /// blank above it in row 0.
    pub fn solve_row1_tile(&mut self, target_col: usize) -> Result<(), PuzzleError> {
        debug_assert!(target_col > 1);
        debug_assert!(self.puzzle.row1_invariant(target_col));
        let start = self.moves.len();

        self.position_tile(1, target_col)?;
        self.play(&[U, R])?;

        debug_assert!(self.puzzle.row0_invariant(target_col));
        trace!(
            target_col,
            moves = self.moves.len() - start,
            "solved row one tile"
        );
        Ok(())
    }

    /// Places the tile for `(0, target_col)`, `target_col > 1`, leaving the
    /// blank at `(1, target_col - 1)`.
    pub fn solve_row0_tile(&mut self, target_col: usize) -> Result<(), PuzzleError> {
        debug_assert!(target_col > 1);
        debug_assert!(self.puzzle.row0_invariant(target_col));
        let start = self.moves.len();

        self.play(&[L, D])?;
        if !self.puzzle.is_solved_at(0, target_col) {
            self.position_tile_from(1, target_col - 1, 0, target_col)?;
            self.play(&ROW_ZERO_MACRO)?;
        }

        debug_assert!(self.puzzle.row1_invariant(target_col - 1));
        trace!(
            target_col,
            moves = self.moves.len() - start,
            "solved row zero tile"
        );
        Ok(())
    }

    /// Rotates the blank around the top-left 2x2 block until it is solved.
    pub fn solve_2x2(&mut self) -> Result<(), PuzzleError> {
        debug_assert!(self.puzzle.row1_invariant(1));
        let start = self.moves.len();

        for &movement in ROTATION.iter().cycle().take(ROTATION_LIMIT) {
            if self.puzzle.is_2x2_solved() {
                break;
            }
            self.step(movement)?;
        }

        debug_assert!(self.puzzle.is_2x2_solved(), "top-left block is unsolvable");
        trace!(moves = self.moves.len() - start, "solved top-left block");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use crate::puzzle::Puzzle;
    use crate::solver::Solver;

    fn scrambled(height: usize, width: usize, seed: u64) -> Puzzle {
        let mut puzzle = Puzzle::new(height, width);
        puzzle.shuffle(400, &mut StdRng::seed_from_u64(seed));
        puzzle
    }

    #[test]
    fn test_every_phase_establishes_the_next_invariant() {
        for (height, width) in [(2, 2), (2, 5), (3, 2), (3, 3), (4, 4), (5, 3), (3, 6)] {
            for seed in 0..20 {
                let mut puzzle = scrambled(height, width, seed);
                let mut solver = Solver::new(&mut puzzle);

                solver.move_blank_to_corner().unwrap();
                assert!(solver.puzzle().lower_row_invariant(height - 1, width - 1));

                for row in (2..height).rev() {
                    for col in (1..width).rev() {
                        solver.solve_interior_tile(row, col).unwrap();
                        assert!(
                            solver.puzzle().lower_row_invariant(row, col - 1),
                            "{height}x{width} seed {seed} after ({row}, {col}):\n{}",
                            solver.puzzle()
                        );
                    }
                    solver.solve_col0_tile(row).unwrap();
                    assert!(
                        solver.puzzle().lower_row_invariant(row - 1, width - 1),
                        "{height}x{width} seed {seed} after column zero of row {row}:\n{}",
                        solver.puzzle()
                    );
                }

                assert!(solver.puzzle().row1_invariant(width - 1));
                for col in (2..width).rev() {
                    solver.solve_row1_tile(col).unwrap();
                    assert!(
                        solver.puzzle().row0_invariant(col),
                        "{height}x{width} seed {seed} after (1, {col}):\n{}",
                        solver.puzzle()
                    );
                    solver.solve_row0_tile(col).unwrap();
                    assert!(
                        solver.puzzle().row1_invariant(col - 1),
                        "{height}x{width} seed {seed} after (0, {col}):\n{}",
                        solver.puzzle()
                    );
                }

                solver.solve_2x2().unwrap();
                assert!(solver.puzzle().is_solved());
            }
        }
    }

    #[test]
    fn test_col0_tile_already_in_place() {
        let mut puzzle: Puzzle = "1 2 3; 6 4 5; 0 7 8".parse().unwrap();
        let mut solver = Solver::new(&mut puzzle);
        solver.solve_col0_tile(2).unwrap();

        assert_eq!(solver.moves().to_string(), "urr");
        assert!(solver.puzzle().lower_row_invariant(1, 2));
    }

    #[test]
    fn test_col0_tile_on_narrow_grid() {
        // width 2 leaves no room for the trailing walk to the right
        let mut puzzle: Puzzle = "4 1; 2 3; 0 5".parse().unwrap();
        let mut solver = Solver::new(&mut puzzle);
        solver.solve_col0_tile(2).unwrap();

        assert_eq!(solver.moves().to_string(), "uruldruldruldrdlurdluurddlur");
        assert!(solver.puzzle().lower_row_invariant(1, 1));
    }

    #[test]
    fn test_row0_tile_already_in_place() {
        let mut puzzle: Puzzle = "1 2 0; 3 4 5".parse().unwrap();
        let mut solver = Solver::new(&mut puzzle);
        solver.solve_row0_tile(2).unwrap();

        assert_eq!(solver.moves().to_string(), "ld");
        assert!(solver.puzzle().row1_invariant(1));
    }

    #[test]
    fn test_2x2_rotation() {
        let mut puzzle: Puzzle = "2 1; 3 0".parse().unwrap();
        let mut solver = Solver::new(&mut puzzle);
        solver.solve_2x2().unwrap();

        assert_eq!(solver.moves().to_string(), "uldruldrul");
        assert!(solver.puzzle().is_solved());
    }
}
