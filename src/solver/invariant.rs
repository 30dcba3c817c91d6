//! Predicates describing how much of the grid a phase has finished.
//!
//! These are diagnostics: phases check them in debug assertions, and every
//! failure logs the offending cell at debug level.

use std::ops::Range;

use tracing::debug;

use crate::puzzle::Puzzle;

impl Puzzle {
    /// Blank at `(target_row, target_col)`, every row below it solved, and
    /// every cell right of it on its row solved.
    pub fn lower_row_invariant(&self, target_row: usize, target_col: usize) -> bool {
        self.blank_at(target_row, target_col)
            && self.rows_solved(target_row + 1)
            && self.cells_solved(target_row, target_col + 1..self.width())
    }

    /// Blank at `(0, target_col)`, row 0 solved right of it, row 1 solved
    /// from `target_col` on, and rows 2 and below solved.
    pub fn row0_invariant(&self, target_col: usize) -> bool {
        self.blank_at(0, target_col)
            && self.cells_solved(0, target_col + 1..self.width())
            && self.cells_solved(1, target_col..self.width())
            && self.rows_solved(2)
    }

    /// Blank at `(1, target_col)`, row 1 solved right of it, and rows 2 and
    /// below solved.
    pub fn row1_invariant(&self, target_col: usize) -> bool {
        self.blank_at(1, target_col)
            && self.cells_solved(1, target_col + 1..self.width())
            && self.rows_solved(2)
    }

    pub fn is_2x2_solved(&self) -> bool {
        (0..2).all(|row| (0..2).all(|col| self.is_solved_at(row, col)))
    }

    fn blank_at(&self, row: usize, col: usize) -> bool {
        let found = self.get(row, col);
        if found != 0 {
            debug!(row, col, found, "blank is not at expected cell");
            return false;
        }
        true
    }

    fn cells_solved(&self, row: usize, mut cols: Range<usize>) -> bool {
        cols.all(|col| {
            let solved = self.is_solved_at(row, col);
            if !solved {
                debug!(row, col, found = self.get(row, col), "tile is not solved");
            }
            solved
        })
    }

    fn rows_solved(&self, first_row: usize) -> bool {
        (first_row..self.height()).all(|row| self.cells_solved(row, 0..self.width()))
    }
}
