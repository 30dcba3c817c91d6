use std::cmp::Ordering;

use crate::error::PuzzleError;
use crate::moves::Move;

use super::Solver;

/// Result of one blank-walking maneuver.
enum Progress {
    /// The tile moved one cell closer; the blank is back on the target.
    Advanced,
    /// The tile reached the target; the blank sits directly left of it.
    Seated,
}

impl Solver<'_> {
    /// Moves the tile that belongs at `(target_row, target_col)` there.
    pub fn position_tile(
        &mut self,
        target_row: usize,
        target_col: usize,
    ) -> Result<(), PuzzleError> {
        self.position_tile_from(target_row, target_col, target_row, target_col)
    }

    /// Moves the tile that belongs at `(tile_row, tile_col)` onto
    /// `(target_row, target_col)`.
    ///
    /// The blank must start on the target cell with `target_col > 0`, and the
    /// tile must not be below the target row. Only cells above the target
    /// row, or left of the target on its row, are disturbed. On return the
    /// blank sits at `(target_row, target_col - 1)` unless the tile was
    /// already in place.
    pub fn position_tile_from(
        &mut self,
        target_row: usize,
        target_col: usize,
        tile_row: usize,
        tile_col: usize,
    ) -> Result<(), PuzzleError> {
        let target = (target_row, target_col);
        let mut last_distance = usize::MAX;

        loop {
            let current = self.puzzle.current_position(tile_row, tile_col)?;
            if current == target {
                return Ok(());
            }

            // every maneuver brings the tile exactly one cell closer
            let distance = current.0.abs_diff(target_row) + current.1.abs_diff(target_col);
            debug_assert!(
                distance < last_distance,
                "tile ({tile_row}, {tile_col}) stopped approaching {target:?}"
            );
            debug_assert!(current.0 <= target_row, "tile is below {target:?}");
            debug_assert_eq!(self.puzzle.blank_position(), target);
            last_distance = distance;

            let progress = if current.0 < target_row {
                self.carry_down(target, current)?
            } else if current.1 < target_col {
                self.carry_right(target, current)?
            } else {
                self.carry_left(target, current)?
            };

            if let Progress::Seated = progress {
                return Ok(());
            }
        }
    }

    /// Tile is in a row above the target.
    fn carry_down(
        &mut self,
        (target_row, target_col): (usize, usize),
        (row, col): (usize, usize),
    ) -> Result<Progress, PuzzleError> {
        let rise = target_row - row;
        self.repeat(Move::Up, rise)?;

        match col.cmp(&target_col) {
            Ordering::Less => {
                // the blank ends on the tile's old cell, tile shifted right
                self.repeat(Move::Left, target_col - col)?;
                self.repeat(Move::Down, rise)?;
                self.repeat(Move::Right, target_col - col)?;
            }
            Ordering::Greater => {
                self.repeat(Move::Right, col - target_col)?;
                // go around the tile through the row that has room
                if row == 0 {
                    self.step(Move::Down)?;
                    self.repeat(Move::Left, col - target_col + 1)?;
                    self.repeat(Move::Down, rise - 1)?;
                } else {
                    self.step(Move::Up)?;
                    self.repeat(Move::Left, col - target_col + 1)?;
                    self.repeat(Move::Down, rise + 1)?;
                }
                self.step(Move::Right)?;
            }
            Ordering::Equal => {
                // walking up pushed the tile down one row
                if row + 1 == target_row {
                    self.play(&[Move::Left, Move::Down])?;
                    return Ok(Progress::Seated);
                }
                self.step(Move::Left)?;
                self.repeat(Move::Down, rise)?;
                self.step(Move::Right)?;
            }
        }

        Ok(Progress::Advanced)
    }

    /// Tile is on the target row, left of the target.
    fn carry_right(
        &mut self,
        (_, target_col): (usize, usize),
        (_, col): (usize, usize),
    ) -> Result<Progress, PuzzleError> {
        let distance = target_col - col;
        self.repeat(Move::Left, distance)?;
        if distance == 1 {
            return Ok(Progress::Seated);
        }

        self.step(Move::Up)?;
        self.repeat(Move::Right, distance)?;
        self.step(Move::Down)?;
        Ok(Progress::Advanced)
    }

    /// Tile is on the target row, right of the target.
    fn carry_left(
        &mut self,
        (_, target_col): (usize, usize),
        (_, col): (usize, usize),
    ) -> Result<Progress, PuzzleError> {
        let distance = col - target_col;
        self.repeat(Move::Right, distance)?;
        if distance == 1 {
            self.play(&[Move::Up, Move::Left, Move::Left, Move::Down])?;
            return Ok(Progress::Seated);
        }

        self.step(Move::Up)?;
        self.repeat(Move::Left, distance)?;
        self.step(Move::Down)?;
        Ok(Progress::Advanced)
    }
}
