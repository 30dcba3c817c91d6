use rand::{seq::SliceRandom, Rng};
use std::fmt;
use std::str::FromStr;

use crate::error::{ParseError, PuzzleError};
use crate::moves::{Move, MoveSequence};

/// A rectangular sliding-tile grid.
///
/// Cells hold labels `0..height*width`, with `0` as the blank. The grid is
/// solved when cell `(row, col)` holds `col + width * row`, which puts the
/// blank in the top-left corner.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Puzzle {
    height: usize,
    width: usize,
    board: Vec<Vec<u32>>,
    blank_row: usize,
    blank_col: usize,
}

impl Puzzle {
    /// Creates a solved grid.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is smaller than 2.
    pub fn new(height: usize, width: usize) -> Self {
        assert!(
            height >= 2 && width >= 2,
            "grid must be at least 2x2, got {height}x{width}"
        );

        let board = (0..height)
            .map(|row| (0..width).map(|col| (col + width * row) as u32).collect())
            .collect();

        Self {
            height,
            width,
            board,
            blank_row: 0,
            blank_col: 0,
        }
    }

    /// Creates a grid from rows of labels.
    ///
    /// `labels` must be `height` rows of `width` labels forming a permutation
    /// of `0..height*width`. This is not checked outside debug builds; use
    /// [`str::parse`] for untrusted input.
    pub fn with_labels(height: usize, width: usize, labels: Vec<Vec<u32>>) -> Self {
        assert!(
            height >= 2 && width >= 2,
            "grid must be at least 2x2, got {height}x{width}"
        );
        debug_assert!(
            labels.len() == height && labels.iter().all(|row| row.len() == width),
            "labels do not match a {height}x{width} grid"
        );
        debug_assert!(
            is_permutation(&labels, height * width),
            "labels are not a permutation of 0..{}",
            height * width
        );

        let (blank_row, blank_col) = labels
            .iter()
            .enumerate()
            .find_map(|(row, cells)| cells.iter().position(|&v| v == 0).map(|col| (row, col)))
            .unwrap_or((0, 0));

        Self {
            height,
            width,
            board: labels,
            blank_row,
            blank_col,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.board[row][col]
    }

    /// Writes a label directly, bypassing move rules.
    ///
    /// Writing `0` moves the tracked blank to `(row, col)`. The caller is
    /// responsible for leaving the grid a permutation.
    pub fn set(&mut self, row: usize, col: usize, label: u32) {
        self.board[row][col] = label;
        if label == 0 {
            self.blank_row = row;
            self.blank_col = col;
        }
    }

    /// Label cell `(row, col)` holds once the grid is solved.
    pub fn solved_label(&self, row: usize, col: usize) -> u32 {
        (col + self.width * row) as u32
    }

    pub fn is_solved_at(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == self.solved_label(row, col)
    }

    pub fn is_solved(&self) -> bool {
        (0..self.height).all(|row| (0..self.width).all(|col| self.is_solved_at(row, col)))
    }

    pub fn blank_position(&self) -> (usize, usize) {
        (self.blank_row, self.blank_col)
    }

    /// Finds where the tile that belongs at `(solved_row, solved_col)`
    /// currently sits.
    pub fn current_position(
        &self,
        solved_row: usize,
        solved_col: usize,
    ) -> Result<(usize, usize), PuzzleError> {
        let label = self.solved_label(solved_row, solved_col);
        if label == 0 {
            return Ok(self.blank_position());
        }

        self.board
            .iter()
            .enumerate()
            .find_map(|(row, cells)| {
                cells
                    .iter()
                    .position(|&value| value == label)
                    .map(|col| (row, col))
            })
            .ok_or(PuzzleError::TileNotFound { label })
    }

    /// Cell the blank would reach with `movement`, if it stays on the grid.
    fn neighbor(&self, movement: Move) -> Option<(usize, usize)> {
        let (dr, dc) = movement.as_offset();
        let row = self.blank_row.checked_add_signed(dr)?;
        let col = self.blank_col.checked_add_signed(dc)?;

        (row < self.height && col < self.width).then_some((row, col))
    }

    pub fn can_move(&self, movement: Move) -> bool {
        self.neighbor(movement).is_some()
    }

    /// Slides the blank one cell, swapping it with the neighbouring tile.
    pub fn apply_move(&mut self, movement: Move) -> Result<(), PuzzleError> {
        let (new_row, new_col) = self.neighbor(movement).ok_or(PuzzleError::OutOfBounds {
            direction: movement,
            row: self.blank_row,
            col: self.blank_col,
        })?;

        self.board[self.blank_row][self.blank_col] = self.board[new_row][new_col];
        self.board[new_row][new_col] = 0;

        self.blank_row = new_row;
        self.blank_col = new_col;
        Ok(())
    }

    /// Applies every move in order, stopping at the first illegal one.
    ///
    /// Moves before the failing one stay applied.
    pub fn apply_moves(&mut self, moves: impl AsRef<[Move]>) -> Result<(), PuzzleError> {
        moves
            .as_ref()
            .iter()
            .try_for_each(|&movement| self.apply_move(movement))
    }

    pub fn legal_moves(&self) -> impl Iterator<Item = Move> + '_ {
        Move::ALL
            .into_iter()
            .filter(move |&movement| self.can_move(movement))
    }

    /// Scrambles the grid with a random walk of `steps` legal moves.
    ///
    /// The walk never immediately undoes its previous move. Because every
    /// step is a legal move, the result is always solvable.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, steps: usize, rng: &mut R) -> MoveSequence {
        let mut walk = MoveSequence::with_capacity(steps);
        let mut last: Option<Move> = None;

        for _ in 0..steps {
            let candidates: Vec<Move> = self
                .legal_moves()
                .filter(|&movement| last.map_or(true, |prev| movement != prev.opposite()))
                .collect();

            let Some(&movement) = candidates.choose(rng) else {
                break;
            };
            if self.apply_move(movement).is_ok() {
                walk.push(movement);
                last = Some(movement);
            }
        }

        walk
    }
}

fn is_permutation(labels: &[Vec<u32>], count: usize) -> bool {
    let mut seen = vec![false; count];
    for &label in labels.iter().flatten() {
        match seen.get_mut(label as usize) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    seen.into_iter().all(|present| present)
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell_width = (self.height * self.width - 1).to_string().len();
        for row in &self.board {
            for (col, &val) in row.iter().enumerate() {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>cell_width$}", val)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Puzzle {
    type Err = ParseError;

    /// Parses rows of labels. Rows are separated by newlines, `;` or `/`,
    /// labels within a row by whitespace or commas.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .split(['\n', ';', '/'])
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|token| !token.is_empty())
                    .map(|token| {
                        token
                            .parse::<u32>()
                            .map_err(|_| ParseError::InvalidLabel(token.to_string()))
                    })
                    .collect::<Result<Vec<u32>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if let Some((row, cells)) = rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != width)
        {
            return Err(ParseError::RaggedRow {
                row,
                found: cells.len(),
                expected: width,
            });
        }
        if height < 2 || width < 2 {
            return Err(ParseError::TooSmall { height, width });
        }
        if !is_permutation(&rows, height * width) {
            return Err(ParseError::NotPermutation(height * width));
        }

        Ok(Self::with_labels(height, width, rows))
    }
}
