use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// A direction the blank tile slides in, swapping with its neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Left,
    Down,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Left, Move::Down, Move::Right];

    /// Row and column offset of the blank after this move.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Left => (0, -1),
            Move::Down => (1, 0),
            Move::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }

    /// Single-letter form used in move strings.
    pub fn symbol(&self) -> char {
        match self {
            Move::Up => 'u',
            Move::Left => 'l',
            Move::Down => 'd',
            Move::Right => 'r',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_lowercase() {
            'u' => Some(Move::Up),
            'l' => Some(Move::Left),
            'd' => Some(Move::Down),
            'r' => Some(Move::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Left => "Left",
            Move::Down => "Down",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// An ordered list of moves, rendered as a string of `u`, `d`, `l`, `r`.
///
/// Concatenating two sequences and applying the result is the same as
/// applying them one after the other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MoveSequence(Vec<Move>);

impl MoveSequence {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    pub fn push(&mut self, movement: Move) {
        self.0.push(movement);
    }

    /// Appends every move of `other` in order.
    pub fn append(&mut self, other: &MoveSequence) {
        self.0.extend_from_slice(&other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Move] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<Move> {
        self.0
    }

    /// The sequence that undoes this one: reversed, each move flipped.
    pub fn inverse(&self) -> Self {
        self.0.iter().rev().map(Move::opposite).collect()
    }
}

impl AsRef<[Move]> for MoveSequence {
    fn as_ref(&self) -> &[Move] {
        &self.0
    }
}

impl From<Vec<Move>> for MoveSequence {
    fn from(moves: Vec<Move>) -> Self {
        Self(moves)
    }
}

impl FromIterator<Move> for MoveSequence {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Move> for MoveSequence {
    fn extend<I: IntoIterator<Item = Move>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for MoveSequence {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a MoveSequence {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for MoveSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for movement in &self.0 {
            write!(f, "{}", movement.symbol())?;
        }
        Ok(())
    }
}

impl FromStr for MoveSequence {
    type Err = ParseError;

    /// Parses a move string such as `"ruld"`. Whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .filter(|(_, symbol)| !symbol.is_whitespace())
            .map(|(position, symbol)| {
                Move::from_symbol(symbol).ok_or(ParseError::InvalidMove { symbol, position })
            })
            .collect()
    }
}
