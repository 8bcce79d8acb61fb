//! Board coordinates.

use crate::constants::{BOARD_DIM, MoveDiff, NUM_SQUARES};
use crate::error::{EngineError, EngineResult};
use std::fmt;

pub const fn sq_to_idx(r: usize, c: usize) -> usize {
    r * BOARD_DIM + c
}

const fn is_valid(r: i32, c: i32) -> bool {
    r >= 0 && r < BOARD_DIM as i32 && c >= 0 && c < BOARD_DIM as i32
}

/// A cell position that is always on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Returns `None` for coordinates off the board.
    pub const fn new(row: i32, col: i32) -> Option<Square> {
        if is_valid(row, col) {
            Some(Square { row: row as u8, col: col as u8 })
        } else {
            None
        }
    }

    pub const fn from_idx(idx: usize) -> Square {
        Square { row: (idx / BOARD_DIM) as u8, col: (idx % BOARD_DIM) as u8 }
    }

    pub const fn idx(self) -> usize {
        sq_to_idx(self.row as usize, self.col as usize)
    }

    pub const fn row(self) -> u8 {
        self.row
    }

    pub const fn col(self) -> u8 {
        self.col
    }

    /// Only the dark cells, where `row + col` is odd, ever hold pieces.
    pub const fn is_playable(self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    /// The neighbouring square one step along `diff`, if on the board.
    pub fn offset(self, diff: MoveDiff) -> Option<Square> {
        Square::new(
            self.row as i32 + diff.delta_row as i32,
            self.col as i32 + diff.delta_col as i32,
        )
    }

    /// Every square, row by row.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..NUM_SQUARES).map(Square::from_idx)
    }

    /// The 32 dark squares, row by row.
    pub fn playable() -> impl Iterator<Item = Square> {
        Square::all().filter(|sq| sq.is_playable())
    }

    /// Parses algebraic notation: file `a`-`h` is the column, rank `1`-`8` the row.
    pub fn from_notation(s: &str) -> EngineResult<Square> {
        let mut chars = s.trim().chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(EngineError::InvalidSquare(s.to_string()));
        };
        let col = (file.to_ascii_lowercase() as i32) - ('a' as i32);
        let row = rank.to_digit(10).map(|d| d as i32 - 1).unwrap_or(-1);
        Square::new(row, col).ok_or_else(|| EngineError::InvalidSquare(s.to_string()))
    }

    pub fn notation(self) -> String {
        format!("{}{}", (b'a' + self.col) as char, self.row + 1)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.notation())
    }
}
