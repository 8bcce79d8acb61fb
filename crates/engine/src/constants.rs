//! Constants used in the checkers engine.

use std::ops::Range;

/// Number of rows and columns on the board.
pub const BOARD_DIM: usize = 8;
pub const NUM_SQUARES: usize = BOARD_DIM * BOARD_DIM;

/// Pieces each side starts with.
pub const PIECES_PER_SIDE: u8 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Red,
    Black,
}

impl Player {
    /// Get the opponent of the current player.
    pub fn opponent(self) -> Player {
        match self {
            Player::Red => Player::Black,
            Player::Black => Player::Red,
        }
    }

    /// Index used for per-side arrays (0 for Red, 1 for Black).
    pub fn idx(self) -> usize {
        if self == Player::Red { 0 } else { 1 }
    }

    /// The zone that promotes this player's pieces.
    pub fn promotion_zone(self) -> PromotionZone {
        match self {
            Player::Red => PromotionZone::PromotesRed,
            Player::Black => PromotionZone::PromotesBlack,
        }
    }
}

/// A piece as stored by the cell holding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub owner: Player,
    pub king: bool,
}

impl Piece {
    pub const fn man(owner: Player) -> Self {
        Self { owner, king: false }
    }

    pub const fn king(owner: Player) -> Self {
        Self { owner, king: true }
    }

    /// A king may jump anything; a man may never jump a king.
    pub fn can_capture(self, target: Piece) -> bool {
        self.owner != target.owner && (self.king || !target.king)
    }

    /// Indices into `DIFFS` of the directions this piece may move in.
    pub fn diff_range(self) -> Range<usize> {
        if self.king {
            0..DIFFS.len()
        } else {
            match self.owner {
                Player::Black => FORWARD,
                Player::Red => BACKWARD,
            }
        }
    }

    /// The movement directions available to this piece.
    pub fn diffs(self) -> &'static [MoveDiff] {
        &DIFFS[self.diff_range()]
    }

    pub fn to_layout_char(self) -> char {
        match (self.owner, self.king) {
            (Player::Black, false) => 'b',
            (Player::Black, true) => 'B',
            (Player::Red, false) => 'r',
            (Player::Red, true) => 'R',
        }
    }

    pub fn from_layout_char(c: char) -> Option<Piece> {
        match c {
            'b' => Some(Piece::man(Player::Black)),
            'B' => Some(Piece::king(Player::Black)),
            'r' => Some(Piece::man(Player::Red)),
            'R' => Some(Piece::king(Player::Red)),
            _ => None,
        }
    }
}

/// Which pieces, if any, get crowned on landing in a cell.
/// Fixed when the board is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromotionZone {
    Neither,
    PromotesRed,
    PromotesBlack,
}

impl PromotionZone {
    /// Zone for a given row: row 0 crowns red, the last row crowns black.
    pub fn for_row(row: u8) -> Self {
        match row as usize {
            0 => PromotionZone::PromotesRed,
            r if r == BOARD_DIM - 1 => PromotionZone::PromotesBlack,
            _ => PromotionZone::Neither,
        }
    }

    pub fn promotes(self, player: Player) -> bool {
        self == player.promotion_zone()
    }
}

/// A diagonal direction as (row delta, col delta).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveDiff {
    pub delta_row: i8,
    pub delta_col: i8,
}

impl MoveDiff {
    pub const fn new(delta_row: i8, delta_col: i8) -> Self {
        Self { delta_row, delta_col }
    }
}

// Forward (black) directions first, backward (red) directions last.
pub const DIFFS: [MoveDiff; 4] = [
    MoveDiff::new(1, 1),
    MoveDiff::new(1, -1),
    MoveDiff::new(-1, -1),
    MoveDiff::new(-1, 1),
];

/// Directions used by black men (increasing row).
pub const FORWARD: Range<usize> = 0..2;
/// Directions used by red men (decreasing row).
pub const BACKWARD: Range<usize> = 2..4;
