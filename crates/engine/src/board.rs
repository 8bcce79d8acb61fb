//! The core board representation for the checkers engine.

use crate::constants::{BOARD_DIM, NUM_SQUARES, PIECES_PER_SIDE, Piece, Player, PromotionZone};
use crate::error::{EngineError, EngineResult};
use crate::r#move::LegalMove;
use crate::square::Square;
use std::fmt;
use tracing::debug;

/// One position on the board and whatever occupies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub square: Square,
    pub occupant: Option<Piece>,
    pub promotion: PromotionZone,
}

impl Cell {
    fn new(square: Square) -> Self {
        let promotion = if square.is_playable() {
            PromotionZone::for_row(square.row())
        } else {
            PromotionZone::Neither
        };
        Self { square, occupant: None, promotion }
    }

    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    pub fn owner(&self) -> Option<Player> {
        self.occupant.map(|p| p.owner)
    }

    pub fn is_king(&self) -> bool {
        self.occupant.is_some_and(|p| p.king)
    }
}

/// What happened to the board when a move was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveResult {
    /// The square and piece removed by a capture.
    pub captured: Option<(Square, Piece)>,
    /// Whether the moving piece was crowned on landing.
    pub promoted: bool,
}

/// The 8x8 grid plus the number of pieces each side has left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; NUM_SQUARES],
    counts: [u8; 2],
}

impl Default for Board {
    fn default() -> Self {
        Self::starting()
    }
}

impl Board {
    /// An empty grid. Promotion zones are fixed here and never change.
    pub fn new() -> Self {
        let mut cells = [Cell::new(Square::from_idx(0)); NUM_SQUARES];
        for sq in Square::all() {
            cells[sq.idx()] = Cell::new(sq);
        }
        Self { cells, counts: [0; 2] }
    }

    /// A fresh grid with the standard starting position.
    pub fn starting() -> Self {
        let mut board = Board::new();
        board.deal();
        board
    }

    /// Puts the starting position back onto this grid.
    ///
    /// Rows 0-2 get black men, rows 5-7 red men, rows 3-4 stay empty.
    pub fn deal(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.occupant = None;
        }
        for sq in Square::playable() {
            let owner = match sq.row() {
                0..=2 => Player::Black,
                5..=7 => Player::Red,
                _ => continue,
            };
            self.cells[sq.idx()].occupant = Some(Piece::man(owner));
        }
        self.counts = [PIECES_PER_SIDE; 2];
    }

    pub fn cell(&self, sq: Square) -> &Cell {
        &self.cells[sq.idx()]
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.idx()].occupant
    }

    pub fn is_empty(&self, sq: Square) -> bool {
        self.cells[sq.idx()].is_empty()
    }

    /// Number of pieces `player` has left.
    pub fn count(&self, player: Player) -> u8 {
        self.counts[player.idx()]
    }

    /// Squares holding `player`'s pieces, row by row.
    pub fn pieces_of(&self, player: Player) -> impl Iterator<Item = Square> + '_ {
        self.cells
            .iter()
            .filter(move |cell| cell.owner() == Some(player))
            .map(|cell| cell.square)
    }

    /// Moves the piece on `from` according to `mv`.
    ///
    /// The destination inherits the piece, a captured piece is removed and
    /// its side's count drops by one, and the piece is crowned if it lands
    /// in its promotion zone. `mv` must come from the move generator.
    pub fn apply_move(&mut self, from: Square, mv: LegalMove) -> MoveResult {
        let mut result = MoveResult::default();
        let Some(mut piece) = self.cells[from.idx()].occupant.take() else {
            return result;
        };
        let to = mv.destination;

        if let Some(over) = mv.captured {
            if let Some(taken) = self.cells[over.idx()].occupant.take() {
                let count = &mut self.counts[taken.owner.idx()];
                *count = count.saturating_sub(1);
                result.captured = Some((over, taken));
            }
        }

        if !piece.king && self.cells[to.idx()].promotion.promotes(piece.owner) {
            piece.king = true;
            result.promoted = true;
        }
        self.cells[to.idx()].occupant = Some(piece);

        debug!(
            player = ?piece.owner,
            from = %from,
            to = %to,
            captured = ?mv.captured.map(|sq| sq.notation()),
            promoted = result.promoted,
            "applied move"
        );
        result
    }

    /// Parses a board written as eight rows of eight characters, row 0 first.
    ///
    /// `b`/`B` black man/king, `r`/`R` red man/king, `.` or `-` empty.
    /// Blank lines and surrounding whitespace are ignored.
    pub fn from_layout(layout: &str) -> EngineResult<Board> {
        let mut board = Board::new();
        let rows: Vec<(usize, &str)> = layout
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty())
            .collect();

        if rows.len() != BOARD_DIM {
            return Err(EngineError::InvalidLayout {
                line: rows.last().map_or(0, |(line, _)| *line),
                reason: format!("expected {BOARD_DIM} rows, found {}", rows.len()),
            });
        }

        let mut counts = [0usize; 2];
        for (row, (line_no, text)) in rows.iter().enumerate() {
            let chars: Vec<char> = text.chars().collect();
            if chars.len() != BOARD_DIM {
                return Err(EngineError::InvalidLayout {
                    line: *line_no,
                    reason: format!("expected {BOARD_DIM} cells, found {}", chars.len()),
                });
            }
            for (col, &ch) in chars.iter().enumerate() {
                let sq = Square::from_idx(row * BOARD_DIM + col);
                let piece = match ch {
                    '.' | '-' => continue,
                    _ => Piece::from_layout_char(ch).ok_or_else(|| EngineError::InvalidLayout {
                        line: *line_no,
                        reason: format!("unknown cell character {ch:?}"),
                    })?,
                };
                if !sq.is_playable() {
                    return Err(EngineError::PieceOnUnplayableSquare { square: sq.notation() });
                }
                counts[piece.owner.idx()] += 1;
                board.cells[sq.idx()].occupant = Some(piece);
            }
        }

        for player in [Player::Red, Player::Black] {
            let count = counts[player.idx()];
            if count > PIECES_PER_SIDE as usize {
                return Err(EngineError::TooManyPieces { player: format!("{player:?}"), count });
            }
            board.counts[player.idx()] = count as u8;
        }

        Ok(board)
    }

    /// Renders the board in the format read by [`Board::from_layout`].
    pub fn to_layout(&self) -> String {
        let mut layout = String::with_capacity(NUM_SQUARES + BOARD_DIM);
        for row in self.cells.chunks(BOARD_DIM) {
            for cell in row {
                layout.push(match cell.occupant {
                    Some(piece) => piece.to_layout_char(),
                    None if cell.square.is_playable() => '.',
                    None => '-',
                });
            }
            layout.push('\n');
        }
        layout
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "(Black: {}, Red: {})",
            self.count(Player::Black),
            self.count(Player::Red)
        )?;
        writeln!(f, "  +-----------------+")?;
        for (r, row) in self.cells.chunks(BOARD_DIM).enumerate() {
            write!(f, "{} | ", r + 1)?;
            for cell in row {
                let ch = match cell.occupant {
                    Some(piece) => piece.to_layout_char(),
                    None if cell.square.is_playable() => '.',
                    None => ' ',
                };
                write!(f, "{} ", ch)?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "  +-----------------+")?;
        writeln!(f, "    a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: i32, col: i32) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn starting_position() {
        let board = Board::starting();
        assert_eq!(board.count(Player::Black), 12);
        assert_eq!(board.count(Player::Red), 12);
        assert_eq!(board.pieces_of(Player::Black).count(), 12);
        assert!(board.pieces_of(Player::Black).all(|sq| sq.row() <= 2 && sq.is_playable()));
        assert!(board.pieces_of(Player::Red).all(|sq| sq.row() >= 5 && sq.is_playable()));
        for col in 0..8 {
            assert!(board.is_empty(sq(3, col)));
            assert!(board.is_empty(sq(4, col)));
        }
    }

    #[test]
    fn promotion_zones_are_fixed_on_dark_end_rows() {
        let board = Board::new();
        assert_eq!(board.cell(sq(0, 1)).promotion, PromotionZone::PromotesRed);
        assert_eq!(board.cell(sq(7, 6)).promotion, PromotionZone::PromotesBlack);
        assert_eq!(board.cell(sq(7, 7)).promotion, PromotionZone::Neither);
        assert_eq!(board.cell(sq(3, 2)).promotion, PromotionZone::Neither);
    }

    #[test]
    fn deal_resets_a_played_board() {
        let mut board = Board::starting();
        board.apply_move(sq(2, 1), LegalMove::step(sq(3, 0)));
        board.deal();
        assert_eq!(board, Board::starting());
    }

    #[test]
    fn apply_step_moves_the_piece() {
        let mut board = Board::starting();
        let result = board.apply_move(sq(2, 1), LegalMove::step(sq(3, 2)));
        assert_eq!(result, MoveResult::default());
        assert!(board.is_empty(sq(2, 1)));
        assert_eq!(board.piece_at(sq(3, 2)), Some(Piece::man(Player::Black)));
        assert_eq!(board.count(Player::Red), 12);
    }

    #[test]
    fn apply_capture_removes_and_counts() {
        let mut board = Board::from_layout(
            "
            -.-.-.-.
            .-.-.-.-
            -.-.-.-.
            .-.-.-.-
            -.-b-.-.
            .-.-r-.-
            -.-.-.-.
            .-.-.-.-
            ",
        )
        .unwrap();
        let result = board.apply_move(sq(4, 3), LegalMove::jump(sq(6, 5), sq(5, 4)));
        assert_eq!(result.captured, Some((sq(5, 4), Piece::man(Player::Red))));
        assert!(!result.promoted);
        assert_eq!(board.count(Player::Red), 0);
        assert_eq!(board.count(Player::Black), 1);
        assert!(board.is_empty(sq(5, 4)));
    }

    #[test]
    fn landing_on_the_far_row_crowns() {
        let mut board = Board::new();
        board.cells[sq(6, 1).idx()].occupant = Some(Piece::man(Player::Black));
        let result = board.apply_move(sq(6, 1), LegalMove::step(sq(7, 0)));
        assert!(result.promoted);
        assert!(board.cell(sq(7, 0)).is_king());

        // Red men are not crowned on black's promotion row.
        board.cells[sq(6, 3).idx()].occupant = Some(Piece::man(Player::Red));
        let result = board.apply_move(sq(6, 3), LegalMove::step(sq(7, 2)));
        assert!(!result.promoted);
    }

    #[test]
    fn layout_round_trip_of_start() {
        let board = Board::starting();
        let parsed = Board::from_layout(&board.to_layout()).unwrap();
        assert_eq!(parsed, board);
    }

    #[test]
    fn layout_errors() {
        assert!(matches!(
            Board::from_layout("b"),
            Err(EngineError::InvalidLayout { .. })
        ));
        let light = "b.......\n........\n........\n........\n........\n........\n........\n........\n";
        assert!(matches!(
            Board::from_layout(light),
            Err(EngineError::PieceOnUnplayableSquare { .. })
        ));
        let bad_char = "-x-.-.-.\n........\n........\n........\n........\n........\n........\n........\n";
        assert!(matches!(
            Board::from_layout(bad_char),
            Err(EngineError::InvalidLayout { line: 1, .. })
        ));
    }
}
