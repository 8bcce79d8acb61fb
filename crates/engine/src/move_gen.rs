//! Move generation: legal destinations, capture detection and the
//! board-wide mandatory capture scan.

use crate::board::Board;
use crate::constants::Player;
use crate::movelist::MoveList;
use crate::r#move::LegalMove;
use crate::square::Square;
use crate::tables::STEP_TABLES;

/// Legal destinations for the piece on `from`, in `DIFFS` order.
///
/// Simple steps are left out while `mandatory_capture` is set; captures are
/// always included. An empty square yields an empty list.
pub fn legal_moves_from(board: &Board, from: Square, mandatory_capture: bool) -> MoveList {
    let mut moves = MoveList::new();
    let Some(piece) = board.piece_at(from) else {
        return moves;
    };

    for dir in piece.diff_range() {
        let Some(adj) = STEP_TABLES.step[from.idx()][dir] else { continue };
        match board.piece_at(adj) {
            None => {
                if !mandatory_capture {
                    moves.add(LegalMove::step(adj));
                }
            }
            Some(target) if piece.can_capture(target) => {
                if let Some((_, land)) = STEP_TABLES.jump[from.idx()][dir] {
                    if board.is_empty(land) {
                        moves.add(LegalMove::jump(land, adj));
                    }
                }
            }
            Some(_) => {}
        }
    }

    moves
}

/// Whether the piece on `from` can capture anything right now.
pub fn has_capture(board: &Board, from: Square) -> bool {
    let Some(piece) = board.piece_at(from) else {
        return false;
    };

    piece.diff_range().any(|dir| match STEP_TABLES.jump[from.idx()][dir] {
        Some((over, land)) => {
            board.piece_at(over).is_some_and(|target| piece.can_capture(target))
                && board.is_empty(land)
        }
        None => false,
    })
}

/// Whether any of `player`'s pieces has a capture available.
pub fn board_has_capture_for(board: &Board, player: Player) -> bool {
    board.pieces_of(player).any(|sq| has_capture(board, sq))
}

/// Whether `player` has at least one legal move anywhere on the board.
pub fn has_any_legal_move(board: &Board, player: Player, mandatory_capture: bool) -> bool {
    board
        .pieces_of(player)
        .any(|sq| !legal_moves_from(board, sq, mandatory_capture).is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: i32, col: i32) -> Square {
        Square::new(row, col).unwrap()
    }

    fn destinations(moves: &MoveList) -> Vec<Square> {
        moves.iter().map(|mv| mv.destination).collect()
    }

    #[test]
    fn opening_steps() {
        let board = Board::starting();
        let moves = legal_moves_from(&board, sq(2, 1), false);
        assert_eq!(destinations(&moves), vec![sq(3, 2), sq(3, 0)]);
        assert!(!moves.has_capture());

        // Back-row pieces are blocked by their own side.
        assert!(legal_moves_from(&board, sq(0, 1), false).is_empty());
        // Red moves towards row 0.
        let red = legal_moves_from(&board, sq(5, 2), false);
        assert_eq!(destinations(&red), vec![sq(4, 1), sq(4, 3)]);
        assert!(!board_has_capture_for(&board, Player::Black));
        assert!(!board_has_capture_for(&board, Player::Red));
    }

    #[test]
    fn capture_is_offered_and_steps_filtered() {
        let board = Board::from_layout(
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
        assert!(has_capture(&board, sq(4, 3)));
        assert!(board_has_capture_for(&board, Player::Black));

        let gated = legal_moves_from(&board, sq(4, 3), true);
        assert_eq!(gated.len(), 1);
        assert_eq!(gated[0], LegalMove::jump(sq(6, 5), sq(5, 4)));

        let ungated = legal_moves_from(&board, sq(4, 3), false);
        assert_eq!(
            destinations(&ungated),
            vec![sq(6, 5), sq(5, 2)]
        );
    }

    #[test]
    fn men_cannot_jump_kings_but_kings_can() {
        let board = Board::from_layout(
            "
            -.-.-.-.
            .-.-.-.-
            -.-b-.-.
            .-.-R-.-
            -.-.-.-.
            .-.-.-.-
            -.-.-.-.
            .-.-.-.-
            ",
        )
        .unwrap();
        assert!(!has_capture(&board, sq(2, 3)));
        assert!(!legal_moves_from(&board, sq(2, 3), false).has_capture());
        // The red king may jump the black man backwards over it.
        assert!(has_capture(&board, sq(3, 4)));
        let moves = legal_moves_from(&board, sq(3, 4), true);
        assert_eq!(moves[0], LegalMove::jump(sq(1, 2), sq(2, 3)));
    }

    #[test]
    fn no_capture_without_landing_room() {
        let board = Board::from_layout(
            "
            -.-.-.-.
            .-.-.-.-
            -.-.-.-.
            .-.-.-.-
            -.-.-.-.
            .-.-.-b-
            -.-.-.-r
            .-.-.-.-
            ",
        )
        .unwrap();
        // The jump over (6,7) would land off the board.
        assert!(!has_capture(&board, sq(5, 6)));
        assert!(!board_has_capture_for(&board, Player::Black));
    }

    #[test]
    fn kings_use_all_four_diagonals() {
        let board = Board::from_layout(
            "
            -.-.-.-.
            .-.-.-.-
            -.-.-.-.
            .-.-B-.-
            -.-.-.-.
            .-.-.-.-
            -.-.-.-.
            .-.-.-.-
            ",
        )
        .unwrap();
        let moves = legal_moves_from(&board, sq(3, 4), false);
        assert_eq!(
            destinations(&moves),
            vec![sq(4, 5), sq(4, 3), sq(2, 3), sq(2, 5)]
        );
        assert!(has_any_legal_move(&board, Player::Black, false));
        assert!(!has_any_legal_move(&board, Player::Red, false));
    }

    #[test]
    fn empty_square_has_no_moves() {
        let board = Board::starting();
        assert!(legal_moves_from(&board, sq(3, 0), false).is_empty());
        assert!(!has_capture(&board, sq(3, 0)));
    }
}
