//! The selection and turn state machine.
//!
//! A front end reports clicked cells through [`Game::on_cell_clicked`] and
//! reads back what to draw through the query methods. The board is only ever
//! mutated from here.

use crate::board::Board;
use crate::config::Config;
use crate::constants::{BOARD_DIM, Player};
use crate::move_gen::{board_has_capture_for, has_any_legal_move, has_capture, legal_moves_from};
use crate::movelist::MoveList;
use crate::r#move::LegalMove;
use crate::square::Square;
use tracing::{debug, info, trace};

/// Which piece, if any, is picked up and where it may go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    NoSelection,
    Selected { square: Square, moves: MoveList },
    /// The piece that just captured and must keep capturing.
    ChainSelected { square: Square, moves: MoveList },
}

/// Raised once per turn, after any capture chain has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveCompleted {
    /// Where the piece started the turn.
    pub from: Square,
    /// Where the piece ended the turn.
    pub to: Square,
    pub player: Player,
    /// Pieces taken during the turn.
    pub captures: u8,
}

/// What a click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing changed.
    Ignored,
    /// A piece was picked up (or the selection switched to it).
    Selected(Square),
    /// The selected piece was put back down.
    Deselected,
    /// A capture was made and the same piece must capture again.
    ChainContinues { from: Square, to: Square, captured: Square },
    /// The turn is over.
    MoveCompleted(MoveCompleted),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Player),
}

/// Everything a renderer needs to know about one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellView {
    pub occupant: Option<Player>,
    pub is_king: bool,
    pub is_selected: bool,
    pub is_highlighted: bool,
    pub is_playable: bool,
}

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    config: Config,
    current_player: Player,
    selection: Selection,
    mandatory_capture_active: bool,
    turn_origin: Option<Square>,
    turn_captures: u8,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Game {
    /// Starts a new game on a fresh board.
    pub fn new(config: Config) -> Self {
        Self::from_board(Board::starting(), config.first_player, config)
    }

    /// Starts a game from an arbitrary position with `to_move` on turn.
    pub fn from_board(board: Board, to_move: Player, config: Config) -> Self {
        let mut game = Self {
            board,
            config,
            current_player: to_move,
            selection: Selection::NoSelection,
            mandatory_capture_active: false,
            turn_origin: None,
            turn_captures: 0,
        };
        game.begin_turn(to_move);
        game
    }

    /// Resets to the starting position.
    ///
    /// `fresh_layout` builds a new grid; otherwise the pieces are re-dealt
    /// onto the existing one.
    pub fn initialize(&mut self, fresh_layout: bool) {
        if fresh_layout {
            self.board = Board::starting();
        } else {
            self.board.deal();
        }
        info!(fresh_layout, "game reset");
        self.begin_turn(self.config.first_player);
    }

    pub fn new_game(&mut self) {
        self.initialize(true);
    }

    pub fn restart(&mut self) {
        self.initialize(false);
    }

    /// Feeds one click into the state machine.
    ///
    /// Any coordinates are accepted; clicks off the board, on light cells, or
    /// matching no transition are ignored.
    pub fn on_cell_clicked(&mut self, row: i32, col: i32) -> ClickOutcome {
        let Some(clicked) = Square::new(row, col).filter(|sq| sq.is_playable()) else {
            trace!(row, col, "ignored click off the playable cells");
            return ClickOutcome::Ignored;
        };

        match self.selection {
            Selection::ChainSelected { square, moves } => match moves.find(clicked) {
                Some(mv) => self.make_move(square, mv),
                None => {
                    trace!(square = %clicked, "ignored click during capture chain");
                    ClickOutcome::Ignored
                }
            },
            Selection::Selected { square, moves } => {
                if clicked == square {
                    self.selection = Selection::NoSelection;
                    trace!(square = %clicked, "deselected");
                    ClickOutcome::Deselected
                } else if let Some(mv) = moves.find(clicked) {
                    self.make_move(square, mv)
                } else if self.is_own_piece(clicked) {
                    self.select(clicked)
                } else {
                    ClickOutcome::Ignored
                }
            }
            Selection::NoSelection => {
                if self.is_own_piece(clicked) {
                    self.select(clicked)
                } else {
                    ClickOutcome::Ignored
                }
            }
        }
    }

    fn is_own_piece(&self, sq: Square) -> bool {
        self.board.cell(sq).owner() == Some(self.current_player)
    }

    /// Whether simple steps are currently filtered out.
    fn capture_gate(&self) -> bool {
        self.config.mandatory_capture && self.mandatory_capture_active
    }

    fn select(&mut self, square: Square) -> ClickOutcome {
        let moves = legal_moves_from(&self.board, square, self.capture_gate());
        trace!(square = %square, moves = moves.len(), "selected");
        self.selection = Selection::Selected { square, moves };
        ClickOutcome::Selected(square)
    }

    fn make_move(&mut self, from: Square, mv: LegalMove) -> ClickOutcome {
        let origin = *self.turn_origin.get_or_insert(from);
        let to = mv.destination;
        let result = self.board.apply_move(from, mv);

        if let Some((captured, _)) = result.captured {
            self.turn_captures += 1;
            if has_capture(&self.board, to) {
                // Only further captures by this piece are legal now.
                let moves = legal_moves_from(&self.board, to, true);
                self.selection = Selection::ChainSelected { square: to, moves };
                debug!(player = ?self.current_player, square = %to, "capture chain continues");
                return ClickOutcome::ChainContinues { from, to, captured };
            }
        }

        let completed = MoveCompleted {
            from: origin,
            to,
            player: self.current_player,
            captures: self.turn_captures,
        };
        self.begin_turn(self.current_player.opponent());
        ClickOutcome::MoveCompleted(completed)
    }

    /// Hands the board to `player` and runs the board-wide capture scan.
    fn begin_turn(&mut self, player: Player) {
        self.current_player = player;
        self.mandatory_capture_active = board_has_capture_for(&self.board, player);
        self.selection = Selection::NoSelection;
        self.turn_origin = None;
        self.turn_captures = 0;

        info!(
            player = ?player,
            mandatory_capture = self.mandatory_capture_active,
            black = self.board.count(Player::Black),
            red = self.board.count(Player::Red),
            "turn started"
        );
        if let GameStatus::Won(winner) = self.status() {
            info!(winner = ?winner, "game decided");
        }
    }

    // --- Queries ---

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn count(&self, player: Player) -> u8 {
        self.board.count(player)
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected(&self) -> Option<Square> {
        match self.selection {
            Selection::NoSelection => None,
            Selection::Selected { square, .. } | Selection::ChainSelected { square, .. } => Some(square),
        }
    }

    /// Legal destinations of the current selection; empty without one.
    pub fn legal_moves(&self) -> MoveList {
        match self.selection {
            Selection::NoSelection => MoveList::new(),
            Selection::Selected { moves, .. } | Selection::ChainSelected { moves, .. } => moves,
        }
    }

    pub fn mandatory_capture_active(&self) -> bool {
        self.mandatory_capture_active
    }

    pub fn chain_capture_in_progress(&self) -> bool {
        matches!(self.selection, Selection::ChainSelected { .. })
    }

    /// The side to move loses once it has no pieces or no legal move.
    pub fn status(&self) -> GameStatus {
        let player = self.current_player;
        if self.board.count(player) == 0
            || !has_any_legal_move(&self.board, player, self.capture_gate())
        {
            GameStatus::Won(player.opponent())
        } else {
            GameStatus::InProgress
        }
    }

    pub fn is_over(&self) -> bool {
        self.status() != GameStatus::InProgress
    }

    pub fn occupant(&self, row: i32, col: i32) -> Option<Player> {
        self.cell_view(row, col).occupant
    }

    pub fn is_king(&self, row: i32, col: i32) -> bool {
        self.cell_view(row, col).is_king
    }

    pub fn is_selected(&self, row: i32, col: i32) -> bool {
        self.cell_view(row, col).is_selected
    }

    pub fn is_highlighted(&self, row: i32, col: i32) -> bool {
        self.cell_view(row, col).is_highlighted
    }

    /// Render state of one cell. Off-board coordinates report an empty cell.
    pub fn cell_view(&self, row: i32, col: i32) -> CellView {
        let Some(sq) = Square::new(row, col) else {
            return CellView::default();
        };
        let cell = self.board.cell(sq);
        CellView {
            occupant: cell.owner(),
            is_king: cell.is_king(),
            is_selected: self.selected() == Some(sq),
            is_highlighted: self.legal_moves().contains_destination(sq),
            is_playable: sq.is_playable(),
        }
    }

    /// Render state of the whole board, indexed `[row][col]`.
    pub fn snapshot(&self) -> [[CellView; BOARD_DIM]; BOARD_DIM] {
        let mut view = [[CellView::default(); BOARD_DIM]; BOARD_DIM];
        for (r, row) in view.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = self.cell_view(r as i32, c as i32);
            }
        }
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: i32, col: i32) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn new_game_state() {
        let game = Game::default();
        assert_eq!(game.current_player(), Player::Black);
        assert_eq!(game.selection(), Selection::NoSelection);
        assert!(!game.mandatory_capture_active());
        assert!(!game.chain_capture_in_progress());
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn off_board_and_light_cells_are_ignored() {
        let mut game = Game::default();
        assert_eq!(game.on_cell_clicked(-1, 3), ClickOutcome::Ignored);
        assert_eq!(game.on_cell_clicked(8, 0), ClickOutcome::Ignored);
        assert_eq!(game.on_cell_clicked(2, 2), ClickOutcome::Ignored);
        assert_eq!(game.cell_view(2, 2), CellView::default());
        assert_eq!(game.cell_view(100, -7), CellView::default());
    }

    #[test]
    fn cannot_select_opponent_or_empty() {
        let mut game = Game::default();
        assert_eq!(game.on_cell_clicked(5, 0), ClickOutcome::Ignored);
        assert_eq!(game.on_cell_clicked(3, 0), ClickOutcome::Ignored);
        assert_eq!(game.selected(), None);
    }

    #[test]
    fn switch_selection_between_own_pieces() {
        let mut game = Game::default();
        assert_eq!(game.on_cell_clicked(2, 1), ClickOutcome::Selected(sq(2, 1)));
        assert_eq!(game.on_cell_clicked(2, 3), ClickOutcome::Selected(sq(2, 3)));
        assert!(game.is_selected(2, 3));
        assert!(!game.is_selected(2, 1));
        assert!(game.is_highlighted(3, 4));
        assert!(!game.is_highlighted(3, 0));
        // Opponent pieces and unreachable empty cells leave the selection alone.
        assert_eq!(game.on_cell_clicked(5, 2), ClickOutcome::Ignored);
        assert_eq!(game.on_cell_clicked(4, 1), ClickOutcome::Ignored);
        assert_eq!(game.selected(), Some(sq(2, 3)));
    }

    #[test]
    fn restart_reuses_grid_and_resets_turn() {
        let mut game = Game::default();
        game.on_cell_clicked(2, 1);
        game.on_cell_clicked(3, 0);
        assert_eq!(game.current_player(), Player::Red);
        game.on_cell_clicked(5, 2);

        game.restart();
        assert_eq!(game.board(), &Board::starting());
        assert_eq!(game.current_player(), Player::Black);
        assert_eq!(game.selected(), None);

        game.on_cell_clicked(2, 1);
        game.new_game();
        assert_eq!(game.selected(), None);
        assert_eq!(game.count(Player::Red), 12);
    }

    #[test]
    fn first_player_is_configurable() {
        let game = Game::new(Config { first_player: Player::Red, ..Config::default() });
        assert_eq!(game.current_player(), Player::Red);
    }

    #[test]
    fn snapshot_matches_cell_views() {
        let mut game = Game::default();
        game.on_cell_clicked(2, 5);
        let view = game.snapshot();
        assert_eq!(view[2][5].occupant, Some(Player::Black));
        assert!(view[2][5].is_selected);
        assert!(view[3][4].is_highlighted && view[3][6].is_highlighted);
        assert!(!view[0][0].is_playable);
        assert_eq!(view[6][1], game.cell_view(6, 1));
    }
}
