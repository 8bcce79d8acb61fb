pub mod board;
pub mod config;
pub mod constants;
pub mod error;
pub mod game;
pub mod move_gen;
pub mod movelist;
pub mod r#move;
pub mod square;
pub mod tables;

pub use board::Board;
pub use config::Config;
pub use constants::{Piece, Player};
pub use game::{CellView, ClickOutcome, Game, GameStatus, MoveCompleted};
pub use square::Square;
