//! Error types for the text surfaces of the engine.
//!
//! The game state machine itself never fails: invalid clicks are ignored.
//! Only parsing board layouts and square names can go wrong.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Square name that is not `a1`..`h8`
    #[error("Invalid square: {0:?}")]
    InvalidSquare(String),

    /// Malformed board layout
    #[error("Invalid layout at line {line}: {reason}")]
    InvalidLayout { line: usize, reason: String },

    /// A piece placed on a light cell
    #[error("Piece on unplayable square {square}")]
    PieceOnUnplayableSquare { square: String },

    /// More pieces for one side than a game can hold
    #[error("Too many {player} pieces: {count}")]
    TooManyPieces { player: String, count: usize },
}

pub type EngineResult<T> = Result<T, EngineError>;
