//! Defines the representation of a legal destination for a selected piece.

use crate::square::Square;
use std::fmt;

/// A destination the selected piece may move to.
///
/// `captured` holds the square jumped over when the move is a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LegalMove {
    pub destination: Square,
    pub captured: Option<Square>,
}

impl LegalMove {
    /// Creates a simple one-step move.
    pub fn step(destination: Square) -> Self {
        Self { destination, captured: None }
    }

    /// Creates a capture landing on `destination` over `captured`.
    pub fn jump(destination: Square, captured: Square) -> Self {
        Self { destination, captured: Some(captured) }
    }

    /// Checks if the move is a capture.
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

impl fmt::Display for LegalMove {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.captured {
            Some(over) => write!(f, "x{} (over {})", self.destination, over),
            None => write!(f, "-{}", self.destination),
        }
    }
}
