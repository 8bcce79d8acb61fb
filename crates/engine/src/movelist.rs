//! A move list implementation that avoids heap allocations.

use crate::r#move::LegalMove;
use crate::square::Square;
use std::ops::Index;

/// A single piece has at most one destination per diagonal.
const MAX_MOVES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveList {
    moves: [Option<LegalMove>; MAX_MOVES],
    count: usize,
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveList {
    pub const fn new() -> Self {
        Self {
            moves: [None; MAX_MOVES],
            count: 0,
        }
    }

    pub fn add(&mut self, mv: LegalMove) {
        if self.count < MAX_MOVES {
            self.moves[self.count] = Some(mv);
            self.count += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &LegalMove> {
        self.moves[..self.count].iter().flatten()
    }

    /// The entry whose destination is `to`, if any.
    pub fn find(&self, to: Square) -> Option<LegalMove> {
        self.iter().find(|mv| mv.destination == to).copied()
    }

    pub fn contains_destination(&self, to: Square) -> bool {
        self.find(to).is_some()
    }

    pub fn has_capture(&self) -> bool {
        self.iter().any(LegalMove::is_capture)
    }
}

impl Index<usize> for MoveList {
    type Output = LegalMove;

    fn index(&self, index: usize) -> &Self::Output {
        match self.moves[..self.count].get(index) {
            Some(Some(mv)) => mv,
            _ => panic!("move index {index} out of range for list of {}", self.count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let a = Square::new(3, 0).unwrap();
        let b = Square::new(3, 2).unwrap();
        let mut list = MoveList::new();
        assert!(list.is_empty());
        list.add(LegalMove::step(a));
        list.add(LegalMove::step(b));
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].destination, a);
        assert_eq!(list[1].destination, b);
        assert!(list.contains_destination(b));
        assert!(!list.has_capture());
    }
}
