//! Pre-computed step and jump tables.
//!
//! For every square and every entry of `DIFFS`, the square one step away and
//! the (jumped, landing) pair two steps away. Built once, read everywhere.

use crate::constants::{DIFFS, NUM_SQUARES};
use crate::square::Square;
use once_cell::sync::Lazy;

pub struct StepTables {
    /// `step[sq][dir]`: the adjacent square in direction `dir`.
    pub step: [[Option<Square>; 4]; NUM_SQUARES],
    /// `jump[sq][dir]`: (square jumped over, landing square).
    pub jump: [[Option<(Square, Square)>; 4]; NUM_SQUARES],
}

impl StepTables {
    fn new() -> Self {
        let mut tables = StepTables {
            step: [[None; 4]; NUM_SQUARES],
            jump: [[None; 4]; NUM_SQUARES],
        };

        for from in Square::all() {
            for (dir, &diff) in DIFFS.iter().enumerate() {
                let Some(adj) = from.offset(diff) else { continue };
                tables.step[from.idx()][dir] = Some(adj);
                if let Some(land) = adj.offset(diff) {
                    tables.jump[from.idx()][dir] = Some((adj, land));
                }
            }
        }

        tables
    }
}

pub static STEP_TABLES: Lazy<StepTables> = Lazy::new(StepTables::new);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_squares_have_fewer_neighbours() {
        let corner = Square::new(7, 0).unwrap();
        let steps = STEP_TABLES.step[corner.idx()].iter().flatten().count();
        assert_eq!(steps, 1);

        let centre = Square::new(3, 4).unwrap();
        assert_eq!(STEP_TABLES.step[centre.idx()].iter().flatten().count(), 4);
        assert_eq!(STEP_TABLES.jump[centre.idx()].iter().flatten().count(), 4);
    }

    #[test]
    fn jumps_pass_over_the_adjacent_square() {
        for from in Square::playable() {
            for dir in 0..4 {
                if let Some((over, land)) = STEP_TABLES.jump[from.idx()][dir] {
                    assert_eq!(STEP_TABLES.step[from.idx()][dir], Some(over));
                    assert!(over.is_playable() && land.is_playable());
                }
            }
        }
    }
}
