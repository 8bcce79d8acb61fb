//! Configuration for the checkers engine.

use crate::constants::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Side that moves first after a new game or restart.
    pub first_player: Player,
    /// When set, simple steps are illegal while the side to move can capture.
    pub mandatory_capture: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            first_player: Player::Black,
            mandatory_capture: true,
        }
    }
}
