//! Sides and cell ownership.

use serde::{Deserialize, Serialize};

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Player {
    /// Starts on row 0 and moves first.
    Blue,
    /// Starts on row 4.
    Red,
}

impl Player {
    /// Both sides, Blue first.
    pub const ALL: [Player; 2] = [Player::Blue, Player::Red];

    /// Returns the opponent.
    pub const fn other(self) -> Self {
        match self {
            Player::Blue => Player::Red,
            Player::Red => Player::Blue,
        }
    }
}

/// Classification of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Owner {
    /// Occupied by a blue piece.
    Blue,
    /// Occupied by a red piece.
    Red,
    /// One of the four blocked cells.
    Forbidden,
    /// Free.
    None,
}

impl From<Player> for Owner {
    fn from(player: Player) -> Self {
        match player {
            Player::Blue => Owner::Blue,
            Player::Red => Owner::Red,
        }
    }
}
