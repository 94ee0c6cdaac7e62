//! Flat, order-stable record of a game for external persistence.

use super::player::Player;
use super::position::Position;
use super::staging::Staging;
use super::state::GameState;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Everything needed to restore a game, minus the fixed blocked cells.
///
/// Piece order within each side is preserved exactly. Staging is not part of
/// a snapshot; a restored game starts its turn with nothing staged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Side to move.
    pub current_player: Player,
    /// Blue pieces.
    pub blue: Vec<Position>,
    /// Red pieces.
    pub red: Vec<Position>,
    /// Committed moves so far.
    pub turn_count: u32,
}

impl GameState {
    /// Captures the persistent part of the state.
    #[instrument(skip(self))]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            current_player: self.current_player,
            blue: self.blue.clone(),
            red: self.red.clone(),
            turn_count: self.turn_count,
        }
    }

    /// Rebuilds a game from a snapshot.
    ///
    /// The snapshot is taken as-is; overlapping or missing pieces are the
    /// caller's concern (see [`RuleInvariants`](crate::RuleInvariants)).
    #[instrument(skip(snapshot), fields(turn = snapshot.turn_count))]
    pub fn from_snapshot(snapshot: GameSnapshot) -> Self {
        Self {
            current_player: snapshot.current_player,
            blue: snapshot.blue,
            red: snapshot.red,
            turn_count: snapshot.turn_count,
            selected: Staging::new(),
            ghosts: Staging::new(),
        }
    }
}

impl From<GameSnapshot> for GameState {
    fn from(snapshot: GameSnapshot) -> Self {
        GameState::from_snapshot(snapshot)
    }
}

impl From<&GameState> for GameSnapshot {
    fn from(state: &GameState) -> Self {
        state.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_of_new_game() {
        let snapshot = GameState::new().snapshot();
        assert_eq!(snapshot.current_player, Player::Blue);
        assert_eq!(snapshot.turn_count, 0);
        assert_eq!(snapshot.blue.len(), 5);
        assert_eq!(snapshot.red[2], Position::new(4, 2));
    }

    #[test]
    fn test_restore_drops_staging() {
        let mut state = GameState::new();
        state.add_selection(Position::new(0, 0)).unwrap();
        state.add_ghost(Position::new(1, 0)).unwrap();

        let restored = GameState::from_snapshot(state.snapshot());
        assert!(restored.selected().is_empty());
        assert!(restored.ghosts().is_empty());
        assert_eq!(restored.positions_of(Player::Blue), state.positions_of(Player::Blue));
    }
}
