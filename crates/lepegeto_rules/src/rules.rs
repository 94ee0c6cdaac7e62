//! Pure move-validation and victory rules.

use super::board::target_row;
use super::direction::Direction;
use super::error::MoveError;
use super::player::Player;
use super::position::Position;
use super::staging::Staging;
use tracing::{debug, instrument};

/// Derives the single direction both staged pieces step in.
///
/// Pairing is by insertion index: `selected[i]` moves to `ghosts[i]`. Each
/// pair must be an 8-neighbour step, and both steps must share a direction.
///
/// # Errors
///
/// Returns [`MoveError::IncompleteMove`] unless both lists hold two entries,
/// and [`MoveError::InvalidMove`] when a pair is not a unit step or the two
/// directions differ.
#[instrument(level = "debug", skip_all)]
pub fn shared_direction(
    selected: &Staging<Position>,
    ghosts: &Staging<Position>,
) -> Result<Direction, MoveError> {
    let (Some(s0), Some(s1), Some(g0), Some(g1)) = (
        selected.get(0),
        selected.get(1),
        ghosts.get(0),
        ghosts.get(1),
    ) else {
        return Err(MoveError::IncompleteMove {
            selected: selected.len(),
            ghosts: ghosts.len(),
        });
    };

    let first = Direction::between(s0, g0)?;
    let second = Direction::between(s1, g1)?;
    debug!(%first, %second, "Staged step directions");

    if first == second {
        Ok(first)
    } else {
        Err(MoveError::InvalidMove)
    }
}

/// True iff every piece of `player` stands on that side's target row.
pub fn is_winner(player: Player, positions: &[Position]) -> bool {
    let target = target_row(player);
    positions.iter().all(|p| p.row() == target)
}
