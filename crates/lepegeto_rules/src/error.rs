//! Error kinds reported by the rule engine.
//!
//! Every error is recoverable: a failed command leaves the game state exactly
//! as it was, so the caller can report the message and let the player retry.

use super::position::Position;

/// Rejection of a staging command ([`add_selection`] or [`add_ghost`]).
///
/// [`add_selection`]: crate::GameState::add_selection
/// [`add_ghost`]: crate::GameState::add_ghost
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum StageError {
    /// The cell is not occupied by the player to move.
    #[display("{} is not occupied by the player to move", _0)]
    NotOwned(Position),

    /// The piece is already selected this turn.
    #[display("{} is already selected", _0)]
    AlreadySelected(Position),

    /// Two pieces are already selected.
    #[display("Cannot select more than two pieces")]
    SelectionFull,

    /// The target cell is occupied or blocked.
    #[display("{} is not a free cell", _0)]
    NotFree(Position),

    /// The cell is already a staged target.
    #[display("{} is already targeted", _0)]
    AlreadyTargeted(Position),

    /// Two targets are already staged.
    #[display("Cannot target more than two cells")]
    GhostsFull,
}

impl std::error::Error for StageError {}

/// Rejection of [`end_turn`](crate::GameState::end_turn).
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// Fewer than two pieces or two targets are staged.
    #[display("Move incomplete: {} selected, {} targeted", selected, ghosts)]
    IncompleteMove {
        /// Number of staged pieces.
        selected: usize,
        /// Number of staged targets.
        ghosts: usize,
    },

    /// The staged pairs do not step in one shared compass direction.
    #[display("Staged pieces do not step in the same direction")]
    InvalidMove,
}

impl std::error::Error for MoveError {}

/// A coordinate delta that is not one of the eight unit steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("No direction has delta ({}, {})", row_change, col_change)]
pub struct NoSuchDirection {
    /// Rejected row change.
    pub row_change: i32,
    /// Rejected column change.
    pub col_change: i32,
}

impl NoSuchDirection {
    /// Creates the error for a rejected delta.
    pub const fn new(row_change: i32, col_change: i32) -> Self {
        Self {
            row_change,
            col_change,
        }
    }
}

impl std::error::Error for NoSuchDirection {}

impl From<NoSuchDirection> for MoveError {
    fn from(_: NoSuchDirection) -> Self {
        MoveError::InvalidMove
    }
}
