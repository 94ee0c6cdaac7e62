//! Lepegeto rule engine.
//!
//! Lepegeto is played on a 5x5 board with four blocked cells. Blue starts on
//! row 0 and Red on row 4. On each turn the mover stages two of their own
//! pieces and two free target cells, and both pieces step one cell in the
//! same compass direction.
//!
//! # Example
//!
//! ```
//! use lepegeto_rules::{GameState, Owner, Player, Position};
//!
//! let mut state = GameState::new();
//! state.add_selection(Position::new(0, 0))?;
//! state.add_selection(Position::new(0, 1))?;
//! state.add_ghost(Position::new(1, 0))?;
//! state.add_ghost(Position::new(1, 1)).unwrap_err(); // (1,1) is blocked
//! state.add_ghost(Position::new(1, 2))?;
//! assert!(state.end_turn().is_err()); // south and south-east do not match
//! # Ok::<(), lepegeto_rules::StageError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod direction;
mod error;
mod invariants;
mod player;
mod position;
mod rules;
mod snapshot;
mod staging;
mod state;

pub use board::{BOARD_SIZE, FORBIDDEN, all_cells, home_row, is_forbidden, is_on_board, target_row};
pub use direction::Direction;
pub use error::{MoveError, NoSuchDirection, StageError};
pub use invariants::{
    DisjointCells, FivePiecesEach, Invariant, InvariantSet, InvariantViolation, RuleInvariants,
};
pub use player::{Owner, Player};
pub use position::Position;
pub use rules::{is_winner, shared_direction};
pub use snapshot::GameSnapshot;
pub use staging::{PushRejection, STAGING_CAPACITY, Staging};
pub use state::GameState;
