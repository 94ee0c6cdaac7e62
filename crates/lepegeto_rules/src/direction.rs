//! The eight compass directions a piece can step in.

use super::error::NoSuchDirection;
use super::position::Position;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One of the eight unit steps on the board.
///
/// Row numbers grow southward, so `North` is `(-1, 0)`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Direction {
    /// Up.
    North,
    /// Up and right.
    NorthEast,
    /// Right.
    East,
    /// Down and right.
    SouthEast,
    /// Down.
    South,
    /// Down and left.
    SouthWest,
    /// Left.
    West,
    /// Up and left.
    NorthWest,
}

impl Direction {
    /// All eight directions, clockwise from north.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Row change of one step.
    pub const fn row_change(self) -> i32 {
        match self {
            Direction::North | Direction::NorthEast | Direction::NorthWest => -1,
            Direction::East | Direction::West => 0,
            Direction::SouthEast | Direction::South | Direction::SouthWest => 1,
        }
    }

    /// Column change of one step.
    pub const fn col_change(self) -> i32 {
        match self {
            Direction::NorthWest | Direction::West | Direction::SouthWest => -1,
            Direction::North | Direction::South => 0,
            Direction::NorthEast | Direction::East | Direction::SouthEast => 1,
        }
    }

    /// Returns `(row_change, col_change)`.
    pub const fn delta(self) -> (i32, i32) {
        (self.row_change(), self.col_change())
    }

    /// Canonicalizes a coordinate delta into a direction.
    ///
    /// # Errors
    ///
    /// Returns [`NoSuchDirection`] unless the delta is exactly one of the
    /// eight unit vectors. The zero delta and any longer step are rejected.
    #[instrument(level = "trace")]
    pub fn of(row_change: i32, col_change: i32) -> Result<Self, NoSuchDirection> {
        Self::ALL
            .into_iter()
            .find(|d| d.delta() == (row_change, col_change))
            .ok_or(NoSuchDirection::new(row_change, col_change))
    }

    /// Direction of the single step from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`NoSuchDirection`] if the two cells are not 8-neighbours,
    /// including when they are too far apart to subtract.
    pub fn between(from: Position, to: Position) -> Result<Self, NoSuchDirection> {
        match from.delta_to(to) {
            Some((dr, dc)) => Self::of(dr, dc),
            None => Err(NoSuchDirection::new(
                to.row().wrapping_sub(from.row()),
                to.col().wrapping_sub(from.col()),
            )),
        }
    }
}
