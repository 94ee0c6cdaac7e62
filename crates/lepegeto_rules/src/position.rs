//! Board coordinates.

use super::direction::Direction;
use serde::{Deserialize, Serialize};

/// A cell coordinate, `row` counted downward from Blue's home row.
///
/// A position carries no notion of validity. Whether it lies on the board is
/// answered by [`is_on_board`](crate::is_on_board), and committed moves may
/// carry a piece past the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    row: i32,
    col: i32,
}

impl Position {
    /// Creates a position from row and column.
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Returns the row coordinate.
    pub const fn row(self) -> i32 {
        self.row
    }

    /// Returns the column coordinate.
    pub const fn col(self) -> i32 {
        self.col
    }

    /// Returns the neighbouring position one step in `direction`.
    ///
    /// No bounds check is made. Coordinates saturate at the `i32` limits.
    pub const fn translate(self, direction: Direction) -> Self {
        Self {
            row: self.row.saturating_add(direction.row_change()),
            col: self.col.saturating_add(direction.col_change()),
        }
    }

    /// Returns `(other.row - self.row, other.col - self.col)`, or `None` if
    /// either difference overflows `i32`.
    pub const fn delta_to(self, other: Position) -> Option<(i32, i32)> {
        match (other.row.checked_sub(self.row), other.col.checked_sub(self.col)) {
            (Some(dr), Some(dc)) => Some((dr, dc)),
            _ => None,
        }
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}
