//! Fixed board geometry.
//!
//! These predicates classify cells for display and staging. The commit path
//! does not consult them, so pieces can end up off the board.

use super::player::Player;
use super::position::Position;

/// Width and height of the board.
pub const BOARD_SIZE: i32 = 5;

/// The four blocked cells.
pub const FORBIDDEN: [Position; 4] = [
    Position::new(1, 1),
    Position::new(1, 3),
    Position::new(3, 1),
    Position::new(3, 3),
];

/// True iff `position` lies within the 5x5 board.
pub const fn is_on_board(position: Position) -> bool {
    position.row() >= 0
        && position.row() < BOARD_SIZE
        && position.col() >= 0
        && position.col() < BOARD_SIZE
}

/// True iff `position` is one of the blocked cells.
pub fn is_forbidden(position: Position) -> bool {
    FORBIDDEN.contains(&position)
}

/// Every on-board cell in row-major order.
pub fn all_cells() -> impl Iterator<Item = Position> {
    (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position::new(row, col)))
}

/// Row a side's pieces start on.
pub const fn home_row(player: Player) -> i32 {
    match player {
        Player::Blue => 0,
        Player::Red => BOARD_SIZE - 1,
    }
}

/// Row every piece of `player` must reach to win.
///
/// Blue's target lies one row past the southern edge; Red's is Blue's home row.
pub const fn target_row(player: Player) -> i32 {
    match player {
        Player::Blue => 6,
        Player::Red => 0,
    }
}
