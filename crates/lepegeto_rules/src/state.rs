//! Mutable game state: piece positions, turn, and the per-turn staging.

use super::board::{BOARD_SIZE, all_cells, home_row, is_forbidden};
use super::error::{MoveError, StageError};
use super::player::{Owner, Player};
use super::position::Position;
use super::rules::{is_winner, shared_direction};
use super::staging::{PushRejection, Staging};
use tracing::{debug, info, instrument};

/// Complete state of one game.
///
/// A turn is played by staging two of the mover's pieces with
/// [`add_selection`](Self::add_selection), staging two free target cells
/// with [`add_ghost`](Self::add_ghost), then committing with
/// [`end_turn`](Self::end_turn).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) current_player: Player,
    pub(crate) blue: Vec<Position>,
    pub(crate) red: Vec<Position>,
    pub(crate) turn_count: u32,
    pub(crate) selected: Staging<Position>,
    pub(crate) ghosts: Staging<Position>,
}

impl GameState {
    /// Creates the starting layout: Blue on row 0, Red on row 4, Blue to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            current_player: Player::Blue,
            blue: starting_row(Player::Blue),
            red: starting_row(Player::Red),
            turn_count: 0,
            selected: Staging::new(),
            ghosts: Staging::new(),
        }
    }

    /// Restores the starting layout, discarding staging and turn count.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        *self = Self::new();
        info!("Game state reset");
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// The side to move.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Number of committed moves.
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    /// Positions of every piece of `player`, in stable order.
    pub fn positions_of(&self, player: Player) -> &[Position] {
        match player {
            Player::Blue => &self.blue,
            Player::Red => &self.red,
        }
    }

    /// Positions of the side to move.
    pub fn current_player_positions(&self) -> &[Position] {
        self.positions_of(self.current_player)
    }

    /// Staged pieces, in insertion order.
    pub fn selected(&self) -> Vec<Position> {
        self.selected.to_vec()
    }

    /// Staged targets, in insertion order.
    pub fn ghosts(&self) -> Vec<Position> {
        self.ghosts.to_vec()
    }

    /// True if a blue piece stands on `position`.
    pub fn is_blue(&self, position: Position) -> bool {
        self.blue.contains(&position)
    }

    /// True if a red piece stands on `position`.
    pub fn is_red(&self, position: Position) -> bool {
        self.red.contains(&position)
    }

    /// True if the side to move has a piece on `position`.
    pub fn is_occupied_by_current_player(&self, position: Position) -> bool {
        self.current_player_positions().contains(&position)
    }

    /// True if `position` holds no piece and is not blocked.
    ///
    /// Off-board cells count as free; staging relies on the one-step rule to
    /// keep targets near the board.
    pub fn is_free(&self, position: Position) -> bool {
        self.owner(position) == Owner::None
    }

    /// Classifies a cell. Pieces take precedence over the blocked set.
    pub fn owner(&self, position: Position) -> Owner {
        if self.is_blue(position) {
            Owner::Blue
        } else if self.is_red(position) {
            Owner::Red
        } else if is_forbidden(position) {
            Owner::Forbidden
        } else {
            Owner::None
        }
    }

    /// True iff every piece of the side to move stands on its target row.
    pub fn is_current_player_winner(&self) -> bool {
        is_winner(self.current_player, self.current_player_positions())
    }

    /// The side whose win condition holds, checked for the side to move.
    pub fn winner(&self) -> Option<Player> {
        self.is_current_player_winner().then_some(self.current_player)
    }

    // ─────────────────────────────────────────────────────────────
    //  Staging
    // ─────────────────────────────────────────────────────────────

    /// Stages one of the mover's pieces.
    ///
    /// # Errors
    ///
    /// - [`StageError::NotOwned`] if the mover has no piece there
    /// - [`StageError::AlreadySelected`] if it is already staged
    /// - [`StageError::SelectionFull`] if two pieces are staged
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn add_selection(&mut self, position: Position) -> Result<(), StageError> {
        if !self.is_occupied_by_current_player(position) {
            return Err(StageError::NotOwned(position));
        }
        self.selected.try_push(position).map_err(|rejection| match rejection {
            PushRejection::Duplicate => StageError::AlreadySelected(position),
            PushRejection::Full => StageError::SelectionFull,
        })?;
        debug!(staged = self.selected.len(), "Piece selected");
        Ok(())
    }

    /// Stages a target cell.
    ///
    /// # Errors
    ///
    /// - [`StageError::NotFree`] if the cell is occupied or blocked
    /// - [`StageError::AlreadyTargeted`] if it is already staged
    /// - [`StageError::GhostsFull`] if two targets are staged
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn add_ghost(&mut self, position: Position) -> Result<(), StageError> {
        if !self.is_free(position) {
            return Err(StageError::NotFree(position));
        }
        self.ghosts.try_push(position).map_err(|rejection| match rejection {
            PushRejection::Duplicate => StageError::AlreadyTargeted(position),
            PushRejection::Full => StageError::GhostsFull,
        })?;
        debug!(staged = self.ghosts.len(), "Target staged");
        Ok(())
    }

    /// Drops all staged pieces and targets.
    #[instrument(skip(self))]
    pub fn clear_selection(&mut self) {
        self.selected.clear();
        self.ghosts.clear();
    }

    // ─────────────────────────────────────────────────────────────
    //  Commit
    // ─────────────────────────────────────────────────────────────

    /// Validates and commits the staged move, then passes the turn.
    ///
    /// Each staged piece steps in the shared direction. No board or collision
    /// check is made at this point, so a piece may leave the board. After the
    /// switch, the win condition is evaluated for the side now to move.
    ///
    /// Returns `true` if that side has won.
    ///
    /// # Errors
    ///
    /// [`MoveError::IncompleteMove`] or [`MoveError::InvalidMove`]; state and
    /// staging are untouched on error.
    #[instrument(skip(self), fields(player = %self.current_player, turn = self.turn_count))]
    pub fn end_turn(&mut self) -> Result<bool, MoveError> {
        let direction = shared_direction(&self.selected, &self.ghosts)?;

        let mover = self.current_player;
        let pieces = match mover {
            Player::Blue => &mut self.blue,
            Player::Red => &mut self.red,
        };
        // Resolve indices before writing so one step cannot shadow the other.
        let indices: Vec<usize> = self
            .selected
            .iter()
            .filter_map(|from| pieces.iter().position(|p| *p == from))
            .collect();
        for index in indices {
            pieces[index] = pieces[index].translate(direction);
        }
        info!(%mover, %direction, "Move committed");

        self.clear_selection();
        self.current_player = mover.other();
        self.turn_count += 1;

        let won = self.is_current_player_winner();
        if won {
            info!(winner = %self.current_player, turns = self.turn_count, "Win condition met");
        }
        Ok(won)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

fn starting_row(player: Player) -> Vec<Position> {
    (0..BOARD_SIZE)
        .map(|col| Position::new(home_row(player), col))
        .collect()
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for cell in all_cells() {
            let symbol = match self.owner(cell) {
                Owner::Blue => 'B',
                Owner::Red => 'R',
                Owner::Forbidden => '#',
                Owner::None => '.',
            };
            write!(f, "{symbol}")?;
            if cell.col() == BOARD_SIZE - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(state: &mut GameState, selected: &[(i32, i32)], ghosts: &[(i32, i32)]) {
        for &cell in selected {
            state.add_selection(cell.into()).unwrap();
        }
        for &cell in ghosts {
            state.add_ghost(cell.into()).unwrap();
        }
    }

    #[test]
    fn test_initial_layout() {
        let state = GameState::new();
        for c in 0..5 {
            assert_eq!(state.owner(Position::new(0, c)), Owner::Blue);
            assert_eq!(state.owner(Position::new(4, c)), Owner::Red);
        }
        assert_eq!(state.current_player(), Player::Blue);
        assert_eq!(state.turn_count(), 0);
        assert!(state.selected().is_empty());
        assert!(state.ghosts().is_empty());
    }

    #[test]
    fn test_select_opponent_piece_not_owned() {
        let mut state = GameState::new();
        let red = Position::new(4, 0);
        assert_eq!(state.add_selection(red), Err(StageError::NotOwned(red)));
        assert!(state.selected().is_empty());
    }

    #[test]
    fn test_select_duplicate_and_full() {
        let mut state = GameState::new();
        state.add_selection(Position::new(0, 0)).unwrap();
        assert_eq!(
            state.add_selection(Position::new(0, 0)),
            Err(StageError::AlreadySelected(Position::new(0, 0)))
        );
        state.add_selection(Position::new(0, 1)).unwrap();
        assert_eq!(state.add_selection(Position::new(0, 2)), Err(StageError::SelectionFull));
        assert_eq!(state.selected(), vec![Position::new(0, 0), Position::new(0, 1)]);
    }

    #[test]
    fn test_ghost_rejects_occupied_and_blocked() {
        let mut state = GameState::new();
        for cell in [(0, 0), (4, 4), (1, 1), (3, 3)] {
            let p = Position::from(cell);
            assert_eq!(state.add_ghost(p), Err(StageError::NotFree(p)));
        }
        assert!(state.ghosts().is_empty());
    }

    #[test]
    fn test_ghost_duplicate_and_full() {
        let mut state = GameState::new();
        state.add_ghost(Position::new(2, 0)).unwrap();
        assert_eq!(
            state.add_ghost(Position::new(2, 0)),
            Err(StageError::AlreadyTargeted(Position::new(2, 0)))
        );
        state.add_ghost(Position::new(2, 1)).unwrap();
        assert_eq!(state.add_ghost(Position::new(2, 2)), Err(StageError::GhostsFull));
    }

    #[test]
    fn test_end_turn_commits_south_step() {
        let mut state = GameState::new();
        stage(&mut state, &[(0, 0), (0, 2)], &[(1, 0), (1, 2)]);

        assert_eq!(state.end_turn(), Ok(false));
        assert_eq!(state.owner(Position::new(1, 0)), Owner::Blue);
        assert_eq!(state.owner(Position::new(1, 2)), Owner::Blue);
        assert_eq!(state.owner(Position::new(0, 0)), Owner::None);
        assert_eq!(state.current_player(), Player::Red);
        assert_eq!(state.turn_count(), 1);
        assert!(state.selected().is_empty());
        assert!(state.ghosts().is_empty());
    }

    #[test]
    fn test_invalid_move_keeps_staging() {
        let mut state = GameState::new();
        stage(&mut state, &[(0, 0), (0, 1)], &[(1, 0), (1, 2)]);
        let before = state.clone();

        assert_eq!(state.end_turn(), Err(MoveError::InvalidMove));
        assert_eq!(state, before);
    }

    #[test]
    fn test_commit_can_walk_off_the_board() {
        let mut state = GameState::new();
        state.current_player = Player::Red;
        stage(&mut state, &[(4, 0), (4, 2)], &[(5, 0), (5, 2)]);

        assert_eq!(state.end_turn(), Ok(false));
        assert!(state.positions_of(Player::Red).contains(&Position::new(5, 0)));
        assert!(state.positions_of(Player::Red).contains(&Position::new(5, 2)));
    }

    #[test]
    fn test_win_checked_for_side_to_move() {
        let mut state = GameState::new();
        state.red = (0..5).map(|c| Position::new(0, c)).collect();
        state.blue = vec![
            Position::new(2, 0),
            Position::new(2, 2),
            Position::new(2, 4),
            Position::new(3, 0),
            Position::new(3, 4),
        ];
        stage(&mut state, &[(3, 0), (3, 4)], &[(4, 0), (4, 4)]);

        // Blue moves; Red (already on row 0) is evaluated and wins.
        assert_eq!(state.end_turn(), Ok(true));
        assert_eq!(state.winner(), Some(Player::Red));
    }

    #[test]
    fn test_reset_restores_start() {
        let mut state = GameState::new();
        stage(&mut state, &[(0, 0), (0, 2)], &[(1, 0), (1, 2)]);
        state.end_turn().unwrap();
        state.add_selection(Position::new(4, 0)).unwrap();

        state.reset();
        assert_eq!(state, GameState::new());
    }

    #[test]
    fn test_display_grid() {
        let text = GameState::new().to_string();
        assert_eq!(text, "BBBBB\n.#.#.\n.....\n.#.#.\nRRRRR\n");
    }
}
