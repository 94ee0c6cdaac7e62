//! A match between two named players.

use derive_getters::Getters;
use lepegeto_rules::{GameState, MoveError, Player, Position, StageError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::db::{DbError, GameResult, NewGameResult, ResultRepository};
use crate::save::SavedGame;

/// Display names of the two players.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PlayerNames {
    /// Name of the Blue player.
    blue: String,
    /// Name of the Red player.
    red: String,
}

impl PlayerNames {
    /// Creates the pair. Names are trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::MissingName`] if either name is blank.
    #[instrument(skip(blue, red))]
    pub fn new(blue: impl Into<String>, red: impl Into<String>) -> Result<Self, SessionError> {
        let blue = blue.into().trim().to_string();
        let red = red.into().trim().to_string();
        if blue.is_empty() {
            return Err(SessionError::MissingName(Player::Blue));
        }
        if red.is_empty() {
            return Err(SessionError::MissingName(Player::Red));
        }
        Ok(Self { blue, red })
    }

    /// Name of the player on `side`.
    pub fn name_of(&self, side: Player) -> &str {
        match side {
            Player::Blue => &self.blue,
            Player::Red => &self.red,
        }
    }

    /// Checks that both names are present after deserialization.
    pub(crate) fn is_complete(&self) -> bool {
        !self.blue.trim().is_empty() && !self.red.trim().is_empty()
    }
}

/// How a committed turn left the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Play continues with `next` to move.
    Continue {
        /// Side to move.
        next: Player,
    },
    /// The match is over.
    Won(Player),
}

/// Errors from match-level commands.
#[derive(Debug, Clone, derive_more::Display)]
pub enum SessionError {
    /// A player name was left blank.
    #[display("{} player needs a name", _0)]
    MissingName(Player),

    /// The match has already been decided.
    #[display("The game is over; reset to play again")]
    Finished,

    /// A staging command was rejected.
    #[display("{}", _0)]
    Stage(StageError),

    /// The staged move was rejected.
    #[display("{}", _0)]
    Move(MoveError),

    /// Recording the result failed.
    #[display("{}", _0)]
    Results(DbError),
}

impl std::error::Error for SessionError {}

impl From<StageError> for SessionError {
    fn from(err: StageError) -> Self {
        Self::Stage(err)
    }
}

impl From<MoveError> for SessionError {
    fn from(err: MoveError) -> Self {
        Self::Move(err)
    }
}

impl From<DbError> for SessionError {
    fn from(err: DbError) -> Self {
        Self::Results(err)
    }
}

/// How a decided match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Finish {
    /// Winning side.
    pub winner: Player,
    /// Turns committed before the end.
    pub turns: u32,
    /// True if the loser conceded.
    pub conceded: bool,
}

/// One match: the rule state, the players' names, and where results go.
///
/// Each session owns its state outright; nothing is shared between sessions.
#[derive(Debug, Clone)]
pub struct GameSession {
    state: GameState,
    names: PlayerNames,
    results: Option<ResultRepository>,
    finish: Option<Finish>,
}

impl GameSession {
    /// Starts a fresh match.
    #[instrument(skip(names, results), fields(blue = %names.blue(), red = %names.red()))]
    pub fn new(names: PlayerNames, results: Option<ResultRepository>) -> Self {
        info!("Starting new game session");
        Self {
            state: GameState::new(),
            names,
            results,
            finish: None,
        }
    }

    /// Read-only view of the rule state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The players' names.
    pub fn names(&self) -> &PlayerNames {
        &self.names
    }

    /// The results store, if one is attached.
    pub fn results(&self) -> Option<&ResultRepository> {
        self.results.as_ref()
    }

    /// How the match ended, once decided.
    pub fn finish(&self) -> Option<Finish> {
        self.finish
    }

    /// Name of the player to move.
    pub fn current_name(&self) -> &str {
        self.names.name_of(self.state.current_player())
    }

    fn ensure_running(&self) -> Result<(), SessionError> {
        match self.finish {
            Some(_) => Err(SessionError::Finished),
            None => Ok(()),
        }
    }

    /// Stages one of the mover's pieces.
    ///
    /// # Errors
    ///
    /// [`SessionError::Finished`] after the match is decided, otherwise the
    /// rule engine's [`StageError`].
    #[instrument(skip(self))]
    pub fn select(&mut self, position: Position) -> Result<(), SessionError> {
        self.ensure_running()?;
        self.state.add_selection(position)?;
        Ok(())
    }

    /// Stages a target cell.
    ///
    /// # Errors
    ///
    /// [`SessionError::Finished`] after the match is decided, otherwise the
    /// rule engine's [`StageError`].
    #[instrument(skip(self))]
    pub fn target(&mut self, position: Position) -> Result<(), SessionError> {
        self.ensure_running()?;
        self.state.add_ghost(position)?;
        Ok(())
    }

    /// Drops everything staged this turn.
    #[instrument(skip(self))]
    pub fn clear_selection(&mut self) {
        self.state.clear_selection();
    }

    /// Commits the staged move.
    ///
    /// When the rule engine reports a win, the side it evaluated (the side
    /// now to move) is recorded as the winner.
    ///
    /// # Errors
    ///
    /// [`SessionError::Finished`], [`SessionError::Move`] when the move is
    /// rejected, or [`SessionError::Results`] if the win could not be stored.
    /// A storage failure still leaves the match decided.
    #[instrument(skip(self), fields(player = %self.state.current_player()))]
    pub fn end_turn(&mut self) -> Result<TurnOutcome, SessionError> {
        self.ensure_running()?;
        if !self.state.end_turn()? {
            let next = self.state.current_player();
            debug!(%next, "Turn passed");
            return Ok(TurnOutcome::Continue { next });
        }

        let winner = self.state.current_player();
        self.conclude(winner, false)?;
        Ok(TurnOutcome::Won(winner))
    }

    /// The player to move gives up; the other side wins.
    ///
    /// # Errors
    ///
    /// [`SessionError::Finished`] if already decided, or
    /// [`SessionError::Results`] if the result could not be stored.
    #[instrument(skip(self), fields(player = %self.state.current_player()))]
    pub fn concede(&mut self) -> Result<Player, SessionError> {
        self.ensure_running()?;
        let winner = self.state.current_player().other();
        self.state.clear_selection();
        self.conclude(winner, true)?;
        Ok(winner)
    }

    fn conclude(&mut self, winner: Player, conceded: bool) -> Result<Option<GameResult>, SessionError> {
        let turns = self.state.turn_count();
        self.finish = Some(Finish {
            winner,
            turns,
            conceded,
        });
        info!(%winner, name = %self.names.name_of(winner), turns, conceded, "Game decided");

        let Some(results) = &self.results else {
            debug!("No results store attached");
            return Ok(None);
        };
        let row = NewGameResult::new(&self.names, winner, turns);
        match results.record_result(row) {
            Ok(stored) => Ok(Some(stored)),
            Err(e) => {
                warn!(error = %e, "Failed to record game result");
                Err(e.into())
            }
        }
    }

    /// Starts over with the same players.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.state.reset();
        self.finish = None;
    }

    /// Replaces the match with a saved one.
    #[instrument(skip(self, saved), fields(turn = saved.snapshot.turn_count))]
    pub fn restore(&mut self, saved: SavedGame) {
        self.state = GameState::from_snapshot(saved.snapshot);
        self.names = saved.names;
        self.finish = None;
        info!("Session restored from save");
    }

    /// Captures the match for saving.
    pub fn saved(&self) -> SavedGame {
        SavedGame {
            names: self.names.clone(),
            snapshot: self.state.snapshot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        GameSession::new(PlayerNames::new("Ann", "Bob").unwrap(), None)
    }

    #[test]
    fn test_blank_names_rejected() {
        assert!(matches!(
            PlayerNames::new("  ", "Bob"),
            Err(SessionError::MissingName(Player::Blue))
        ));
        assert!(matches!(
            PlayerNames::new("Ann", ""),
            Err(SessionError::MissingName(Player::Red))
        ));
    }

    #[test]
    fn test_names_are_trimmed() {
        let names = PlayerNames::new(" Ann ", "Bob").unwrap();
        assert_eq!(names.name_of(Player::Blue), "Ann");
        assert_eq!(names.name_of(Player::Red), "Bob");
    }

    #[test]
    fn test_concede_hands_win_to_opponent() {
        let mut session = session();
        assert_eq!(session.concede().unwrap(), Player::Red);
        let finish = session.finish().unwrap();
        assert!(finish.conceded);
        assert_eq!(finish.turns, 0);
        assert!(matches!(session.select(Position::new(0, 0)), Err(SessionError::Finished)));
    }

    #[test]
    fn test_reset_reopens_finished_game() {
        let mut session = session();
        session.concede().unwrap();
        session.reset();
        assert!(session.finish().is_none());
        assert!(session.select(Position::new(0, 0)).is_ok());
    }

    #[test]
    fn test_current_name_follows_turn() {
        let mut session = session();
        assert_eq!(session.current_name(), "Ann");
        for (sel, ghost) in [((0, 0), (1, 0)), ((0, 2), (1, 2))] {
            session.select(sel.into()).unwrap();
            session.target(ghost.into()).unwrap();
        }
        assert_eq!(
            session.end_turn().unwrap(),
            TurnOutcome::Continue { next: Player::Red }
        );
        assert_eq!(session.current_name(), "Bob");
    }
}
