//! Saving and loading games in progress.

use std::path::Path;

use lepegeto_rules::{GameSnapshot, GameState, InvariantSet, RuleInvariants};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::session::PlayerNames;

/// A game in progress as written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    /// Who is playing.
    pub names: PlayerNames,
    /// Board, side to move, and turn count. Staging is not saved.
    pub snapshot: GameSnapshot,
}

/// Failure to write or read a save file.
#[derive(Debug, derive_more::Display)]
pub enum SaveError {
    /// The file could not be read or written.
    #[display("Save file I/O failed: {}", _0)]
    Io(std::io::Error),

    /// The file is not a saved game.
    #[display("Save file is malformed: {}", _0)]
    Parse(serde_json::Error),

    /// The file parsed but describes an impossible game.
    #[display("Save file describes an invalid game: {}", _0)]
    Corrupt(String),
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Corrupt(_) => None,
        }
    }
}

impl From<std::io::Error> for SaveError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Writes `game` to `path` as pretty-printed JSON, replacing any existing file.
///
/// # Errors
///
/// Returns [`SaveError::Io`] if the file cannot be written.
#[instrument(skip(path, game), fields(path = %path.as_ref().display()))]
pub fn save_game(path: impl AsRef<Path>, game: &SavedGame) -> Result<(), SaveError> {
    let json = serde_json::to_string_pretty(game)?;
    std::fs::write(path.as_ref(), json)?;
    info!(turn = game.snapshot.turn_count, "Game saved");
    Ok(())
}

/// Reads a game written by [`save_game`].
///
/// # Errors
///
/// Returns [`SaveError::Io`] if the file cannot be read,
/// [`SaveError::Parse`] if it is not a saved game, and
/// [`SaveError::Corrupt`] if names are blank or the board breaks a rule
/// invariant.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_game(path: impl AsRef<Path>) -> Result<SavedGame, SaveError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let game: SavedGame = serde_json::from_str(&content)?;
    debug!(turn = game.snapshot.turn_count, "Save file parsed");

    if !game.names.is_complete() {
        warn!("Save file has a blank player name");
        return Err(SaveError::Corrupt("player names must not be blank".to_string()));
    }

    let state = GameState::from_snapshot(game.snapshot.clone());
    if let Err(violations) = RuleInvariants::check_all(&state) {
        let reasons: Vec<String> = violations.iter().map(ToString::to_string).collect();
        return Err(SaveError::Corrupt(reasons.join("; ")));
    }

    info!("Game loaded");
    Ok(game)
}
