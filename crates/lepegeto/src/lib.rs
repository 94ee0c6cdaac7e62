//! Lepegeto: a two-player stepping game.
//!
//! The rules live in [`lepegeto_rules`]. This crate adds named matches,
//! a sqlite results store, save files, configuration, and a console front
//! end.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod console;
mod db;
mod save;
mod session;

pub use config::{AppConfig, ConfigError};
pub use console::{Command, Console, ParseError, guidance};
pub use db::{DbError, DbErrorKind, GameResult, NewGameResult, PlayerRecord, ResultRepository};
pub use save::{SaveError, SavedGame, load_game, save_game};
pub use session::{Finish, GameSession, PlayerNames, SessionError, TurnOutcome};
