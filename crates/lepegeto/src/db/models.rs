//! Row types for the results table.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use diesel::prelude::*;
use lepegeto_rules::Player;
use tracing::instrument;

use crate::db::schema;
use crate::session::PlayerNames;

/// One finished game, as stored.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::game_results)]
pub struct GameResult {
    id: i32,
    /// Name of the winning player.
    winner: String,
    /// Name of the player on the Blue side.
    player1: String,
    /// Name of the player on the Red side.
    player2: String,
    /// Turns played when the game ended.
    steps: i32,
    created: NaiveDateTime,
}

impl GameResult {
    /// True if `name` played either side of this game.
    pub fn involves(&self, name: &str) -> bool {
        self.player1 == name || self.player2 == name
    }
}

/// Insertable result row.
#[derive(Debug, Clone, Insertable, Getters)]
#[diesel(table_name = schema::game_results)]
pub struct NewGameResult {
    winner: String,
    player1: String,
    player2: String,
    steps: i32,
    created: NaiveDateTime,
}

impl NewGameResult {
    /// Builds the row for a game won by `winner` after `turns` moves,
    /// stamped with the current UTC time.
    #[instrument(skip(names))]
    pub fn new(names: &PlayerNames, winner: Player, turns: u32) -> Self {
        Self {
            winner: names.name_of(winner).to_string(),
            player1: names.blue().clone(),
            player2: names.red().clone(),
            steps: i32::try_from(turns).unwrap_or(i32::MAX),
            created: chrono::Utc::now().naive_utc(),
        }
    }
}

/// Win/loss tally for one player name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, derive_new::new)]
pub struct PlayerRecord {
    games: i32,
    wins: i32,
    /// Fewest turns in any game the player won.
    fastest_win: Option<i32>,
}

impl PlayerRecord {
    /// Games the player lost.
    pub fn losses(&self) -> i32 {
        self.games - self.wins
    }

    /// Win rate as a percentage (0.0–100.0).
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            (self.wins as f64 / self.games as f64) * 100.0
        }
    }
}
