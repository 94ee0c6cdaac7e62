//! Results store backed by a sqlite file.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::{DbError, DbErrorKind, GameResult, NewGameResult, PlayerRecord, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Handle to the results database.
///
/// Each call opens its own connection, so the handle is cheap to clone and
/// holds no process-wide state.
#[derive(Debug, Clone)]
pub struct ResultRepository {
    db_path: String,
}

impl ResultRepository {
    /// Creates a repository for the database file at `db_path`.
    ///
    /// The file is created on first connection. Call
    /// [`run_migrations`](Self::run_migrations) before use.
    #[instrument(skip(db_path), fields(db_path = %db_path.as_ref()))]
    pub fn new(db_path: impl AsRef<str>) -> Self {
        info!("Creating ResultRepository");
        Self {
            db_path: db_path.as_ref().to_string(),
        }
    }

    /// Opens the database and brings the schema up to date.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the file cannot be opened or a migration fails.
    #[instrument(skip(db_path), fields(db_path = %db_path.as_ref()))]
    pub fn open(db_path: impl AsRef<str>) -> Result<Self, DbError> {
        let repository = Self::new(db_path);
        repository.run_migrations()?;
        Ok(repository)
    }

    /// Path of the backing database.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path).map_err(|e| {
            DbError::new(
                DbErrorKind::Connection,
                format!("Failed to connect to '{}': {}", self.db_path, e),
            )
        })
    }

    /// Applies any pending schema migrations. Safe to call repeatedly.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the connection or a migration fails.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(DbErrorKind::Migration, e.to_string()))?;
        info!(applied = applied.len(), "Migrations up to date");
        Ok(())
    }

    /// Stores the result of a finished game.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the insert fails.
    #[instrument(skip(self, result), fields(winner = %result.winner(), steps = result.steps()))]
    pub fn record_result(&self, result: NewGameResult) -> Result<GameResult, DbError> {
        debug!("Recording game result");
        let mut conn = self.connection()?;

        let stored = diesel::insert_into(schema::game_results::table)
            .values(&result)
            .returning(GameResult::as_returning())
            .get_result(&mut conn)?;

        info!(result_id = stored.id(), "Game result recorded");
        Ok(stored)
    }

    /// All results, fastest win first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the query fails.
    #[instrument(skip(self))]
    pub fn list_results(&self) -> Result<Vec<GameResult>, DbError> {
        let mut conn = self.connection()?;

        let results = schema::game_results::table
            .order((schema::game_results::steps.asc(), schema::game_results::id.asc()))
            .select(GameResult::as_select())
            .load(&mut conn)?;

        info!(count = results.len(), "Results loaded");
        Ok(results)
    }

    /// The fastest win on record, if any.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the query fails.
    #[instrument(skip(self))]
    pub fn best_result(&self) -> Result<Option<GameResult>, DbError> {
        let mut conn = self.connection()?;

        let best = schema::game_results::table
            .order((schema::game_results::steps.asc(), schema::game_results::id.asc()))
            .select(GameResult::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(best)
    }

    /// Results of every game `name` played, fastest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the query fails.
    #[instrument(skip(self))]
    pub fn results_for_player(&self, name: &str) -> Result<Vec<GameResult>, DbError> {
        use schema::game_results::dsl;

        let mut conn = self.connection()?;
        let results = dsl::game_results
            .filter(dsl::player1.eq(name).or(dsl::player2.eq(name)))
            .order((dsl::steps.asc(), dsl::id.asc()))
            .select(GameResult::as_select())
            .load(&mut conn)?;

        debug!(count = results.len(), "Player results loaded");
        Ok(results)
    }

    /// Win/loss tally for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the query fails.
    #[instrument(skip(self))]
    pub fn player_record(&self, name: &str) -> Result<PlayerRecord, DbError> {
        let results = self.results_for_player(name)?;

        let wins: Vec<&GameResult> = results.iter().filter(|r| r.winner() == name).collect();
        let fastest_win = wins.iter().map(|r| *r.steps()).min();
        let record = PlayerRecord::new(results.len() as i32, wins.len() as i32, fastest_win);

        info!(
            games = record.games(),
            wins = record.wins(),
            win_rate = %format!("{:.1}%", record.win_rate()),
            "Player record computed"
        );
        Ok(record)
    }
}
