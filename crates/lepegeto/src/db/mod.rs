//! High-score store for finished games.

mod error;
mod models;
mod repository;
mod schema;

pub use error::{DbError, DbErrorKind};
pub use models::{GameResult, NewGameResult, PlayerRecord};
pub use repository::ResultRepository;
