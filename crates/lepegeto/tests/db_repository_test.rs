//! Tests for the results store.

use lepegeto::{NewGameResult, PlayerNames, ResultRepository};
use lepegeto_rules::Player;
use tempfile::NamedTempFile;

/// Returns the temp file (keep it in scope) and a migrated repository.
fn setup_test_db() -> (NamedTempFile, ResultRepository) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let repo = ResultRepository::open(db_path).expect("Failed to open repository");
    (db_file, repo)
}

fn names(blue: &str, red: &str) -> PlayerNames {
    PlayerNames::new(blue, red).expect("Names rejected")
}

#[test]
fn test_record_result_returns_stored_row() {
    let (_db, repo) = setup_test_db();
    let stored = repo
        .record_result(NewGameResult::new(&names("Ann", "Bob"), Player::Red, 12))
        .expect("Insert failed");

    assert!(*stored.id() > 0);
    assert_eq!(stored.winner(), "Bob");
    assert_eq!(stored.player1(), "Ann");
    assert_eq!(stored.player2(), "Bob");
    assert_eq!(*stored.steps(), 12);
}

#[test]
fn test_list_results_empty() {
    let (_db, repo) = setup_test_db();
    assert!(repo.list_results().expect("List failed").is_empty());
    assert!(repo.best_result().expect("Query failed").is_none());
}

#[test]
fn test_list_results_fastest_first() {
    let (_db, repo) = setup_test_db();
    let pair = names("Ann", "Bob");
    for (winner, turns) in [(Player::Blue, 30), (Player::Red, 9), (Player::Blue, 9), (Player::Red, 17)] {
        repo.record_result(NewGameResult::new(&pair, winner, turns))
            .expect("Insert failed");
    }

    let results = repo.list_results().expect("List failed");
    let steps: Vec<i32> = results.iter().map(|r| *r.steps()).collect();
    assert_eq!(steps, vec![9, 9, 17, 30]);
    // Ties keep insertion order.
    assert_eq!(results[0].winner(), "Bob");
    assert_eq!(results[1].winner(), "Ann");

    let best = repo.best_result().expect("Query failed").expect("No best");
    assert_eq!(best, results[0]);
}

#[test]
fn test_results_for_player_matches_either_side() {
    let (_db, repo) = setup_test_db();
    repo.record_result(NewGameResult::new(&names("Ann", "Bob"), Player::Blue, 10))
        .expect("Insert failed");
    repo.record_result(NewGameResult::new(&names("Cy", "Ann"), Player::Blue, 8))
        .expect("Insert failed");
    repo.record_result(NewGameResult::new(&names("Bob", "Cy"), Player::Red, 5))
        .expect("Insert failed");

    let ann = repo.results_for_player("Ann").expect("Query failed");
    assert_eq!(ann.len(), 2);
    assert!(ann.iter().all(|r| r.involves("Ann")));
    assert!(repo.results_for_player("Dee").expect("Query failed").is_empty());
}

#[test]
fn test_player_record_tallies() {
    let (_db, repo) = setup_test_db();
    repo.record_result(NewGameResult::new(&names("Ann", "Bob"), Player::Blue, 14))
        .expect("Insert failed");
    repo.record_result(NewGameResult::new(&names("Ann", "Bob"), Player::Blue, 11))
        .expect("Insert failed");
    repo.record_result(NewGameResult::new(&names("Bob", "Ann"), Player::Blue, 6))
        .expect("Insert failed");

    let record = repo.player_record("Ann").expect("Query failed");
    assert_eq!(*record.games(), 3);
    assert_eq!(*record.wins(), 2);
    assert_eq!(record.losses(), 1);
    assert_eq!(*record.fastest_win(), Some(11));

    let nobody = repo.player_record("Dee").expect("Query failed");
    assert_eq!(*nobody.games(), 0);
    assert_eq!(nobody.win_rate(), 0.0);
}

#[test]
fn test_migrations_are_idempotent() {
    let (db, repo) = setup_test_db();
    repo.record_result(NewGameResult::new(&names("Ann", "Bob"), Player::Red, 3))
        .expect("Insert failed");

    let reopened = ResultRepository::open(db.path().to_str().expect("Invalid path"))
        .expect("Reopen failed");
    assert_eq!(reopened.list_results().expect("List failed").len(), 1);
}

#[test]
fn test_unreachable_database_is_connection_error() {
    let repo = ResultRepository::new("/nonexistent-dir/for/results.db");
    let err = repo.list_results().expect_err("Should not connect");
    assert_eq!(err.kind, lepegeto::DbErrorKind::Connection);
}
