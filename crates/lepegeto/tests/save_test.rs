//! Tests for save files.

use lepegeto::{GameSession, PlayerNames, SaveError, SavedGame, load_game, save_game};
use lepegeto_rules::{GameState, Player, Position};

fn played_session() -> GameSession {
    let mut session = GameSession::new(PlayerNames::new("Ann", "Bob").unwrap(), None);
    session.select(Position::new(0, 0)).unwrap();
    session.select(Position::new(0, 2)).unwrap();
    session.target(Position::new(1, 0)).unwrap();
    session.target(Position::new(1, 2)).unwrap();
    session.end_turn().unwrap();
    session
}

#[test]
fn test_save_then_load_restores_board_and_names() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.json");
    let session = played_session();

    save_game(&path, &session.saved()).expect("Save failed");
    let loaded = load_game(&path).expect("Load failed");

    assert_eq!(loaded, session.saved());
    let mut resumed = GameSession::new(PlayerNames::new("X", "Y").unwrap(), None);
    resumed.restore(loaded);
    assert_eq!(resumed.names().blue(), "Ann");
    assert_eq!(resumed.state().current_player(), Player::Red);
    assert_eq!(resumed.state().turn_count(), 1);
    assert_eq!(resumed.state().to_string(), session.state().to_string());
}

#[test]
fn test_staging_is_not_saved() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("staged.json");
    let mut session = played_session();
    session.select(Position::new(4, 0)).unwrap();

    save_game(&path, &session.saved()).expect("Save failed");
    let mut resumed = played_session();
    resumed.restore(load_game(&path).expect("Load failed"));
    assert!(resumed.state().selected().is_empty());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_game(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, SaveError::Io(_)));
}

#[test]
fn test_garbage_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("junk.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(load_game(&path), Err(SaveError::Parse(_))));
}

#[test]
fn test_overlapping_pieces_are_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("overlap.json");
    let mut snapshot = GameState::new().snapshot();
    snapshot.red[0] = snapshot.blue[0];
    let game = SavedGame {
        names: PlayerNames::new("Ann", "Bob").unwrap(),
        snapshot,
    };
    save_game(&path, &game).unwrap();

    assert!(matches!(load_game(&path), Err(SaveError::Corrupt(_))));
}

#[test]
fn test_blank_name_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blank.json");
    let json = serde_json::json!({
        "names": { "blue": "", "red": "Bob" },
        "snapshot": GameState::new().snapshot(),
    });
    std::fs::write(&path, json.to_string()).unwrap();

    assert!(matches!(load_game(&path), Err(SaveError::Corrupt(_))));
}
