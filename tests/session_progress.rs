//! Integration tests for session orchestration and persisted progress,
//! including the on-disk JSON save file.

use mushman::{
    parse_corpus, Direction, FailureReason, GameSession, JsonFileStore, LevelDefinition,
    MemoryStore, Outcome,
};
use tempfile::tempdir;

fn corpus() -> Vec<LevelDefinition> {
    parse_corpus("Alpha\none\nws  e\nBeta\ntwo\nws e\n")
}

#[test]
fn test_best_score_only_improves_on_strictly_fewer_moves() {
    let mut session = GameSession::new(corpus(), Box::new(MemoryStore::new())).unwrap();

    // A wasteful first clear: one step of backtracking, five moves total.
    for direction in [
        Direction::Right,
        Direction::Left,
        Direction::Right,
        Direction::Right,
    ] {
        session.attempt_move(direction);
    }
    assert_eq!(
        session.attempt_move(Direction::Right),
        Outcome::LevelComplete {
            new_best: true,
            previous_best: None
        }
    );

    // A clean three-move clear beats it.
    session.reset_current_level();
    session.attempt_move(Direction::Right);
    session.attempt_move(Direction::Right);
    assert_eq!(
        session.attempt_move(Direction::Right),
        Outcome::LevelComplete {
            new_best: true,
            previous_best: Some(5)
        }
    );

    // Matching the best is not beating it.
    session.reset_current_level();
    session.attempt_move(Direction::Right);
    session.attempt_move(Direction::Right);
    assert_eq!(
        session.attempt_move(Direction::Right),
        Outcome::LevelComplete {
            new_best: false,
            previous_best: Some(3)
        }
    );

    let snapshot = session.snapshot();
    assert_eq!(snapshot.best_moves, Some(3));
    assert!(snapshot.completed_before);
}

#[test]
fn test_failed_attempts_record_nothing() {
    let levels = parse_corpus("Pit\nx\nws he\n");
    let mut session = GameSession::new(levels, Box::new(MemoryStore::new())).unwrap();

    assert_eq!(session.attempt_move(Direction::Right), Outcome::Moved);
    assert_eq!(
        session.attempt_move(Direction::Right),
        Outcome::LevelFailed(FailureReason::FellIntoHole)
    );
    assert_eq!(session.snapshot().best_moves, None);
    assert!(!session.snapshot().completed_before);

    // Moves after the loss are swallowed until a reset.
    assert_eq!(session.attempt_move(Direction::Right), Outcome::None);
    session.reset_current_level();
    assert_eq!(session.attempt_move(Direction::Right), Outcome::Moved);
}

#[test]
fn test_save_file_round_trips_between_sessions() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("save.json");

    {
        let store = JsonFileStore::open(&path);
        let mut session = GameSession::new(corpus(), Box::new(store)).unwrap();
        session.attempt_move(Direction::Right);
        session.attempt_move(Direction::Right);
        assert!(matches!(
            session.attempt_move(Direction::Right),
            Outcome::LevelComplete { .. }
        ));
        assert!(session.advance_level());
    }
    assert!(path.exists());

    let store = JsonFileStore::open(&path);
    let mut session = GameSession::new(corpus(), Box::new(store)).unwrap();
    assert_eq!(session.current_level(), 1, "session should resume at Beta");

    session.load_level(0);
    let snapshot = session.snapshot();
    assert_eq!(snapshot.best_moves, Some(3));
    assert!(snapshot.completed_before);
}

#[test]
fn test_corrupt_save_file_degrades_to_fresh_progress() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("save.json");
    std::fs::write(&path, "{ this is not json").unwrap();

    let store = JsonFileStore::open(&path);
    let mut session = GameSession::new(corpus(), Box::new(store)).unwrap();
    assert_eq!(session.current_level(), 0);
    assert_eq!(session.snapshot().best_moves, None);

    session.attempt_move(Direction::Right);
    session.attempt_move(Direction::Right);
    session.attempt_move(Direction::Right);
    drop(session);

    // The rewritten file is valid again for the next session.
    let session = GameSession::new(corpus(), Box::new(JsonFileStore::open(&path))).unwrap();
    assert_eq!(session.snapshot().best_moves, Some(3));
}
