use std::fs;
use std::time::Duration;

use tempfile::tempdir;

use wordle::dictionary::Dictionary;
use wordle::lock::ManualClock;
use wordle::store::{self, FileStore, KeyValueStore, MemoryStore, SavedGame, SAVE_KEY};
use wordle::{GameSession, GameStatus, Letter, SessionConfig, Word};

fn word(s: &str) -> Word {
    Word::new(s).unwrap()
}

fn session_with<S: KeyValueStore + 'static>(secret: &str, store: S) -> (GameSession, ManualClock) {
    let clock = ManualClock::new();
    let config = SessionConfig::new(Dictionary::embedded(), word(secret));
    let session = GameSession::new(config)
        .with_clock(clock.clone())
        .with_store(store);
    (session, clock)
}

fn play(session: &mut GameSession, clock: &ManualClock, attempt: &str) {
    for c in attempt.chars() {
        session.append_letter(Letter::new(c).unwrap());
    }
    session.submit().unwrap();
    clock.advance(Duration::from_millis(1800));
}

#[test]
fn progress_survives_a_restart() {
    let dir = tempdir().unwrap();

    let (mut first, clock) = session_with("patio", FileStore::with_dir(dir.path()));
    play(&mut first, &clock, "darts");
    play(&mut first, &clock, "piano");
    drop(first);

    let raw = fs::read_to_string(dir.path().join(format!("{SAVE_KEY}.json"))).unwrap();
    assert_eq!(raw, r#"{"secret":"patio","history":["darts","piano"]}"#);

    let (mut second, _) = session_with("patio", FileStore::with_dir(dir.path()));
    assert!(second.restore());
    assert_eq!(second.history(), &[word("darts"), word("piano")]);
    assert!(!second.is_locked());

    // restoring twice changes nothing
    let keyboard = second.keyboard().clone();
    assert!(second.restore());
    assert_eq!(second.history().len(), 2);
    assert_eq!(second.keyboard(), &keyboard);
}

#[test]
fn restored_finished_game_stays_finished() {
    let dir = tempdir().unwrap();
    let (mut first, clock) = session_with("patio", FileStore::with_dir(dir.path()));
    play(&mut first, &clock, "patio");
    assert_eq!(first.status(), GameStatus::Won);

    let (mut second, _) = session_with("patio", FileStore::with_dir(dir.path()));
    assert!(second.restore());
    assert_eq!(second.status(), GameStatus::Won);
    second.append_letter(Letter::new('a').unwrap());
    assert!(second.current_attempt().is_empty());
}

#[test]
fn save_for_another_secret_is_ignored() {
    let store = MemoryStore::new();
    store::save(&store, &SavedGame::new(&word("horse"), &[word("darts")])).unwrap();

    let (mut session, _) = session_with("patio", store.clone());
    assert!(!session.restore());
    assert!(session.history().is_empty());
}

#[test]
fn secret_match_ignores_case() {
    let store = MemoryStore::new();
    store
        .set(SAVE_KEY, r#"{"secret":"PATIO","history":["darts"]}"#)
        .unwrap();

    let (mut session, _) = session_with("patio", store);
    assert!(session.restore());
    assert_eq!(session.history(), &[word("darts")]);
}

#[test]
fn malformed_saves_are_ignored() {
    let records = [
        "not json",
        r#"{"secret":"patio"}"#,
        r#"{"secret":"patio","history":["da"]}"#,
        r#"{"secret":"patio","history":["darts","darts","darts","darts","darts","darts","darts"]}"#,
        r#"{"secret":"patio","history":["patio","darts","piano"]}"#,
        r#"{"secret":"patio","history":["darts","PATIO","piano"]}"#,
    ];
    for raw in records {
        let store = MemoryStore::new();
        store.set(SAVE_KEY, raw).unwrap();
        let (mut session, _) = session_with("patio", store);
        assert!(!session.restore(), "restored from {raw}");
        assert!(session.history().is_empty());
    }
}

#[test]
fn unavailable_storage_does_not_stop_the_game() {
    let store = MemoryStore::new();
    store.set_failing(true);

    let (mut session, clock) = session_with("patio", store.clone());
    assert!(!session.restore());
    play(&mut session, &clock, "darts");
    play(&mut session, &clock, "patio");
    assert_eq!(session.status(), GameStatus::Won);

    store.set_failing(false);
    assert_eq!(store::load(&store).unwrap(), None);
}
