//! Saved game progress.
//!
//! Progress lives in a string key-value store under [`SAVE_KEY`] as a JSON
//! object `{"secret": "...", "history": ["...", ...]}`. Stores are
//! best-effort: callers swallow their errors.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs::AppDirs;
use crate::word::Word;

/// Key under which the game record is stored.
pub const SAVE_KEY: &str = "data";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Io(#[from] io::Error),
    #[error("malformed save data: {0}")]
    Json(#[from] serde_json::Error),
}

/// A string key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new() -> Self {
        Self {
            dir: AppDirs::state_dir().unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    pub fn with_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// In-memory store. Clones share contents, and the store can be told to
/// fail every call to simulate unavailable storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    failing: Rc<Cell<bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.get() {
            return Err(io::Error::other("quota exceeded").into());
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check()?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check()?;
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The persisted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    pub secret: String,
    pub history: Vec<String>,
}

impl SavedGame {
    pub fn new(secret: &Word, history: &[Word]) -> Self {
        Self {
            secret: secret.to_string(),
            history: history.iter().map(Word::to_string).collect(),
        }
    }

    /// Returns the saved history if this record belongs to `secret`.
    ///
    /// Records for another secret, with entries that are not words, or that
    /// keep going after the secret was guessed are treated as absent.
    pub fn history_for(&self, secret: &Word) -> Option<Vec<Word>> {
        if !self.secret.eq_ignore_ascii_case(&secret.to_string()) {
            return None;
        }
        let history = self
            .history
            .iter()
            .map(|entry| Word::new(entry).ok())
            .collect::<Option<Vec<_>>>()?;

        // a won game ends on the winning guess
        let guessed_early = history
            .iter()
            .rev()
            .skip(1)
            .any(|attempt| attempt == secret);
        if guessed_early {
            return None;
        }
        Some(history)
    }
}

/// Reads the saved record, if any.
pub fn load(store: &dyn KeyValueStore) -> Result<Option<SavedGame>, StoreError> {
    match store.get(SAVE_KEY)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Overwrites the saved record.
pub fn save(store: &dyn KeyValueStore, record: &SavedGame) -> Result<(), StoreError> {
    let raw = serde_json::to_string(record)?;
    store.set(SAVE_KEY, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    fn word(s: &str) -> Word {
        Word::new(s).unwrap()
    }

    #[test]
    fn roundtrip_through_file_store() {
        let dir = tempdir().unwrap();
        let store = FileStore::with_dir(dir.path().join("nested"));
        let record = SavedGame::new(&word("patio"), &[word("darts"), word("piano")]);

        save(&store, &record).unwrap();
        assert_eq!(load(&store).unwrap(), Some(record));
        assert!(dir.path().join("nested").join("data.json").exists());
    }

    #[test]
    fn record_json_shape() {
        let record = SavedGame::new(&word("patio"), &[word("darts")]);
        let raw = serde_json::to_string(&record).unwrap();
        assert_eq!(raw, r#"{"secret":"patio","history":["darts"]}"#);
    }

    #[test]
    fn missing_file_is_no_save() {
        let dir = tempdir().unwrap();
        let store = FileStore::with_dir(dir.path());
        assert_eq!(load(&store).unwrap(), None);
    }

    #[test]
    fn garbage_is_a_json_error() {
        let store = MemoryStore::new();
        store.set(SAVE_KEY, "{not json").unwrap();
        assert_matches!(load(&store), Err(StoreError::Json(_)));
    }

    #[test]
    fn failing_memory_store_errors() {
        let store = MemoryStore::new();
        store.set_failing(true);
        assert_matches!(store.get(SAVE_KEY), Err(StoreError::Io(_)));
        assert_matches!(store.set(SAVE_KEY, "{}"), Err(StoreError::Io(_)));
    }

    #[test]
    fn history_for_matching_secret() {
        let record = SavedGame {
            secret: "PATIO".to_string(),
            history: vec!["darts".to_string()],
        };
        assert_eq!(record.history_for(&word("patio")), Some(vec![word("darts")]));
    }

    #[test]
    fn history_for_other_secret_is_discarded() {
        let record = SavedGame::new(&word("horse"), &[word("darts")]);
        assert_eq!(record.history_for(&word("patio")), None);
    }

    #[test]
    fn history_with_bad_entry_is_discarded() {
        let record = SavedGame {
            secret: "patio".to_string(),
            history: vec!["darts".to_string(), "no".to_string()],
        };
        assert_eq!(record.history_for(&word("patio")), None);
    }

    #[test]
    fn history_past_the_winning_guess_is_discarded() {
        let record = SavedGame::new(&word("patio"), &[word("patio"), word("darts")]);
        assert_eq!(record.history_for(&word("patio")), None);

        let record = SavedGame::new(&word("patio"), &[word("darts"), word("patio")]);
        assert_eq!(
            record.history_for(&word("patio")),
            Some(vec![word("darts"), word("patio")])
        );
    }
}
