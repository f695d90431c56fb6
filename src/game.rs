//! Game session: the secret, the attempts made so far and the rules that
//! move a game from in progress to won or lost.

use std::fmt;
use std::time::Duration;

use itertools::Itertools;
use thiserror::Error;

use crate::dictionary::Dictionary;
use crate::feedback::{best_colors, evaluate, KeyboardFeedback};
use crate::input::GameInput;
use crate::lock::{Clock, InputLock, SystemClock, DEFAULT_LOCK_MS};
use crate::snapshot::{RowView, Snapshot};
use crate::store::{self, KeyValueStore, SavedGame};
use crate::word::{Letter, Word, WORD_LENGTH};

/// Number of attempts a player gets.
pub const MAX_ATTEMPTS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }
}

/// Messages surfaced to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    NotInDictionary(Word),
    Win,
    /// The game was lost; shows the secret.
    Reveal(Word),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NotInDictionary(_) => write!(f, "Not in the dictionary"),
            Notice::Win => write!(f, "You win!"),
            Notice::Reveal(secret) => write!(f, "{}", secret.to_string().to_uppercase()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("{0} is not in the dictionary")]
    NotInDictionary(Word),
}

/// Result of a submit that did not fail validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Nothing happened: the game is over, input is locked or the attempt
    /// is incomplete.
    Ignored,
    Accepted {
        status: GameStatus,
        notice: Option<Notice>,
    },
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub dictionary: Dictionary,
    pub secret: Word,
    pub lock_duration: Duration,
}

impl SessionConfig {
    pub fn new(dictionary: Dictionary, secret: Word) -> Self {
        Self {
            dictionary,
            secret,
            lock_duration: Duration::from_millis(DEFAULT_LOCK_MS),
        }
    }
}

/// One game against one secret.
pub struct GameSession {
    dictionary: Dictionary,
    secret: Word,
    history: Vec<Word>,
    current: Vec<Letter>,
    status: GameStatus,
    keyboard: KeyboardFeedback,
    lock: InputLock,
    clock: Box<dyn Clock>,
    store: Option<Box<dyn KeyValueStore>>,
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("secret", &self.secret)
            .field("history", &self.history)
            .field("current", &self.current)
            .field("status", &self.status)
            .field("lock", &self.lock)
            .finish_non_exhaustive()
    }
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            dictionary: config.dictionary,
            secret: config.secret,
            history: Vec::with_capacity(MAX_ATTEMPTS),
            current: Vec::with_capacity(WORD_LENGTH),
            status: GameStatus::InProgress,
            keyboard: KeyboardFeedback::default(),
            lock: InputLock::new(config.lock_duration),
            clock: Box::new(SystemClock),
            store: None,
        }
    }

    pub fn with_clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Attaches a store that receives the game after every accepted
    /// submission.
    pub fn with_store<S: KeyValueStore + 'static>(mut self, store: S) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Loads saved progress for this secret from the attached store.
    ///
    /// Missing, unreadable, or foreign saves leave the game untouched.
    /// Returns `true` if a saved history was applied.
    pub fn restore(&mut self) -> bool {
        let Some(store) = self.store.as_deref() else {
            return false;
        };
        let saved = store::load(store)
            .ok()
            .flatten()
            .and_then(|record| record.history_for(&self.secret))
            .filter(|history| history.len() <= MAX_ATTEMPTS);

        match saved {
            Some(history) => {
                self.history = history;
                self.current.clear();
                self.lock.clear();
                self.refresh();
                true
            }
            None => false,
        }
    }

    /// Starts over with a new secret.
    pub fn reset(&mut self, secret: Word) {
        self.secret = secret;
        self.history.clear();
        self.current.clear();
        self.lock.clear();
        self.refresh();
    }

    pub fn secret(&self) -> &Word {
        &self.secret
    }

    pub fn history(&self) -> &[Word] {
        &self.history
    }

    pub fn current_attempt(&self) -> &[Letter] {
        &self.current
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn keyboard(&self) -> &KeyboardFeedback {
        &self.keyboard
    }

    pub fn is_locked(&mut self) -> bool {
        self.lock.is_locked(self.clock.now())
    }

    /// Releases the input lock if its time is up. Returns `true` when it
    /// was released by this call.
    pub fn tick(&mut self) -> bool {
        self.lock.poll(self.clock.now())
    }

    fn accepts_input(&mut self) -> bool {
        !self.status.is_over() && !self.is_locked()
    }

    pub fn append_letter(&mut self, letter: Letter) {
        if !self.accepts_input() || self.current.len() == WORD_LENGTH {
            return;
        }
        self.current.push(letter);
    }

    pub fn backspace(&mut self) {
        if !self.accepts_input() {
            return;
        }
        self.current.pop();
    }

    /// Submits the current attempt.
    ///
    /// An attempt that is not in the dictionary is rejected and left in
    /// place for editing.
    pub fn submit(&mut self) -> Result<Submission, SubmitError> {
        if !self.accepts_input() {
            return Ok(Submission::Ignored);
        }
        let Ok(letters) = <[Letter; WORD_LENGTH]>::try_from(self.current.as_slice()) else {
            return Ok(Submission::Ignored);
        };

        let attempt = Word::from_letters(letters);
        if !self.dictionary.contains(&attempt) {
            return Err(SubmitError::NotInDictionary(attempt));
        }

        self.history.push(attempt);
        self.current.clear();
        self.refresh();
        self.persist();

        let notice = match self.status {
            GameStatus::Won => Some(Notice::Win),
            GameStatus::Lost => Some(Notice::Reveal(self.secret)),
            GameStatus::InProgress => {
                self.lock.engage(self.clock.now());
                None
            }
        };

        Ok(Submission::Accepted {
            status: self.status,
            notice,
        })
    }

    /// Applies one logical input and returns the notice to show, if any.
    pub fn handle(&mut self, input: GameInput) -> Option<Notice> {
        match input {
            GameInput::Letter(letter) => {
                self.append_letter(letter);
                None
            }
            GameInput::Backspace => {
                self.backspace();
                None
            }
            GameInput::Enter => match self.submit() {
                Ok(Submission::Accepted { notice, .. }) => notice,
                Ok(Submission::Ignored) => None,
                Err(SubmitError::NotInDictionary(word)) => Some(Notice::NotInDictionary(word)),
            },
        }
    }

    pub fn snapshot(&mut self) -> Snapshot {
        let locked = self.is_locked();
        let rows = (0..MAX_ATTEMPTS)
            .map(|i| match self.history.get(i) {
                Some(word) => RowView::Submitted {
                    word: *word,
                    feedback: evaluate(word, &self.secret),
                },
                None if i == self.history.len() => RowView::Active {
                    letters: self.current.clone(),
                },
                None => RowView::Empty,
            })
            .collect();

        Snapshot {
            rows,
            keyboard: self.keyboard.clone(),
            status: self.status,
            locked,
            revealed: (self.status == GameStatus::Lost).then_some(self.secret),
            notice: None,
        }
    }

    /// Spoiler-free summary of a finished game, e.g. `3/6` followed by one
    /// row of squares per attempt. `None` while the game is in progress.
    pub fn share_text(&self) -> Option<String> {
        let score = match self.status {
            GameStatus::InProgress => return None,
            GameStatus::Won => self.history.len().to_string(),
            GameStatus::Lost => "X".to_string(),
        };
        let rows = self
            .history
            .iter()
            .map(|word| evaluate(word, &self.secret).to_emoji())
            .join("\n");
        Some(format!("{score}/{MAX_ATTEMPTS}\n{rows}"))
    }

    fn refresh(&mut self) {
        self.status = derive_status(&self.history, &self.secret);
        self.keyboard = best_colors(&self.history, &self.secret);
    }

    fn persist(&self) {
        if let Some(store) = self.store.as_deref() {
            let _ = store::save(store, &SavedGame::new(&self.secret, &self.history));
        }
    }
}

fn derive_status(history: &[Word], secret: &Word) -> GameStatus {
    if history.contains(secret) {
        GameStatus::Won
    } else if history.len() >= MAX_ATTEMPTS {
        GameStatus::Lost
    } else {
        GameStatus::InProgress
    }
}
