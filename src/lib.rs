// Library surface for the binary, headless integration tests and reuse.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod dictionary;
pub mod feedback;
pub mod game;
pub mod input;
pub mod lock;
pub mod runtime;
pub mod snapshot;
pub mod store;
pub mod ui;
pub mod word;

pub use feedback::{best_colors, evaluate, AttemptFeedback, FeedbackClass, KeyboardFeedback};
pub use game::{GameSession, GameStatus, Notice, SessionConfig, Submission, SubmitError};
pub use word::{Letter, Word, WordError};
