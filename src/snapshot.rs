//! Immutable views of a game handed to rendering collaborators.

use crate::feedback::{AttemptFeedback, KeyboardFeedback};
use crate::game::{GameStatus, Notice};
use crate::word::{Letter, Word};

/// One grid row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowView {
    /// A submitted attempt with its feedback.
    Submitted { word: Word, feedback: AttemptFeedback },
    /// The attempt being typed, without feedback.
    Active { letters: Vec<Letter> },
    Empty,
}

impl RowView {
    /// Whether the row is revealed (colored) on screen.
    pub fn is_solved(&self) -> bool {
        matches!(self, RowView::Submitted { .. })
    }

    /// Letter shown in cell `index`, if any.
    pub fn letter_at(&self, index: usize) -> Option<Letter> {
        match self {
            RowView::Submitted { word, .. } => Some(word.letter_at(index)),
            RowView::Active { letters } => letters.get(index).copied(),
            RowView::Empty => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub rows: Vec<RowView>,
    pub keyboard: KeyboardFeedback,
    pub status: GameStatus,
    pub locked: bool,
    /// The secret, once the game is lost.
    pub revealed: Option<Word>,
    /// Modal message the host is currently showing, if any.
    pub notice: Option<Notice>,
}

impl Snapshot {
    pub fn attempts_used(&self) -> usize {
        self.rows.iter().filter(|row| row.is_solved()).count()
    }
}

/// Anything that can draw a game snapshot.
pub trait Renderer {
    type Error;

    fn render(&mut self, snapshot: &Snapshot) -> Result<(), Self::Error>;
}
