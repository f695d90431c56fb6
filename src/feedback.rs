//! Per-letter feedback for submitted attempts.
//!
//! The evaluation rule here is simpler than the newspaper game:
//! a letter that is in the secret but not at this position is always
//! [`FeedbackClass::Present`], no matter how many times it occurs in the
//! attempt or the secret.

use std::collections::BTreeMap;

use crate::word::{Letter, Word, WORD_LENGTH};

/// Feedback for one letter position, ordered `Absent < Present < Correct`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum_macros::Display)]
pub enum FeedbackClass {
    /// Letter is not in the secret (gray)
    Absent,
    /// Letter is in the secret at another position (yellow)
    Present,
    /// Letter matches the secret at this position (green)
    Correct,
}

impl FeedbackClass {
    /// Returns the better of two classes.
    pub fn merge(self, other: FeedbackClass) -> FeedbackClass {
        self.max(other)
    }

    pub fn to_emoji(self) -> char {
        match self {
            FeedbackClass::Correct => '🟩',
            FeedbackClass::Present => '🟨',
            FeedbackClass::Absent => '⬛',
        }
    }
}

/// Feedback for every position of a submitted attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttemptFeedback(pub [FeedbackClass; WORD_LENGTH]);

impl AttemptFeedback {
    pub fn classes(&self) -> &[FeedbackClass; WORD_LENGTH] {
        &self.0
    }

    pub fn is_win(&self) -> bool {
        self.0.iter().all(|class| *class == FeedbackClass::Correct)
    }

    /// Renders the feedback as a row of colored squares, e.g. `⬛🟩⬛🟨⬛`.
    pub fn to_emoji(&self) -> String {
        self.0.iter().map(|class| class.to_emoji()).collect()
    }
}

/// Computes the feedback for `attempt` against `secret`.
///
/// ```
/// use wordle::feedback::{evaluate, FeedbackClass::*};
/// use wordle::word::Word;
///
/// let feedback = evaluate(&Word::new("darts").unwrap(), &Word::new("patio").unwrap());
/// assert_eq!(feedback.0, [Absent, Correct, Absent, Present, Absent]);
/// ```
pub fn evaluate(attempt: &Word, secret: &Word) -> AttemptFeedback {
    let mut classes = [FeedbackClass::Absent; WORD_LENGTH];
    for (i, class) in classes.iter_mut().enumerate() {
        let letter = attempt.letter_at(i);
        *class = if letter == secret.letter_at(i) {
            FeedbackClass::Correct
        } else if secret.contains(letter) {
            FeedbackClass::Present
        } else {
            FeedbackClass::Absent
        };
    }
    AttemptFeedback(classes)
}

/// Best known feedback per letter across a history of attempts.
///
/// Letters that were never guessed have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardFeedback {
    best: BTreeMap<Letter, FeedbackClass>,
}

impl KeyboardFeedback {
    pub fn get(&self, letter: Letter) -> Option<FeedbackClass> {
        self.best.get(&letter).copied()
    }

    /// Folds one evaluated attempt in. A letter's class can only improve.
    pub fn record(&mut self, attempt: &Word, feedback: &AttemptFeedback) {
        for (letter, class) in attempt.letters().iter().zip(feedback.classes()) {
            self.best
                .entry(*letter)
                .and_modify(|best| *best = best.merge(*class))
                .or_insert(*class);
        }
    }

    pub fn len(&self) -> usize {
        self.best.len()
    }

    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }
}

/// Recomputes the keyboard coloring for a whole history.
pub fn best_colors(history: &[Word], secret: &Word) -> KeyboardFeedback {
    history
        .iter()
        .fold(KeyboardFeedback::default(), |mut keyboard, attempt| {
            keyboard.record(attempt, &evaluate(attempt, secret));
            keyboard
        })
}
