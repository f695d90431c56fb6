//! Letters and five-letter words.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Number of letters in every word of the game.
pub const WORD_LENGTH: usize = 5;

/// A single lowercase ASCII letter, `a` through `z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Letter(u8);

impl Letter {
    /// Returns the letter for `c`, lowercasing it first. Anything outside
    /// `a-z` / `A-Z` yields `None`.
    pub fn new(c: char) -> Option<Self> {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_lowercase() {
            Some(Self(c as u8))
        } else {
            None
        }
    }

    pub fn as_char(self) -> char {
        self.0 as char
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("word must be exactly {WORD_LENGTH} letters, got {0}")]
    InvalidLength(usize),
    #[error("word contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// An immutable five-letter word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Word([Letter; WORD_LENGTH]);

impl Word {
    /// Parses `text` into a word. Uppercase input is normalized.
    ///
    /// ```
    /// use wordle::word::Word;
    ///
    /// let word = Word::new("PATIO").unwrap();
    /// assert_eq!(word.to_string(), "patio");
    /// assert!(Word::new("pati").is_err());
    /// ```
    pub fn new(text: &str) -> Result<Self, WordError> {
        let count = text.chars().count();
        if count != WORD_LENGTH {
            return Err(WordError::InvalidLength(count));
        }

        let mut letters = [Letter(b'a'); WORD_LENGTH];
        for (slot, c) in letters.iter_mut().zip(text.chars()) {
            *slot = Letter::new(c).ok_or(WordError::InvalidCharacter(c))?;
        }
        Ok(Self(letters))
    }

    pub fn from_letters(letters: [Letter; WORD_LENGTH]) -> Self {
        Self(letters)
    }

    pub fn letters(&self) -> &[Letter; WORD_LENGTH] {
        &self.0
    }

    /// # Panics
    /// Panics if `index >= WORD_LENGTH`.
    pub fn letter_at(&self, index: usize) -> Letter {
        self.0[index]
    }

    pub fn contains(&self, letter: Letter) -> bool {
        self.0.contains(&letter)
    }
}

impl FromStr for Word {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in &self.0 {
            write!(f, "{letter}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_accepts_ascii_letters_only() {
        assert_eq!(Letter::new('a').map(Letter::as_char), Some('a'));
        assert_eq!(Letter::new('Q').map(Letter::as_char), Some('q'));
        assert_eq!(Letter::new('1'), None);
        assert_eq!(Letter::new(' '), None);
        assert_eq!(Letter::new('é'), None);
    }

    #[test]
    fn word_creation_valid() {
        let word = Word::new("patio").unwrap();
        assert_eq!(word.to_string(), "patio");
        assert_eq!(word.letter_at(0).as_char(), 'p');
        assert_eq!(word.letter_at(4).as_char(), 'o');
    }

    #[test]
    fn word_creation_uppercase_normalized() {
        assert_eq!(Word::new("HoRsE").unwrap(), Word::new("horse").unwrap());
    }

    #[test]
    fn word_creation_invalid_length() {
        assert_eq!(Word::new("pati"), Err(WordError::InvalidLength(4)));
        assert_eq!(Word::new("patios"), Err(WordError::InvalidLength(6)));
        assert_eq!(Word::new(""), Err(WordError::InvalidLength(0)));
    }

    #[test]
    fn word_creation_invalid_characters() {
        assert_eq!(Word::new("pat1o"), Err(WordError::InvalidCharacter('1')));
        assert_eq!(Word::new("pat o"), Err(WordError::InvalidCharacter(' ')));
    }

    #[test]
    fn word_contains() {
        let word: Word = "pizza".parse().unwrap();
        assert!(word.contains(Letter::new('z').unwrap()));
        assert!(!word.contains(Letter::new('x').unwrap()));
    }
}
