//! Word lists: the accepted guesses and the pool the secret comes from.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::word::Word;

const DEFAULT_WORDS: &str = include_str!("../words/default.txt");

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read word list: {0}")]
    Io(#[from] io::Error),
    #[error("word list contains no valid five-letter words")]
    Empty,
    #[error("secret {0} is not in the word list")]
    SecretNotInDictionary(Word),
}

/// How the secret word is picked from a dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretChoice {
    /// First word of the list, so every player gets the same puzzle.
    First,
    Random,
    Fixed(Word),
}

/// An ordered, de-duplicated set of valid words.
#[derive(Debug, Clone)]
pub struct Dictionary {
    words: Vec<Word>,
    lookup: HashSet<Word>,
}

impl Dictionary {
    /// Builds a dictionary from raw lines. Blank lines and entries that are
    /// not five letters are skipped; duplicates keep their first position.
    pub fn from_lines<'a, I>(lines: I) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut words = Vec::new();
        let mut lookup = HashSet::new();
        for word in lines
            .into_iter()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter_map(|line| Word::new(line).ok())
        {
            if lookup.insert(word) {
                words.push(word);
            }
        }

        if words.is_empty() {
            return Err(DictionaryError::Empty);
        }
        Ok(Self { words, lookup })
    }

    /// Loads one word per line from `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let content = fs::read_to_string(path)?;
        Self::from_lines(content.lines())
    }

    /// The word list compiled into the binary.
    pub fn embedded() -> Self {
        Self::from_lines(DEFAULT_WORDS.lines()).expect("embedded word list is not empty")
    }

    pub fn contains(&self, word: &Word) -> bool {
        self.lookup.contains(word)
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn choose_secret<R: Rng + ?Sized>(
        &self,
        choice: &SecretChoice,
        rng: &mut R,
    ) -> Result<Word, DictionaryError> {
        match choice {
            SecretChoice::First => self.words.first().copied().ok_or(DictionaryError::Empty),
            SecretChoice::Random => self.words.choose(rng).copied().ok_or(DictionaryError::Empty),
            SecretChoice::Fixed(word) if self.contains(word) => Ok(*word),
            SecretChoice::Fixed(word) => Err(DictionaryError::SecretNotInDictionary(*word)),
        }
    }
}
