//! Word lists for picking round targets
//!
//! A built-in fallback list is always available; a larger list can be loaded
//! from a JSON array at startup.

pub mod loader;

pub use loader::WordListError;

use crate::core::Word;
use rand::Rng;

/// Targets used verbatim when no word list can be loaded
pub const FALLBACK_WORDS: &[&str] = &["HELLO", "WORLD", "REACT", "HOOKS", "GAMES", "WORDS"];

/// A non-empty set of candidate targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordList {
    words: Vec<Word>,
}

impl WordList {
    /// The built-in fallback list
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            words: loader::words_from_slice(FALLBACK_WORDS),
        }
    }

    /// Wrap a list of words, `None` if it is empty
    #[must_use]
    pub fn from_words(words: Vec<Word>) -> Option<Self> {
        (!words.is_empty()).then_some(Self { words })
    }

    /// Pick a target uniformly at random
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &Word {
        &self.words[rng.random_range(0..self.words.len())]
    }

    #[must_use]
    pub fn contains(&self, word: &Word) -> bool {
        self.words.contains(word)
    }

    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for WordList {
    fn default() -> Self {
        Self::fallback()
    }
}
