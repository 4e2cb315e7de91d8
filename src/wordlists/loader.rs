//! Word list loading utilities
//!
//! Loads a JSON array of words from disk, falling back to the built-in list.

use super::WordList;
use crate::core::Word;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum WordListError {
    #[error("cannot read word list: {0}")]
    Io(#[from] io::Error),
    #[error("word list is not a JSON array of strings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("word list contains no valid 5-letter words")]
    Empty,
}

/// Load words from a JSON array file
///
/// Entries that are not valid 5-letter words are skipped.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a JSON array of
/// strings, or holds no valid word.
///
/// # Examples
/// ```no_run
/// use wordle_rooms::wordlists::loader::load_from_file;
///
/// let words = load_from_file("words.json").unwrap();
/// println!("Loaded {} words", words.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<WordList, WordListError> {
    let content = fs::read_to_string(path)?;
    parse_word_list(&content)
}

/// Parse a JSON array of words
///
/// # Errors
///
/// Returns an error if `content` is not a JSON array of strings or holds no
/// valid word.
pub fn parse_word_list(content: &str) -> Result<WordList, WordListError> {
    let raw: Vec<String> = serde_json::from_str(content)?;
    let words = raw
        .iter()
        .filter_map(|entry| Word::new(entry.trim()).ok())
        .collect();
    WordList::from_words(words).ok_or(WordListError::Empty)
}

/// Load the word list at `path`, or the fallback list
///
/// Failure is not fatal: it is logged and the fallback list is returned.
#[must_use]
pub fn load_or_fallback(path: Option<&Path>) -> WordList {
    let Some(path) = path else {
        return WordList::fallback();
    };

    match load_from_file(path) {
        Ok(list) => {
            info!(path = %path.display(), words = list.len(), "word list loaded");
            list
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "word list unavailable, using fallback");
            WordList::fallback()
        }
    }
}

/// Convert embedded string slice to Word vector
///
/// # Examples
/// ```
/// use wordle_rooms::wordlists::loader::words_from_slice;
/// use wordle_rooms::wordlists::FALLBACK_WORDS;
///
/// let words = words_from_slice(FALLBACK_WORDS);
/// assert_eq!(words.len(), FALLBACK_WORDS.len());
/// ```
#[must_use]
pub fn words_from_slice(slice: &[&str]) -> Vec<Word> {
    slice.iter().filter_map(|&s| Word::new(s).ok()).collect()
}
