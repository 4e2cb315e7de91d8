//! Core domain types for the word-guessing round
//!
//! This module contains the fundamental domain types with no I/O.
//! Everything here is pure and deterministic.

mod keys;
mod score;
mod status;
mod word;

pub use keys::KeyStatusTracker;
pub use score::{SCORE_TABLE, ScoreKind, ScoreOutcome};
pub use status::{CellStatus, Row, evaluate};
pub use word::{Word, WordError};

/// Number of columns in the grid (letters per word)
pub const WORD_LENGTH: usize = 5;

/// Number of rows in the grid (guesses per round)
pub const MAX_GUESSES: usize = 6;
