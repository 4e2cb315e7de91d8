//! Wordle Rooms
//!
//! Word-guessing rounds played alone or in a multiplayer room: guess
//! evaluation, a per-round state machine, the room message contract and a
//! client-side session controller.
//!
//! # Quick Start
//!
//! ```rust
//! use wordle_rooms::core::{CellStatus, ScoreOutcome, Word};
//! use wordle_rooms::round::{Key, RoundStateMachine};
//!
//! fn on_done(outcome: ScoreOutcome, word: &Word) {
//!     println!("{word}: {} points", outcome.points);
//! }
//!
//! let mut round = RoundStateMachine::new(Word::new("crane").unwrap());
//! for c in "TRACE".chars() {
//!     round.apply(Key::from_char(c).unwrap(), &mut on_done);
//! }
//! round.apply(Key::Enter, &mut on_done);
//!
//! assert_eq!(round.row_statuses(0)[1], CellStatus::Correct);
//! ```

// Core domain types
pub mod core;

// Single round of guessing
pub mod round;

// Room message contract and endpoints
pub mod protocol;

// Multiplayer session
pub mod session;

// Word lists
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;

// Logging
pub mod telemetry;
