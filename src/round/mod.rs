//! Round state machine
//!
//! Owns one round's grid and key statuses, accepts key events and decides
//! win, loss or advance. Invalid input (keys on a finished round, keys before a
//! target is known, letters into a full row) is ignored without error.

mod grid;
mod key;
pub mod solo;

pub use grid::Grid;
pub use key::{KEYBOARD_ROWS, Key};

use crate::core::{
    CellStatus, KeyStatusTracker, MAX_GUESSES, ScoreOutcome, WORD_LENGTH, Word, evaluate,
};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundPhase {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl RoundPhase {
    #[must_use]
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Grid, current row and phase of a single round
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundState {
    grid: Grid,
    current_line: usize,
    phase: RoundPhase,
    target: Option<Word>,
}

impl RoundState {
    #[must_use]
    pub fn new(target: Option<Word>) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }
}

/// Receives the outcome of a round when it finishes
///
/// Keeps the state machine unaware of what a finished round means to the caller
/// (a message in single-player, an outbound score in a room).
pub trait RoundObserver {
    fn on_round_completed(&mut self, outcome: ScoreOutcome, word: &Word);
}

impl<F: FnMut(ScoreOutcome, &Word)> RoundObserver for F {
    fn on_round_completed(&mut self, outcome: ScoreOutcome, word: &Word) {
        self(outcome, word);
    }
}

/// State machine for one round: IN_PROGRESS → WON | LOST
#[derive(Debug, Clone, Default)]
pub struct RoundStateMachine {
    state: RoundState,
    keys: KeyStatusTracker,
}

impl RoundStateMachine {
    /// Start a round against `target`
    #[must_use]
    pub fn new(target: Word) -> Self {
        Self {
            state: RoundState::new(Some(target)),
            keys: KeyStatusTracker::new(),
        }
    }

    /// Start a round whose target is not known yet
    ///
    /// All keys are ignored until [`Self::supply_target`] is called.
    #[must_use]
    pub fn awaiting_target() -> Self {
        Self::default()
    }

    /// Provide the target for a round created with [`Self::awaiting_target`]
    ///
    /// Has no effect if the round already has a target.
    pub fn supply_target(&mut self, target: Word) {
        if self.state.target.is_none() {
            self.state.target = Some(target);
        }
    }

    /// Replace the round wholesale and clear key statuses
    pub fn reset(&mut self, target: Option<Word>) {
        self.state = RoundState::new(target);
        self.keys.reset();
    }

    /// Apply a key event
    ///
    /// Returns `true` if the round state changed. `observer` is notified exactly
    /// once, on the submit that finishes the round.
    pub fn apply<O: RoundObserver + ?Sized>(&mut self, key: Key, observer: &mut O) -> bool {
        if self.state.phase.is_finished() || self.state.target.is_none() {
            return false;
        }

        let row = self.state.current_line;
        match key {
            Key::Letter(letter) if letter.is_ascii_alphabetic() => {
                self.state.grid.push_letter(row, letter.to_ascii_uppercase())
            }
            Key::Letter(_) => false,
            Key::Backspace => self.state.grid.pop_letter(row),
            Key::Enter => self.submit(observer),
        }
    }

    fn submit<O: RoundObserver + ?Sized>(&mut self, observer: &mut O) -> bool {
        let row = self.state.current_line;
        if !self.state.grid.is_row_full(row) {
            return false;
        }
        let Some(target) = self.state.target.clone() else {
            return false;
        };
        let Some(guess) = Word::from_cells(self.state.grid.row(row)) else {
            return false;
        };

        let statuses = evaluate(self.state.grid.row(row), true, &target);
        for (cell, status) in self.state.grid.row(row).iter().zip(statuses) {
            if let Some(letter) = *cell {
                self.keys.observe(letter, status);
            }
        }

        let is_won = guess == target;
        self.state.current_line += 1;
        self.state.phase = if is_won {
            RoundPhase::Won
        } else if self.state.current_line == MAX_GUESSES {
            RoundPhase::Lost
        } else {
            RoundPhase::InProgress
        };

        debug!(
            guess = guess.text(),
            row = self.state.current_line,
            phase = ?self.state.phase,
            "row submitted"
        );

        if let Some(outcome) = self.outcome() {
            observer.on_round_completed(outcome, &target);
        }
        true
    }

    /// Score outcome if the round is finished
    #[must_use]
    pub fn outcome(&self) -> Option<ScoreOutcome> {
        match self.state.phase {
            RoundPhase::InProgress => None,
            RoundPhase::Won => Some(ScoreOutcome::won_at(self.state.current_line)),
            RoundPhase::Lost => Some(ScoreOutcome::lost()),
        }
    }

    #[must_use]
    pub const fn phase(&self) -> RoundPhase {
        self.state.phase
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.state.phase.is_finished()
    }

    /// Index of the row being typed into; equals the number of submitted rows
    #[must_use]
    pub const fn current_line(&self) -> usize {
        self.state.current_line
    }

    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.state.grid
    }

    #[must_use]
    pub const fn target(&self) -> Option<&Word> {
        self.state.target.as_ref()
    }

    #[must_use]
    pub const fn state(&self) -> &RoundState {
        &self.state
    }

    /// Read-only view of the per-letter statuses
    #[must_use]
    pub const fn key_statuses(&self) -> &KeyStatusTracker {
        &self.keys
    }

    /// Cell statuses for a grid row; rows not yet submitted are all `Default`
    #[must_use]
    pub fn row_statuses(&self, row: usize) -> [CellStatus; WORD_LENGTH] {
        match &self.state.target {
            Some(target) => evaluate(
                self.state.grid.row(row),
                row < self.state.current_line,
                target,
            ),
            None => [CellStatus::Default; WORD_LENGTH],
        }
    }
}
