//! Guess evaluation
//!
//! Scores a grid row against the target word, one status per cell.
//!
//! Membership is a plain "letter occurs anywhere in the target" test. A guess
//! with two of the same letter against a target holding only one reports
//! MISPLACED for both occurrences; letters are not budgeted by frequency.

use super::{WORD_LENGTH, Word};

/// Feedback for a single cell or keyboard key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellStatus {
    /// Not yet submitted, or the cell is empty
    #[default]
    Default,
    /// Letter does not occur in the target
    Wrong,
    /// Letter occurs in the target at another position
    Misplaced,
    /// Letter matches the target at this position
    Correct,
}

impl CellStatus {
    /// Whether this status carries feedback (anything but `Default`)
    #[inline]
    #[must_use]
    pub const fn is_feedback(self) -> bool {
        !matches!(self, Self::Default)
    }
}

/// A grid row: one optional uppercase ASCII letter per column
pub type Row = [Option<u8>; WORD_LENGTH];

/// Evaluate a row against the target word
///
/// Pure and total: unsubmitted rows and empty cells yield `Default`.
///
/// # Examples
/// ```
/// use wordle_rooms::core::{CellStatus, Word, evaluate};
///
/// let target = Word::new("crane").unwrap();
/// let row = [Some(b'T'), Some(b'R'), Some(b'A'), Some(b'C'), Some(b'E')];
///
/// assert_eq!(
///     evaluate(&row, true, &target),
///     [
///         CellStatus::Wrong,
///         CellStatus::Correct,
///         CellStatus::Correct,
///         CellStatus::Misplaced,
///         CellStatus::Correct,
///     ]
/// );
/// ```
#[must_use]
pub fn evaluate(row: &Row, submitted: bool, target: &Word) -> [CellStatus; WORD_LENGTH] {
    let mut result = [CellStatus::Default; WORD_LENGTH];
    if !submitted {
        return result;
    }

    for (i, cell) in row.iter().enumerate() {
        let Some(letter) = *cell else {
            continue;
        };

        result[i] = if letter == target.char_at(i) {
            CellStatus::Correct
        } else if target.has_letter(letter) {
            CellStatus::Misplaced
        } else {
            CellStatus::Wrong
        };
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use CellStatus::{Correct, Default, Misplaced, Wrong};

    fn row(text: &str) -> Row {
        let mut cells = [None; WORD_LENGTH];
        for (cell, byte) in cells.iter_mut().zip(text.bytes()) {
            *cell = Some(byte);
        }
        cells
    }

    #[test]
    fn trace_against_crane() {
        let target = Word::new("crane").unwrap();
        assert_eq!(
            evaluate(&row("TRACE"), true, &target),
            [Wrong, Correct, Correct, Misplaced, Correct]
        );
    }

    #[test]
    fn unsubmitted_row_is_default() {
        let target = Word::new("crane").unwrap();
        assert_eq!(evaluate(&row("CRANE"), false, &target), [Default; 5]);
    }

    #[test]
    fn empty_cells_are_default() {
        let target = Word::new("crane").unwrap();
        let mut cells = row("CRANE");
        cells[3] = None;
        assert_eq!(
            evaluate(&cells, true, &target),
            [Correct, Correct, Correct, Default, Correct]
        );
    }

    #[test]
    fn all_wrong() {
        let target = Word::new("hooks").unwrap();
        assert_eq!(evaluate(&row("CRANE"), true, &target), [Wrong; 5]);
    }

    #[test]
    fn exact_match_all_correct() {
        let target = Word::new("games").unwrap();
        assert_eq!(evaluate(&row("GAMES"), true, &target), [Correct; 5]);
    }

    #[test]
    fn duplicate_letters_are_not_budgeted() {
        // WORLD holds a single O; both O's in HOOKS still report against it.
        // Position 1 is an exact match, position 2 falls back to membership.
        let target = Word::new("world").unwrap();
        assert_eq!(
            evaluate(&row("HOOKS"), true, &target),
            [Wrong, Correct, Misplaced, Wrong, Wrong]
        );

        // Two E's guessed, one E in the target: both MISPLACED.
        let target = Word::new("crane").unwrap();
        assert_eq!(
            evaluate(&row("EERIE"), true, &target),
            [Misplaced, Misplaced, Misplaced, Wrong, Correct]
        );
    }
}
