//! Best-known status per letter, for colouring the keyboard

use super::CellStatus;
use rustc_hash::FxHashMap;

/// Aggregates cell feedback into one status per letter
///
/// Statuses only ever upgrade towards `Correct`: once a letter is seen in the
/// right position it stays `Correct` until [`KeyStatusTracker::reset`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyStatusTracker {
    statuses: FxHashMap<u8, CellStatus>,
}

impl KeyStatusTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record feedback for `letter`
    ///
    /// No-op if the letter is already `Correct` or `status` carries no feedback.
    pub fn observe(&mut self, letter: u8, status: CellStatus) {
        if !status.is_feedback() {
            return;
        }
        let letter = letter.to_ascii_uppercase();
        let entry = self.statuses.entry(letter).or_insert(status);
        if *entry != CellStatus::Correct {
            *entry = status;
        }
    }

    /// Status for a letter, `Default` if never observed
    #[must_use]
    pub fn status(&self, letter: u8) -> CellStatus {
        self.statuses
            .get(&letter.to_ascii_uppercase())
            .copied()
            .unwrap_or_default()
    }

    /// Forget all letters
    pub fn reset(&mut self) {
        self.statuses.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unseen_letter_is_default() {
        let tracker = KeyStatusTracker::new();
        assert_eq!(tracker.status(b'Q'), CellStatus::Default);
        assert!(tracker.is_empty());
    }

    #[test]
    fn misplaced_upgrades_to_correct() {
        let mut tracker = KeyStatusTracker::new();
        tracker.observe(b'A', CellStatus::Misplaced);
        assert_eq!(tracker.status(b'A'), CellStatus::Misplaced);

        tracker.observe(b'A', CellStatus::Correct);
        assert_eq!(tracker.status(b'A'), CellStatus::Correct);
    }

    #[test]
    fn correct_never_regresses() {
        let mut tracker = KeyStatusTracker::new();
        tracker.observe(b'E', CellStatus::Correct);
        tracker.observe(b'E', CellStatus::Misplaced);
        tracker.observe(b'E', CellStatus::Wrong);
        assert_eq!(tracker.status(b'E'), CellStatus::Correct);
    }

    #[test]
    fn non_correct_statuses_overwrite() {
        // Only CORRECT is sticky; later feedback replaces earlier feedback otherwise.
        let mut tracker = KeyStatusTracker::new();
        tracker.observe(b'R', CellStatus::Misplaced);
        tracker.observe(b'R', CellStatus::Wrong);
        assert_eq!(tracker.status(b'R'), CellStatus::Wrong);
    }

    #[test]
    fn default_status_is_ignored() {
        let mut tracker = KeyStatusTracker::new();
        tracker.observe(b'R', CellStatus::Misplaced);
        tracker.observe(b'R', CellStatus::Default);
        assert_eq!(tracker.status(b'R'), CellStatus::Misplaced);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let mut tracker = KeyStatusTracker::new();
        tracker.observe(b'c', CellStatus::Wrong);
        assert_eq!(tracker.status(b'C'), CellStatus::Wrong);
    }

    #[test]
    fn reset_clears_everything() {
        let mut tracker = KeyStatusTracker::new();
        tracker.observe(b'C', CellStatus::Correct);
        tracker.reset();
        assert_eq!(tracker.status(b'C'), CellStatus::Default);
        assert!(tracker.is_empty());
    }
}
