//! Round scoring
//!
//! A won round earns points from a fixed descending table indexed by the row the
//! target was found on. A lost round earns nothing.

use super::MAX_GUESSES;

/// Points for a win on row 1..=6
pub const SCORE_TABLE: [u32; MAX_GUESSES] = [10, 8, 6, 4, 2, 1];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreKind {
    Lost,
    Scored,
}

/// Result of one finished round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreOutcome {
    pub kind: ScoreKind,
    pub points: u32,
}

impl ScoreOutcome {
    /// Outcome of a lost round
    #[must_use]
    pub const fn lost() -> Self {
        Self {
            kind: ScoreKind::Lost,
            points: 0,
        }
    }

    /// Outcome of a round won on `row` (1-indexed)
    ///
    /// # Panics
    /// Panics if `row` is outside `1..=6`. A winning row beyond the table means
    /// the round state machine advanced past its last row.
    #[must_use]
    pub fn won_at(row: usize) -> Self {
        let points = row
            .checked_sub(1)
            .and_then(|index| SCORE_TABLE.get(index))
            .copied()
            .unwrap_or_else(|| {
                panic!("winning row {row} outside scoring table 1..={MAX_GUESSES}")
            });

        Self {
            kind: ScoreKind::Scored,
            points,
        }
    }

    #[must_use]
    pub const fn is_win(self) -> bool {
        matches!(self.kind, ScoreKind::Scored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_values_by_row() {
        let points: Vec<u32> = (1..=6).map(|row| ScoreOutcome::won_at(row).points).collect();
        assert_eq!(points, vec![10, 8, 6, 4, 2, 1]);
    }

    #[test]
    fn lost_scores_zero() {
        let outcome = ScoreOutcome::lost();
        assert_eq!(outcome.kind, ScoreKind::Lost);
        assert_eq!(outcome.points, 0);
        assert!(!outcome.is_win());
    }

    #[test]
    fn win_on_row_three_is_six() {
        let outcome = ScoreOutcome::won_at(3);
        assert_eq!(outcome.kind, ScoreKind::Scored);
        assert_eq!(outcome.points, 6);
        assert!(outcome.is_win());
    }

    #[test]
    #[should_panic(expected = "outside scoring table")]
    fn row_zero_is_an_invariant_violation() {
        let _ = ScoreOutcome::won_at(0);
    }

    #[test]
    #[should_panic(expected = "outside scoring table")]
    fn row_seven_is_an_invariant_violation() {
        let _ = ScoreOutcome::won_at(7);
    }
}
