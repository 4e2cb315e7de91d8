//! Single-player games: consecutive rounds against random targets

use super::{Key, RoundObserver, RoundStateMachine};
use crate::core::{ScoreOutcome, Word};
use crate::wordlists::WordList;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

/// Result of the most recently finished round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finished {
    pub outcome: ScoreOutcome,
    pub word: Word,
}

#[derive(Default)]
struct Capture(Option<Finished>);

impl RoundObserver for Capture {
    fn on_round_completed(&mut self, outcome: ScoreOutcome, word: &Word) {
        self.0 = Some(Finished {
            outcome,
            word: word.clone(),
        });
    }
}

/// Running tally across games
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SoloStats {
    pub played: u32,
    pub won: u32,
    pub points: u32,
}

/// A local game with no room attached
#[derive(Debug)]
pub struct SoloGame {
    words: WordList,
    rng: StdRng,
    round: RoundStateMachine,
    finished: Option<Finished>,
    stats: SoloStats,
}

impl SoloGame {
    #[must_use]
    pub fn new(words: WordList) -> Self {
        Self::with_rng(words, StdRng::from_os_rng())
    }

    #[must_use]
    pub fn with_seed(words: WordList, seed: u64) -> Self {
        Self::with_rng(words, StdRng::seed_from_u64(seed))
    }

    fn with_rng(words: WordList, mut rng: StdRng) -> Self {
        let target = words.pick(&mut rng).clone();
        Self {
            words,
            rng,
            round: RoundStateMachine::new(target),
            finished: None,
            stats: SoloStats::default(),
        }
    }

    /// Apply a key; returns `true` if anything changed
    pub fn press(&mut self, key: Key) -> bool {
        let mut capture = Capture::default();
        let changed = self.round.apply(key, &mut capture);
        if let Some(result) = capture.0 {
            self.stats.played += 1;
            self.stats.points += result.outcome.points;
            if result.outcome.is_win() {
                self.stats.won += 1;
            }
            debug!(word = %result.word, points = result.outcome.points, "solo round finished");
            self.finished = Some(result);
        }
        changed
    }

    /// Type a whole guess and submit it
    ///
    /// Clears the current row first. Returns `false` if the guess was not
    /// accepted (wrong length, non-letters, or round already over).
    pub fn guess(&mut self, text: &str) -> bool {
        let Ok(word) = Word::new(text) else {
            return false;
        };
        while self.press(Key::Backspace) {}
        for &letter in word.chars() {
            self.press(Key::Letter(letter));
        }
        let line = self.round.current_line();
        self.press(Key::Enter);
        self.round.current_line() != line
    }

    /// Start over with a fresh random target
    pub fn new_game(&mut self) {
        let target = self.words.pick(&mut self.rng).clone();
        self.round.reset(Some(target));
        self.finished = None;
    }

    #[must_use]
    pub const fn round(&self) -> &RoundStateMachine {
        &self.round
    }

    /// The finished round, until the next game starts
    #[must_use]
    pub const fn finished(&self) -> Option<&Finished> {
        self.finished.as_ref()
    }

    #[must_use]
    pub const fn stats(&self) -> SoloStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScoreKind;

    fn game() -> SoloGame {
        let words = WordList::from_words(vec![Word::new("CRANE").unwrap()]).unwrap();
        SoloGame::with_seed(words, 5)
    }

    #[test]
    fn guessing_target_wins() {
        let mut game = game();
        assert!(game.guess("trace"));
        assert!(game.finished().is_none());
        assert!(game.guess("crane"));

        let finished = game.finished().unwrap();
        assert_eq!(finished.outcome.kind, ScoreKind::Scored);
        assert_eq!(finished.outcome.points, 8);
        assert_eq!(game.stats().won, 1);
    }

    #[test]
    fn short_or_invalid_guess_is_rejected() {
        let mut game = game();
        assert!(!game.guess("cra"));
        assert!(!game.guess("cr4ne"));
        assert!(!game.guess("cranes"));
        assert_eq!(game.round().current_line(), 0);
        assert!(game.finished().is_none());
    }

    #[test]
    fn overlong_guess_leaves_row_untouched() {
        let mut game = game();
        game.press(Key::Letter(b'T'));
        assert!(!game.guess("cranes"));
        assert_eq!(game.round().grid().row_text(0), "T");
        assert_eq!(game.stats().played, 0);
    }

    #[test]
    fn new_game_clears_result() {
        let mut game = game();
        for _ in 0..6 {
            game.guess("HOOKS");
        }
        assert_eq!(game.finished().unwrap().word.text(), "CRANE");
        assert_eq!(game.stats().points, 0);

        game.new_game();
        assert!(game.finished().is_none());
        assert!(game.round().key_statuses().is_empty());
        assert_eq!(game.stats().played, 1);
    }
}
