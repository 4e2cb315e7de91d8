//! Cancellable timers
//!
//! The controller never sleeps. It arms a timer by handing out a token, the
//! driver sleeps and hands the token back, and only the most recently armed
//! token of each kind is honoured. Cancelling or re-arming makes every earlier
//! token stale, so a late firing cannot act on state that has moved on.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// One-second tick of the pre-game countdown
    Countdown,
    /// Delayed reset after a round finishes
    AutoReset,
}

/// Identifies one arming of a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    pub kind: TimerKind,
    generation: u64,
}

#[derive(Debug, Default)]
pub struct Timers {
    next_generation: u64,
    countdown: Option<u64>,
    auto_reset: Option<u64>,
}

impl Timers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, kind: TimerKind) -> &mut Option<u64> {
        match kind {
            TimerKind::Countdown => &mut self.countdown,
            TimerKind::AutoReset => &mut self.auto_reset,
        }
    }

    /// Arm `kind`, superseding any pending arming of the same kind
    pub fn arm(&mut self, kind: TimerKind) -> TimerToken {
        self.next_generation += 1;
        let generation = self.next_generation;
        *self.slot(kind) = Some(generation);
        TimerToken { kind, generation }
    }

    /// Disarm `kind`, returning the token that was pending
    pub fn cancel(&mut self, kind: TimerKind) -> Option<TimerToken> {
        self.slot(kind)
            .take()
            .map(|generation| TimerToken { kind, generation })
    }

    /// Disarm everything
    pub fn cancel_all(&mut self) -> Vec<TimerToken> {
        [TimerKind::Countdown, TimerKind::AutoReset]
            .into_iter()
            .filter_map(|kind| self.cancel(kind))
            .collect()
    }

    #[must_use]
    pub const fn is_armed(&self, kind: TimerKind) -> bool {
        match kind {
            TimerKind::Countdown => self.countdown.is_some(),
            TimerKind::AutoReset => self.auto_reset.is_some(),
        }
    }

    /// Accept a firing
    ///
    /// Returns `true` and disarms the slot if `token` is the pending arming;
    /// returns `false` for stale or cancelled tokens.
    pub fn fire(&mut self, token: TimerToken) -> bool {
        let slot = self.slot(token.kind);
        if *slot == Some(token.generation) {
            *slot = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn armed_token_fires_once() {
        let mut timers = Timers::new();
        let token = timers.arm(TimerKind::Countdown);
        assert!(timers.is_armed(TimerKind::Countdown));
        assert!(timers.fire(token));
        assert!(!timers.fire(token));
        assert!(!timers.is_armed(TimerKind::Countdown));
    }

    #[test]
    fn cancelled_token_is_stale() {
        let mut timers = Timers::new();
        let token = timers.arm(TimerKind::AutoReset);
        assert_eq!(timers.cancel(TimerKind::AutoReset), Some(token));
        assert!(!timers.fire(token));
    }

    #[test]
    fn rearming_supersedes_previous() {
        let mut timers = Timers::new();
        let first = timers.arm(TimerKind::Countdown);
        let second = timers.arm(TimerKind::Countdown);
        assert_ne!(first, second);
        assert!(!timers.fire(first));
        assert!(timers.fire(second));
    }

    #[test]
    fn kinds_are_independent() {
        let mut timers = Timers::new();
        let countdown = timers.arm(TimerKind::Countdown);
        let reset = timers.arm(TimerKind::AutoReset);
        timers.cancel(TimerKind::Countdown);
        assert!(!timers.fire(countdown));
        assert!(timers.fire(reset));
    }

    #[test]
    fn cancel_all_returns_pending() {
        let mut timers = Timers::new();
        timers.arm(TimerKind::Countdown);
        timers.arm(TimerKind::AutoReset);
        assert_eq!(timers.cancel_all().len(), 2);
        assert!(timers.cancel_all().is_empty());
    }
}
