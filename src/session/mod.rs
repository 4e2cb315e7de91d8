//! Multiplayer session orchestration
//!
//! [`SessionController`] mirrors the room snapshot pushed by the server, runs
//! the pre-game countdown, feeds rounds to a [`RoundStateMachine`] and reports
//! each finished round back to the room. It performs no I/O: every input is a
//! [`SessionEvent`] and every output is an [`Effect`] for the caller to carry
//! out. [`driver`] wires it to tokio channels and timers.

pub mod driver;
mod timer;

pub use timer::{TimerKind, TimerToken, Timers};

use crate::core::{ScoreOutcome, Word};
use crate::protocol::endpoint::JoinRequest;
use crate::protocol::{InboundMessage, OutboundMessage, Player, RoomSnapshot, Standing};
use crate::round::{Key, RoundObserver, RoundStateMachine};
use crate::wordlists::WordList;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, trace, warn};

/// Session settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub room_id: String,
    pub player_name: String,
    /// Countdown length in ticks
    pub countdown_ticks: u32,
    pub tick_interval: Duration,
    /// Delay between a round finishing and the local board resetting
    pub auto_reset_delay: Duration,
}

impl SessionConfig {
    pub const DEFAULT_COUNTDOWN_TICKS: u32 = 5;
    pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);
    pub const DEFAULT_AUTO_RESET_DELAY: Duration = Duration::from_secs(3);

    #[must_use]
    pub fn new(room_id: impl Into<String>, player_name: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into(),
            player_name: player_name.into(),
            countdown_ticks: Self::DEFAULT_COUNTDOWN_TICKS,
            tick_interval: Self::DEFAULT_TICK_INTERVAL,
            auto_reset_delay: Self::DEFAULT_AUTO_RESET_DELAY,
        }
    }

    #[must_use]
    pub const fn with_countdown_ticks(mut self, ticks: u32) -> Self {
        self.countdown_ticks = ticks;
        self
    }

    #[must_use]
    pub const fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    #[must_use]
    pub const fn with_auto_reset_delay(mut self, delay: Duration) -> Self {
        self.auto_reset_delay = delay;
        self
    }
}

impl From<JoinRequest> for SessionConfig {
    fn from(request: JoinRequest) -> Self {
        Self::new(request.room_id, request.player_name)
    }
}

/// What the local client is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiPhase {
    #[default]
    Connecting,
    WaitingRoom,
    Countdown,
    Playing,
    Leaderboard,
    Terminated,
}

impl UiPhase {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Terminated)
    }
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// Server answered the join with `ERROR`
    JoinRejected,
    /// Server answered `GAME_IN_PROGRESS`
    AlreadyStarted,
    /// Server answered `GAME_OVER`
    RoomClosed,
    ConnectionFailed,
    /// Local teardown
    Shutdown,
}

/// A user-facing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionNotice {
    PlayerJoined(String),
    PlayerAdvanced(String),
    /// The server moved the local player on after a score update
    ScoreUpdated,
    PlayerLeft(String),
    GameCompleted,
    RoundWon { word: String, points: u32 },
    RoundLost { word: String },
    Terminated(TerminationReason),
}

impl SessionNotice {
    /// Errors are shown differently from plain notices
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::RoundLost { .. } | Self::Terminated(_))
    }
}

impl fmt::Display for SessionNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlayerJoined(name) => write!(f, "🎉 {name} just slid into the game!"),
            Self::PlayerAdvanced(name) => write!(f, "🚀 {name} is zooming to the next round!"),
            Self::ScoreUpdated => write!(f, "💃 Woohoo! You're groovin' into the next round!"),
            Self::PlayerLeft(name) => write!(f, "👋 {name} moon-walked out of the game."),
            Self::GameCompleted => write!(f, "🎊 Game over! Time to count those funky points!"),
            Self::RoundWon { word, points } => {
                write!(f, "🎯 You guessed {word}! +{points} points")
            }
            Self::RoundLost { word } => write!(
                f,
                "🎉 Oops! Guess was: {word} Zero points... better luck next round! 😅"
            ),
            Self::Terminated(reason) => match reason {
                TerminationReason::JoinRejected => write!(
                    f,
                    "😵 Oops! Couldn't join this jam session. Try a different room?"
                ),
                TerminationReason::AlreadyStarted => write!(
                    f,
                    "🚫 Game's already rollin', no late entries! Catch the next round 😎"
                ),
                TerminationReason::RoomClosed => write!(
                    f,
                    "🎮 Game over, man! This room's seen its final word. Time to start fresh!"
                ),
                TerminationReason::ConnectionFailed => write!(f, "Network error. Redirecting..."),
                TerminationReason::Shutdown => write!(f, "Left the room."),
            },
        }
    }
}

/// Work the caller must carry out on the controller's behalf
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Send(OutboundMessage),
    /// Deliver `TimerFired(token)` after `after`
    ArmTimer { token: TimerToken, after: Duration },
    /// A previously armed token will be ignored; the caller may drop its sleep
    CancelTimer(TimerToken),
    Notify(SessionNotice),
}

/// Everything that can happen to a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Transport connected (or reconnected)
    Opened,
    /// Transport dropped; reconnection is the transport's business
    Closed,
    /// Transport gave up
    ConnectionFailed,
    Frame(InboundMessage),
    Key(Key),
    TimerFired(TimerToken),
}

/// Local player's progress as shown above the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub round: u32,
    pub max_rounds: u32,
    pub score: u32,
}

/// Captures the completion reported by the round
#[derive(Default)]
struct Completion(Option<(ScoreOutcome, Word)>);

impl RoundObserver for Completion {
    fn on_round_completed(&mut self, outcome: ScoreOutcome, word: &Word) {
        self.0 = Some((outcome, word.clone()));
    }
}

/// Client-side state machine for one multiplayer room
///
/// # Examples
/// ```
/// use wordle_rooms::session::{SessionConfig, SessionController, SessionEvent, UiPhase};
/// use wordle_rooms::wordlists::WordList;
///
/// let mut session = SessionController::new(SessionConfig::new("ROOM42", "alice"), WordList::fallback());
/// assert_eq!(session.phase(), UiPhase::Connecting);
/// session.handle(SessionEvent::Opened);
/// assert_eq!(session.phase(), UiPhase::WaitingRoom);
/// ```
#[derive(Debug)]
pub struct SessionController {
    config: SessionConfig,
    words: WordList,
    rng: StdRng,
    snapshot: Option<RoomSnapshot>,
    local_player_id: Option<String>,
    countdown_remaining: Option<u32>,
    started: bool,
    connected: bool,
    phase: UiPhase,
    termination: Option<TerminationReason>,
    round: RoundStateMachine,
    timers: Timers,
}

impl SessionController {
    #[must_use]
    pub fn new(config: SessionConfig, words: WordList) -> Self {
        Self::with_rng(config, words, StdRng::from_os_rng())
    }

    /// Deterministic target selection
    #[must_use]
    pub fn with_seed(config: SessionConfig, words: WordList, seed: u64) -> Self {
        Self::with_rng(config, words, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: SessionConfig, words: WordList, rng: StdRng) -> Self {
        Self {
            config,
            words,
            rng,
            snapshot: None,
            local_player_id: None,
            countdown_remaining: None,
            started: false,
            connected: false,
            phase: UiPhase::Connecting,
            termination: None,
            round: RoundStateMachine::awaiting_target(),
            timers: Timers::new(),
        }
    }

    /// Apply one event
    ///
    /// A terminated session ignores everything.
    pub fn handle(&mut self, event: SessionEvent) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.phase.is_terminal() {
            trace!(?event, "session terminated, event ignored");
            return effects;
        }

        match event {
            SessionEvent::Opened => {
                self.connected = true;
                self.leave_connecting();
                self.update_countdown(&mut effects);
            }
            SessionEvent::Closed => self.on_closed(&mut effects),
            SessionEvent::ConnectionFailed => {
                self.terminate(TerminationReason::ConnectionFailed, &mut effects);
            }
            SessionEvent::Frame(message) => self.on_message(message, &mut effects),
            SessionEvent::Key(key) => self.on_key(key, &mut effects),
            SessionEvent::TimerFired(token) => self.on_timer(token, &mut effects),
        }

        effects
    }

    /// Decode and apply a raw frame
    ///
    /// Frames that fail to decode are logged and dropped; the current
    /// snapshot stays in place.
    pub fn receive_frame(&mut self, frame: &str) -> Vec<Effect> {
        match InboundMessage::decode(frame) {
            Ok(message) => self.handle(SessionEvent::Frame(message)),
            Err(err) => {
                warn!(error = %err, "dropping inbound frame");
                Vec::new()
            }
        }
    }

    /// Tear the session down, cancelling every pending timer
    pub fn shutdown(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if !self.phase.is_terminal() {
            self.cancel_all_timers(&mut effects);
            self.termination = Some(TerminationReason::Shutdown);
            self.set_phase(UiPhase::Terminated);
        }
        effects
    }

    fn set_phase(&mut self, phase: UiPhase) {
        if self.phase != phase {
            info!(from = ?self.phase, to = ?phase, "session phase");
            self.phase = phase;
        }
    }

    fn leave_connecting(&mut self) {
        if self.phase == UiPhase::Connecting {
            self.set_phase(if self.started {
                UiPhase::Playing
            } else {
                UiPhase::WaitingRoom
            });
        }
    }

    fn on_closed(&mut self, effects: &mut Vec<Effect>) {
        self.connected = false;
        if matches!(self.phase, UiPhase::WaitingRoom | UiPhase::Countdown) {
            self.stop_countdown(effects);
            self.set_phase(UiPhase::Connecting);
        }
    }

    fn on_message(&mut self, message: InboundMessage, effects: &mut Vec<Effect>) {
        debug!(kind = message.kind(), "inbound frame");
        // A frame can only arrive over an open connection.
        if !self.connected {
            self.connected = true;
            self.leave_connecting();
        }

        match message {
            InboundMessage::PlayerSet { player_id, game } => {
                info!(player_id = %player_id, "identity assigned");
                self.local_player_id = Some(player_id);
                self.adopt(game, effects);
            }
            InboundMessage::PlayerJoined { name, game } => {
                self.adopt(game, effects);
                effects.push(Effect::Notify(SessionNotice::PlayerJoined(name)));
            }
            InboundMessage::PlayerMovedForward { name, game } => {
                self.adopt(game, effects);
                effects.push(Effect::Notify(SessionNotice::PlayerAdvanced(name)));
            }
            InboundMessage::ScoreUpdated { game } => {
                effects.push(Effect::Notify(SessionNotice::ScoreUpdated));
                let completed = self
                    .local_player_id
                    .as_deref()
                    .is_some_and(|id| game.has_completed(id));
                self.adopt(game, effects);
                if completed {
                    self.enter_leaderboard(effects);
                }
            }
            InboundMessage::PlayerLeft { name, game } => {
                if let Some(game) = game {
                    self.adopt(game, effects);
                }
                effects.push(Effect::Notify(SessionNotice::PlayerLeft(name)));
            }
            InboundMessage::GameCompleted { game } => {
                effects.push(Effect::Notify(SessionNotice::GameCompleted));
                self.adopt(game, effects);
                self.enter_leaderboard(effects);
            }
            InboundMessage::Error => self.terminate(TerminationReason::JoinRejected, effects),
            InboundMessage::GameInProgress => {
                self.terminate(TerminationReason::AlreadyStarted, effects);
            }
            InboundMessage::GameOver => self.terminate(TerminationReason::RoomClosed, effects),
            InboundMessage::Unknown(kind) => warn!(kind = %kind, "unhandled message type"),
        }
    }

    /// Replace the snapshot wholesale and react to what changed
    fn adopt(&mut self, game: RoomSnapshot, effects: &mut Vec<Effect>) {
        let previous_round = self.local_player().map(|p| p.current_round);
        self.snapshot = Some(game);
        let current_round = self.local_player().map(|p| p.current_round);

        let advanced = matches!((previous_round, current_round), (Some(before), Some(after)) if after > before);
        if advanced && self.phase == UiPhase::Playing && self.round.is_finished() {
            debug!(round = ?current_round, "server advanced the round");
            if let Some(token) = self.timers.cancel(TimerKind::AutoReset) {
                effects.push(Effect::CancelTimer(token));
            }
            self.next_round();
        }

        self.update_countdown(effects);
    }

    /// Start or abandon the countdown depending on whether the room is full
    fn update_countdown(&mut self, effects: &mut Vec<Effect>) {
        if self.started {
            return;
        }
        let full = self.snapshot.as_ref().is_some_and(RoomSnapshot::is_full);

        match self.phase {
            UiPhase::WaitingRoom if full => {
                self.set_phase(UiPhase::Countdown);
                self.countdown_remaining = Some(self.config.countdown_ticks);
                if self.config.countdown_ticks == 0 {
                    self.start_game(effects);
                } else {
                    self.arm(TimerKind::Countdown, self.config.tick_interval, effects);
                }
            }
            UiPhase::Countdown if !full => {
                debug!("room no longer full, countdown abandoned");
                self.stop_countdown(effects);
                self.set_phase(UiPhase::WaitingRoom);
            }
            _ => {}
        }
    }

    fn stop_countdown(&mut self, effects: &mut Vec<Effect>) {
        self.countdown_remaining = None;
        if let Some(token) = self.timers.cancel(TimerKind::Countdown) {
            debug!("countdown cancelled");
            effects.push(Effect::CancelTimer(token));
        }
    }

    fn on_timer(&mut self, token: TimerToken, effects: &mut Vec<Effect>) {
        if !self.timers.fire(token) {
            trace!(?token, "stale timer ignored");
            return;
        }

        match token.kind {
            TimerKind::Countdown => {
                if self.started || self.phase != UiPhase::Countdown {
                    return;
                }
                let remaining = self.countdown_remaining.unwrap_or(1).saturating_sub(1);
                self.countdown_remaining = Some(remaining);
                debug!(remaining, "countdown tick");
                if remaining == 0 {
                    self.start_game(effects);
                } else {
                    self.arm(TimerKind::Countdown, self.config.tick_interval, effects);
                }
            }
            TimerKind::AutoReset => {
                if self.phase == UiPhase::Playing && self.round.is_finished() {
                    debug!("auto-reset");
                    self.next_round();
                }
            }
        }
    }

    fn start_game(&mut self, effects: &mut Vec<Effect>) {
        if self.started {
            return;
        }
        self.started = true;
        self.countdown_remaining = None;
        info!("countdown finished, starting game");
        effects.push(Effect::Send(OutboundMessage::StartGame));
        self.set_phase(UiPhase::Playing);
        self.next_round();
    }

    fn next_round(&mut self) {
        let target = self.words.pick(&mut self.rng).clone();
        debug!(target = %target, "new round");
        self.round.reset(Some(target));
    }

    fn on_key(&mut self, key: Key, effects: &mut Vec<Effect>) {
        if self.phase != UiPhase::Playing {
            return;
        }

        let mut completion = Completion::default();
        self.round.apply(key, &mut completion);
        if let Some((outcome, word)) = completion.0 {
            self.on_round_completed(outcome, &word, effects);
        }
    }

    fn on_round_completed(&mut self, outcome: ScoreOutcome, word: &Word, effects: &mut Vec<Effect>) {
        info!(points = outcome.points, word = %word, "round finished");
        effects.push(Effect::Send(OutboundMessage::IncrementScore {
            room_id: self.config.room_id.clone(),
            player_name: self.config.player_name.clone(),
            score: outcome.points,
        }));
        let notice = if outcome.is_win() {
            SessionNotice::RoundWon {
                word: word.text().to_string(),
                points: outcome.points,
            }
        } else {
            SessionNotice::RoundLost {
                word: word.text().to_string(),
            }
        };
        effects.push(Effect::Notify(notice));
        self.arm(TimerKind::AutoReset, self.config.auto_reset_delay, effects);
    }

    fn enter_leaderboard(&mut self, effects: &mut Vec<Effect>) {
        if self.phase == UiPhase::Leaderboard {
            return;
        }
        self.cancel_all_timers(effects);
        self.countdown_remaining = None;
        self.set_phase(UiPhase::Leaderboard);
    }

    fn terminate(&mut self, reason: TerminationReason, effects: &mut Vec<Effect>) {
        warn!(?reason, "session terminated");
        self.cancel_all_timers(effects);
        self.countdown_remaining = None;
        self.termination = Some(reason);
        self.set_phase(UiPhase::Terminated);
        effects.push(Effect::Notify(SessionNotice::Terminated(reason)));
    }

    fn arm(&mut self, kind: TimerKind, after: Duration, effects: &mut Vec<Effect>) {
        let token = self.timers.arm(kind);
        trace!(?token, ?after, "timer armed");
        effects.push(Effect::ArmTimer { token, after });
    }

    fn cancel_all_timers(&mut self, effects: &mut Vec<Effect>) {
        effects.extend(self.timers.cancel_all().into_iter().map(Effect::CancelTimer));
    }

    #[must_use]
    pub const fn phase(&self) -> UiPhase {
        self.phase
    }

    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Latest room snapshot, read-only
    #[must_use]
    pub const fn snapshot(&self) -> Option<&RoomSnapshot> {
        self.snapshot.as_ref()
    }

    #[must_use]
    pub fn local_player_id(&self) -> Option<&str> {
        self.local_player_id.as_deref()
    }

    #[must_use]
    pub fn local_player(&self) -> Option<&Player> {
        let id = self.local_player_id.as_deref()?;
        self.snapshot.as_ref()?.player(id)
    }

    #[must_use]
    pub const fn countdown_remaining(&self) -> Option<u32> {
        self.countdown_remaining
    }

    /// `START_GAME` has been sent
    #[must_use]
    pub const fn has_started(&self) -> bool {
        self.started
    }

    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.connected
    }

    #[must_use]
    pub const fn termination(&self) -> Option<TerminationReason> {
        self.termination
    }

    /// The local round, read-only
    #[must_use]
    pub const fn round(&self) -> &RoundStateMachine {
        &self.round
    }

    #[must_use]
    pub const fn timers(&self) -> &Timers {
        &self.timers
    }

    /// Joined players versus seats
    #[must_use]
    pub fn occupancy(&self) -> Option<(usize, usize)> {
        self.snapshot
            .as_ref()
            .map(|s| (s.player_count(), s.max_players))
    }

    #[must_use]
    pub fn hud(&self) -> Option<Hud> {
        let player = self.local_player()?;
        Some(Hud {
            round: player.current_round,
            max_rounds: self.snapshot.as_ref()?.max_rounds,
            score: player.score,
        })
    }

    #[must_use]
    pub fn leaderboard(&self) -> Vec<Standing> {
        self.snapshot
            .as_ref()
            .map(RoomSnapshot::leaderboard)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::RoomPhase;
    use pretty_assertions::assert_eq;
    use rustc_hash::FxHashMap;

    fn snapshot(ids: &[&str], max_players: usize) -> RoomSnapshot {
        let players: FxHashMap<String, Player> = ids
            .iter()
            .map(|&id| {
                (
                    id.to_string(),
                    Player {
                        id: id.to_string(),
                        name: format!("{id}-name"),
                        score: 0,
                        current_round: 1,
                    },
                )
            })
            .collect();
        RoomSnapshot {
            max_rounds: 4,
            max_players,
            players,
            completed_players: Vec::new(),
            phase: RoomPhase::WaitingForPlayers,
        }
    }

    fn session() -> SessionController {
        let words = WordList::from_words(vec![Word::new("CRANE").unwrap()]).unwrap();
        let mut session =
            SessionController::with_seed(SessionConfig::new("ROOM42", "alice"), words, 1);
        session.handle(SessionEvent::Opened);
        session.handle(SessionEvent::Frame(InboundMessage::PlayerSet {
            player_id: "a".to_string(),
            game: snapshot(&["a"], 2),
        }));
        session
    }

    fn fill_room(session: &mut SessionController) -> Vec<Effect> {
        session.handle(SessionEvent::Frame(InboundMessage::PlayerJoined {
            name: "bobby".to_string(),
            game: snapshot(&["a", "b"], 2),
        }))
    }

    fn armed(effects: &[Effect], kind: TimerKind) -> Option<TimerToken> {
        effects.iter().find_map(|e| match e {
            Effect::ArmTimer { token, .. } if token.kind == kind => Some(*token),
            _ => None,
        })
    }

    fn run_countdown(session: &mut SessionController, mut effects: Vec<Effect>) -> Vec<Effect> {
        while let Some(token) = armed(&effects, TimerKind::Countdown) {
            effects = session.handle(SessionEvent::TimerFired(token));
        }
        effects
    }

    fn type_word(session: &mut SessionController, word: &str) -> Vec<Effect> {
        let mut effects = Vec::new();
        for c in word.chars() {
            effects.extend(session.handle(SessionEvent::Key(Key::from_char(c).unwrap())));
        }
        effects.extend(session.handle(SessionEvent::Key(Key::Enter)));
        effects
    }

    #[test]
    fn waits_until_room_is_full() {
        let session = session();
        assert_eq!(session.phase(), UiPhase::WaitingRoom);
        assert_eq!(session.local_player_id(), Some("a"));
        assert_eq!(session.occupancy(), Some((1, 2)));
        assert_eq!(session.countdown_remaining(), None);
    }

    #[test]
    fn full_room_starts_countdown() {
        let mut session = session();
        let effects = fill_room(&mut session);

        assert_eq!(session.phase(), UiPhase::Countdown);
        assert_eq!(session.countdown_remaining(), Some(5));
        assert!(armed(&effects, TimerKind::Countdown).is_some());
        assert!(effects.contains(&Effect::Notify(SessionNotice::PlayerJoined(
            "bobby".to_string()
        ))));
    }

    #[test]
    fn countdown_sends_start_once() {
        let mut session = session();
        let effects = fill_room(&mut session);
        let last = run_countdown(&mut session, effects);

        assert_eq!(session.phase(), UiPhase::Playing);
        assert!(session.has_started());
        assert_eq!(
            last.iter()
                .filter(|e| **e == Effect::Send(OutboundMessage::StartGame))
                .count(),
            1
        );
        assert_eq!(session.round().target().map(Word::text), Some("CRANE"));

        // Re-observing a full room after the start changes nothing.
        assert!(fill_room(&mut session).iter().all(|e| !matches!(e, Effect::Send(_))));
    }

    #[test]
    fn room_emptying_abandons_countdown() {
        let mut session = session();
        let effects = fill_room(&mut session);
        let token = armed(&effects, TimerKind::Countdown).unwrap();

        let effects = session.handle(SessionEvent::Frame(InboundMessage::PlayerLeft {
            name: "bobby".to_string(),
            game: Some(snapshot(&["a"], 2)),
        }));
        assert_eq!(session.phase(), UiPhase::WaitingRoom);
        assert!(effects.contains(&Effect::CancelTimer(token)));
        assert!(session.handle(SessionEvent::TimerFired(token)).is_empty());
        assert!(!session.has_started());
    }

    #[test]
    fn keys_ignored_before_playing() {
        let mut session = session();
        assert!(type_word(&mut session, "CRANE").is_empty());
        assert_eq!(session.round().current_line(), 0);
    }

    #[test]
    fn finished_round_reports_score_and_arms_reset() {
        let mut session = session();
        let effects = fill_room(&mut session);
        run_countdown(&mut session, effects);

        let effects = type_word(&mut session, "CRANE");
        assert!(effects.contains(&Effect::Send(OutboundMessage::IncrementScore {
            room_id: "ROOM42".to_string(),
            player_name: "alice".to_string(),
            score: 10,
        })));
        let reset = armed(&effects, TimerKind::AutoReset).unwrap();
        assert!(session.round().is_finished());

        session.handle(SessionEvent::TimerFired(reset));
        assert!(!session.round().is_finished());
        assert_eq!(session.round().current_line(), 0);
    }

    #[test]
    fn server_advance_resets_immediately() {
        let mut session = session();
        let effects = fill_room(&mut session);
        run_countdown(&mut session, effects);
        let effects = type_word(&mut session, "CRANE");
        let reset = armed(&effects, TimerKind::AutoReset).unwrap();

        let mut advanced = snapshot(&["a", "b"], 2);
        advanced.players.get_mut("a").unwrap().current_round = 2;
        advanced.players.get_mut("a").unwrap().score = 10;
        let effects = session.handle(SessionEvent::Frame(InboundMessage::ScoreUpdated {
            game: advanced,
        }));

        assert!(effects.contains(&Effect::CancelTimer(reset)));
        assert!(!session.round().is_finished());
        assert_eq!(
            session.hud(),
            Some(Hud {
                round: 2,
                max_rounds: 4,
                score: 10
            })
        );
    }

    #[test]
    fn completion_moves_to_leaderboard() {
        let mut session = session();
        let mut done = snapshot(&["a", "b"], 2);
        done.completed_players = vec![done.players["b"].clone(), done.players["a"].clone()];
        done.completed_players[0].score = 12;

        let effects = session.handle(SessionEvent::Frame(InboundMessage::ScoreUpdated {
            game: done,
        }));
        assert_eq!(session.phase(), UiPhase::Leaderboard);
        assert!(effects.iter().any(|e| matches!(e, Effect::CancelTimer(_))));
        let board = session.leaderboard();
        assert_eq!(board[0].name, "b-name");
        assert_eq!(board[0].medal(), "🥇");
    }

    #[test]
    fn terminal_messages_terminate() {
        for (message, reason) in [
            (InboundMessage::Error, TerminationReason::JoinRejected),
            (InboundMessage::GameInProgress, TerminationReason::AlreadyStarted),
            (InboundMessage::GameOver, TerminationReason::RoomClosed),
        ] {
            let mut session = session();
            fill_room(&mut session);
            let effects = session.handle(SessionEvent::Frame(message));
            assert_eq!(session.phase(), UiPhase::Terminated);
            assert_eq!(session.termination(), Some(reason));
            assert!(effects.iter().any(|e| matches!(e, Effect::CancelTimer(_))));
            assert!(!session.timers().is_armed(TimerKind::Countdown));
            assert!(fill_room(&mut session).is_empty());
        }
    }

    fn won_round(session: &mut SessionController) -> TimerToken {
        let effects = fill_room(session);
        run_countdown(session, effects);
        let effects = type_word(session, "CRANE");
        armed(&effects, TimerKind::AutoReset).unwrap()
    }

    #[test]
    fn terminal_message_cancels_pending_auto_reset() {
        for frame in [
            r#"{"type":"ERROR","playerID":42}"#,
            r#"{"type":"GAME_IN_PROGRESS"}"#,
            r#"{"type":"GAME_OVER","game":{"players":{}}}"#,
        ] {
            let mut session = session();
            let reset = won_round(&mut session);

            let effects = session.receive_frame(frame);
            assert_eq!(session.phase(), UiPhase::Terminated);
            assert!(effects.contains(&Effect::CancelTimer(reset)));
            assert!(!session.timers().is_armed(TimerKind::AutoReset));

            assert!(session.handle(SessionEvent::TimerFired(reset)).is_empty());
            assert!(session.round().is_finished());
        }
    }

    #[test]
    fn leaderboard_cancels_pending_auto_reset() {
        let mut session = session();
        let reset = won_round(&mut session);

        let mut done = snapshot(&["a", "b"], 2);
        done.completed_players = done.players.values().cloned().collect();
        let effects = session.handle(SessionEvent::Frame(InboundMessage::GameCompleted {
            game: done,
        }));

        assert_eq!(session.phase(), UiPhase::Leaderboard);
        assert!(effects.contains(&Effect::CancelTimer(reset)));
        assert!(session.handle(SessionEvent::TimerFired(reset)).is_empty());
        assert!(session.round().is_finished());
    }

    #[test]
    fn shutdown_while_playing_cancels_auto_reset() {
        let mut session = session();
        let reset = won_round(&mut session);

        assert_eq!(session.shutdown(), vec![Effect::CancelTimer(reset)]);
        assert!(session.handle(SessionEvent::TimerFired(reset)).is_empty());
        assert!(session.round().is_finished());
    }

    #[test]
    fn connection_failure_terminates() {
        let mut session = session();
        let effects = session.handle(SessionEvent::ConnectionFailed);
        assert_eq!(session.phase(), UiPhase::Terminated);
        assert_eq!(
            effects,
            vec![Effect::Notify(SessionNotice::Terminated(
                TerminationReason::ConnectionFailed
            ))]
        );
    }

    #[test]
    fn close_before_start_returns_to_connecting() {
        let mut session = session();
        fill_room(&mut session);
        session.handle(SessionEvent::Closed);
        assert_eq!(session.phase(), UiPhase::Connecting);
        assert!(!session.is_connected());
        assert!(!session.timers().is_armed(TimerKind::Countdown));

        let effects = session.handle(SessionEvent::Opened);
        assert_eq!(session.phase(), UiPhase::Countdown);
        assert!(armed(&effects, TimerKind::Countdown).is_some());
    }

    #[test]
    fn bad_frame_keeps_snapshot() {
        let mut session = session();
        let before = session.snapshot().cloned();
        assert!(session.receive_frame("{oops").is_empty());
        assert!(session.receive_frame(r#"{"type":"CONFETTI"}"#).is_empty());
        assert_eq!(session.snapshot().cloned(), before);
    }

    #[test]
    fn shutdown_cancels_timers() {
        let mut session = session();
        let effects = fill_room(&mut session);
        let token = armed(&effects, TimerKind::Countdown).unwrap();
        assert_eq!(session.shutdown(), vec![Effect::CancelTimer(token)]);
        assert_eq!(session.phase(), UiPhase::Terminated);
        assert!(session.shutdown().is_empty());
    }

    #[test]
    fn notice_text() {
        assert_eq!(
            SessionNotice::PlayerJoined("bobby".to_string()).to_string(),
            "🎉 bobby just slid into the game!"
        );
        assert!(SessionNotice::RoundLost {
            word: "CRANE".to_string()
        }
        .to_string()
        .contains("Guess was: CRANE"));
        assert!(SessionNotice::RoundLost {
            word: "CRANE".to_string()
        }
        .is_error());
    }
}
