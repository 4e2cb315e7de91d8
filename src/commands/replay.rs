//! Replay a captured session
//!
//! Feeds a script of inbound frames and local events through a
//! [`SessionController`] on a virtual clock and reports every effect.
//!
//! Script lines:
//! - a JSON object: an inbound frame
//! - `#open`, `#close`, `#fail`: transport events
//! - `#type WORD`: type the letters and press Enter
//! - `#key NAME`: one key (`Enter`, `Backspace`, a letter)
//! - `#tick`: advance the clock to the next pending timer and fire it
//! - `#wait`: fire timers until none are pending
//!
//! Blank lines and lines starting with `//` are skipped.

use crate::output::{print_effect, print_session_summary};
use crate::round::Key;
use crate::session::{Effect, SessionController, SessionEvent, TimerToken};
use anyhow::{Context, Result, bail};
use colored::Colorize;
use std::io::BufRead;
use std::time::Duration;

/// Guards `#wait` against a timer that keeps re-arming itself
const MAX_WAIT_FIRINGS: usize = 1_000;

/// A controller plus the timers it has armed, on a virtual clock
#[derive(Debug)]
pub struct Replay {
    controller: SessionController,
    clock: Duration,
    pending: Vec<(TimerToken, Duration)>,
}

impl Replay {
    #[must_use]
    pub const fn new(controller: SessionController) -> Self {
        Self {
            controller,
            clock: Duration::ZERO,
            pending: Vec::new(),
        }
    }

    /// Apply one script line
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown directive or a key name that does not
    /// parse.
    pub fn step(&mut self, line: &str) -> Result<Vec<Effect>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with("//") {
            return Ok(Vec::new());
        }
        if line.starts_with('{') {
            let effects = self.controller.receive_frame(line);
            return Ok(self.track(effects));
        }

        let (directive, arg) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(d, a)| (d, a.trim()));
        let effects = match directive {
            "#open" => self.controller.handle(SessionEvent::Opened),
            "#close" => self.controller.handle(SessionEvent::Closed),
            "#fail" => self.controller.handle(SessionEvent::ConnectionFailed),
            "#key" => {
                let key =
                    Key::from_name(arg).with_context(|| format!("unknown key name `{arg}`"))?;
                self.controller.handle(SessionEvent::Key(key))
            }
            "#type" => {
                let mut effects = Vec::new();
                for c in arg.chars() {
                    let key = Key::from_char(c).with_context(|| format!("not a letter: `{c}`"))?;
                    effects.extend(self.controller.handle(SessionEvent::Key(key)));
                }
                effects.extend(self.controller.handle(SessionEvent::Key(Key::Enter)));
                effects
            }
            "#tick" => self.tick(),
            "#wait" => {
                let mut effects = Vec::new();
                for _ in 0..MAX_WAIT_FIRINGS {
                    if self.pending.is_empty() {
                        break;
                    }
                    effects.extend(self.tick());
                }
                return Ok(effects);
            }
            other => bail!("unknown directive `{other}`"),
        };
        Ok(self.track(effects))
    }

    fn tick(&mut self) -> Vec<Effect> {
        let Some(index) = self
            .pending
            .iter()
            .enumerate()
            .min_by_key(|(_, (_, at))| *at)
            .map(|(i, _)| i)
        else {
            return Vec::new();
        };
        let (token, at) = self.pending.remove(index);
        self.clock = self.clock.max(at);
        let effects = self.controller.handle(SessionEvent::TimerFired(token));
        self.track(effects)
    }

    fn track(&mut self, effects: Vec<Effect>) -> Vec<Effect> {
        for effect in &effects {
            match effect {
                Effect::ArmTimer { token, after } => {
                    self.pending.retain(|(t, _)| t.kind != token.kind);
                    self.pending.push((*token, self.clock + *after));
                }
                Effect::CancelTimer(token) => self.pending.retain(|(t, _)| t != token),
                Effect::Send(_) | Effect::Notify(_) => {}
            }
        }
        effects
    }

    /// Virtual time elapsed
    #[must_use]
    pub const fn clock(&self) -> Duration {
        self.clock
    }

    #[must_use]
    pub const fn controller(&self) -> &SessionController {
        &self.controller
    }

    pub fn into_controller(self) -> SessionController {
        self.controller
    }
}

/// Run a script and print every effect and the final state
///
/// # Errors
///
/// Returns an error if the script cannot be read or has a bad line.
pub fn run_replay<R: BufRead>(reader: R, controller: SessionController) -> Result<()> {
    let mut replay = Replay::new(controller);

    for (number, line) in reader.lines().enumerate() {
        let line = line.context("reading replay script")?;
        let effects = replay
            .step(&line)
            .with_context(|| format!("line {}", number + 1))?;
        if effects.is_empty() {
            continue;
        }
        println!(
            "{} {}",
            format!("[{:>5.1}s]", replay.clock().as_secs_f64()).bright_black(),
            line.trim().bright_white()
        );
        for effect in &effects {
            print_effect(effect);
        }
    }

    print_session_summary(replay.controller());
    Ok(())
}
