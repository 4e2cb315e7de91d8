//! Display functions for boards, rooms and session effects

use super::formatters::{create_progress_bar, format_standing, statuses_to_emoji};
use crate::core::{CellStatus, KeyStatusTracker, MAX_GUESSES};
use crate::protocol::Standing;
use crate::round::{KEYBOARD_ROWS, Key, RoundStateMachine};
use crate::session::{Effect, SessionController, SessionNotice, UiPhase};
use colored::{ColoredString, Colorize};

fn paint(text: &str, status: CellStatus) -> ColoredString {
    match status {
        CellStatus::Correct => text.black().on_green().bold(),
        CellStatus::Misplaced => text.black().on_yellow().bold(),
        CellStatus::Wrong => text.white().on_bright_black(),
        CellStatus::Default => text.bright_white(),
    }
}

/// Print the grid, submitted rows coloured by status
pub fn print_board(round: &RoundStateMachine) {
    println!();
    for row in 0..MAX_GUESSES {
        let cells = round.grid().row(row);
        let statuses = round.row_statuses(row);
        let line: Vec<String> = cells
            .iter()
            .zip(statuses)
            .map(|(cell, status)| {
                let letter = cell.map_or('·', char::from);
                paint(&format!(" {letter} "), status).to_string()
            })
            .collect();
        println!("  {}", line.join(" "));
    }
    println!();
}

/// Print the on-screen keyboard coloured by the tracked key statuses
pub fn print_keyboard(keys: &KeyStatusTracker) {
    for row in KEYBOARD_ROWS {
        let line: Vec<String> = row
            .iter()
            .map(|name| match Key::from_name(name) {
                Some(Key::Letter(letter)) => paint(name, keys.status(letter)).to_string(),
                _ => name.dimmed().to_string(),
            })
            .collect();
        println!("  {}", line.join(" "));
    }
}

/// Print submitted rows as emoji, one per line
pub fn print_emoji_history(round: &RoundStateMachine) {
    for row in 0..round.current_line() {
        println!(
            "    {}. {} {}",
            (row + 1).to_string().bright_black(),
            round.grid().row_text(row).bright_white().bold(),
            statuses_to_emoji(&round.row_statuses(row))
        );
    }
}

/// Print a leaderboard
pub fn print_leaderboard(standings: &[Standing]) {
    println!("\n{}", "═".repeat(40).cyan());
    println!(" {} ", "🏆 LEADERBOARD".bright_yellow().bold());
    println!("{}", "═".repeat(40).cyan());
    if standings.is_empty() {
        println!("  {}", "No finishers yet".dimmed());
    }
    for standing in standings {
        let line = format_standing(standing);
        if standing.rank == 0 {
            println!("  {}", line.bright_green().bold());
        } else {
            println!("  {line}");
        }
    }
    println!("{}", "═".repeat(40).cyan());
}

pub fn print_notice(notice: &SessionNotice) {
    let text = notice.to_string();
    if notice.is_error() {
        println!("{}", text.red());
    } else {
        println!("{}", text.bright_cyan());
    }
}

/// Print one controller effect on a single line
pub fn print_effect(effect: &Effect) {
    match effect {
        Effect::Send(message) => {
            let frame = message
                .encode()
                .unwrap_or_else(|e| format!("<unencodable: {e}>"));
            println!("  {} {}", "→ send".green().bold(), frame);
        }
        Effect::ArmTimer { token, after } => {
            println!(
                "  {} {:?} in {:?}",
                "⏱ arm".yellow(),
                token.kind,
                after
            );
        }
        Effect::CancelTimer(token) => {
            println!("  {} {:?}", "✕ cancel".bright_black(), token.kind);
        }
        Effect::Notify(notice) => {
            print!("  ");
            print_notice(notice);
        }
    }
}

/// Print the session's current phase with what that phase shows
pub fn print_session_summary(session: &SessionController) {
    println!("\n{}", "─".repeat(40).cyan());
    println!("Phase: {}", format!("{:?}", session.phase()).bright_yellow().bold());

    match session.phase() {
        UiPhase::WaitingRoom => {
            if let Some((joined, max)) = session.occupancy() {
                println!(
                    "Players: {joined}/{max} {}",
                    create_progress_bar(joined, max, 10)
                );
            }
        }
        UiPhase::Countdown => {
            if let Some(remaining) = session.countdown_remaining() {
                println!("🎬 Get ready to boogie! {remaining}");
            }
        }
        UiPhase::Playing => {
            if let Some(hud) = session.hud() {
                println!(
                    "🌀 Round: {} / {}   💯 Score: {}",
                    hud.round, hud.max_rounds, hud.score
                );
            }
            print_emoji_history(session.round());
        }
        UiPhase::Leaderboard => print_leaderboard(&session.leaderboard()),
        UiPhase::Terminated => {
            if let Some(reason) = session.termination() {
                println!("Ended: {reason:?}");
            }
        }
        UiPhase::Connecting => println!("Waiting for the room service..."),
    }
    println!("{}", "─".repeat(40).cyan());
}
