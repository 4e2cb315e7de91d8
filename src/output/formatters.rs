//! Formatting utilities for terminal output

use crate::core::CellStatus;
use crate::protocol::Standing;

/// Emoji square for one cell
#[must_use]
pub const fn status_to_emoji(status: CellStatus) -> char {
    match status {
        CellStatus::Default => '⬛',
        CellStatus::Wrong => '⬜',
        CellStatus::Misplaced => '🟨',
        CellStatus::Correct => '🟩',
    }
}

/// Format a row's statuses as an emoji string
#[must_use]
pub fn statuses_to_emoji(statuses: &[CellStatus]) -> String {
    statuses.iter().copied().map(status_to_emoji).collect()
}

/// One leaderboard line: medal, name, points
#[must_use]
pub fn format_standing(standing: &Standing) -> String {
    format!(
        "{:<4}{:<20}{:>5} pts",
        standing.medal(),
        standing.name,
        standing.score
    )
}

/// `current / max` as a bar of `width` cells
#[must_use]
pub fn create_progress_bar(value: usize, max: usize, width: usize) -> String {
    let filled = if max == 0 {
        0
    } else {
        (value * width / max).min(width)
    };

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
