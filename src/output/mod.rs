//! Terminal output formatting
//!
//! Display utilities for line mode and session replays.

pub mod display;
pub mod formatters;

pub use display::{
    print_board, print_effect, print_emoji_history, print_keyboard, print_leaderboard,
    print_notice, print_session_summary,
};
