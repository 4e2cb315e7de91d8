//! Interactive terminal UI for single-player games

pub mod app;
pub mod rendering;

pub use app::{App, run_tui};
