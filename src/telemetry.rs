//! Logging setup

use tracing::metadata::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

/// Environment variable holding `EnvFilter` directives
pub const LOG_ENV: &str = "WORDLE_ROOMS_LOG";

/// Install a stderr subscriber
///
/// `verbosity` is the `-v` count and sets the default level; directives in
/// `WORDLE_ROOMS_LOG` override it. With `fullscreen` set and no `-v`, logging
/// is off so the terminal UI is not overwritten.
///
/// Calling this twice is harmless; the second subscriber is discarded.
pub fn init(verbosity: u8, fullscreen: bool) {
    let default = if fullscreen && verbosity == 0 {
        LevelFilter::OFF
    } else {
        level_from_verbosity(verbosity)
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();

    let _ = Registry::default()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .try_init();
}

#[must_use]
pub const fn level_from_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}
