//! Wordle Rooms - CLI
//!
//! Single-player word guessing in the terminal, plus tooling for multiplayer
//! rooms: endpoint pre-flight and session replay.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use wordle_rooms::{
    commands::{print_create_room, print_join_room, run_replay, run_simple},
    protocol::endpoint::JoinRequest,
    session::{SessionConfig, SessionController},
    telemetry,
    wordlists::{WordList, loader::load_or_fallback},
};

const DEFAULT_SERVER: &str = "http://localhost:8080";
const DEFAULT_CHANNEL: &str = "ws://localhost:8080";

#[derive(Parser)]
#[command(
    name = "wordle_rooms",
    about = "Word-guessing rounds, alone or in a multiplayer room",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// JSON array of 5-letter words to pick targets from (built-in list if absent)
    #[arg(short = 'w', long, global = true)]
    words: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Simple line mode without TUI
    Simple,

    /// Validate room settings and print the provisioning request
    Create {
        /// Rounds per game (at least 4)
        #[arg(short, long, default_value = "4")]
        rounds: u32,

        /// Seats in the room (at least 2)
        #[arg(short, long, default_value = "2")]
        players: usize,

        /// Room service base URL
        #[arg(long, default_value = DEFAULT_SERVER)]
        server: String,
    },

    /// Validate join input and print the game channel URL
    Join {
        /// Room code (at least 6 characters)
        room: String,

        /// Player name (at least 4 characters)
        name: String,

        /// Game channel base URL
        #[arg(long, default_value = DEFAULT_CHANNEL)]
        server: String,
    },

    /// Feed a captured frame script through a session and print the effects
    Replay {
        /// Script file, one frame or directive per line ('-' for stdin)
        script: String,

        /// Room code the session joined
        #[arg(long, default_value = "REPLAY")]
        room: String,

        /// Local player name
        #[arg(long, default_value = "player")]
        name: String,

        /// Seed for target selection
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);
    telemetry::init(cli.verbose, matches!(command, Commands::Play));

    let words = load_or_fallback(cli.words.as_deref());

    match command {
        Commands::Play => run_play_command(words),
        Commands::Simple => run_simple(words),
        Commands::Create {
            rounds,
            players,
            server,
        } => print_create_room(&server, rounds, players),
        Commands::Join { room, name, server } => print_join_room(&server, &name, &room),
        Commands::Replay {
            script,
            room,
            name,
            seed,
        } => run_replay_command(&script, &room, &name, seed, words),
    }
}

fn run_play_command(words: WordList) -> Result<()> {
    use wordle_rooms::interactive::{App, run_tui};

    run_tui(App::new(words))
}

fn run_replay_command(
    script: &str,
    room: &str,
    name: &str,
    seed: Option<u64>,
    words: WordList,
) -> Result<()> {
    let config = SessionConfig::from(JoinRequest::validate(name, room)?);
    let controller = match seed {
        Some(seed) => SessionController::with_seed(config, words, seed),
        None => SessionController::new(config, words),
    };

    if script == "-" {
        run_replay(io::stdin().lock(), controller)
    } else {
        let file = File::open(script).with_context(|| format!("opening {script}"))?;
        run_replay(BufReader::new(file), controller)
    }
}
