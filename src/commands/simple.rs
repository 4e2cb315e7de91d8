//! Simple interactive CLI mode
//!
//! Line-based single-player game without TUI

use crate::output::{print_board, print_emoji_history, print_keyboard};
use crate::round::solo::SoloGame;
use crate::wordlists::WordList;
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, Write};

/// Run the simple interactive CLI mode
///
/// # Errors
///
/// Returns an error if reading user input or writing the prompt fails.
pub fn run_simple(words: WordList) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                 Wordle Rooms - Line Mode                     ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("Guess the 5-letter word in 6 tries. After each guess:");
    println!("  - 🟩 the letter is in the right spot");
    println!("  - 🟨 the letter is in the word somewhere else");
    println!("  - ⬜ the letter is not in the word\n");
    println!("Commands: 'quit' to exit, 'new' for a new word\n");

    let mut game = SoloGame::new(words);

    loop {
        print_board(game.round());
        print_keyboard(game.round().key_statuses());
        println!();

        let Some(input) = get_user_input(&format!("Guess {}", game.round().current_line() + 1))?
        else {
            println!("\n👋 Thanks for playing!\n");
            return Ok(());
        };

        match input.to_lowercase().as_str() {
            "quit" | "q" | "exit" => {
                println!("\n👋 Thanks for playing!\n");
                return Ok(());
            }
            "new" | "n" => {
                game.new_game();
                println!("\n🔄 New game started!\n");
                continue;
            }
            guess => {
                if !game.guess(guess) {
                    println!("{}", "❌ Enter exactly 5 letters".red());
                    continue;
                }
            }
        }

        if let Some(finished) = game.finished().cloned() {
            print_board(game.round());
            if finished.outcome.is_win() {
                println!(
                    "{}",
                    "    🎉 🎊 ✨  Y O U   G U E S S E D   I T !  ✨ 🎊 🎉    "
                        .bright_green()
                        .bold()
                );
                println!(
                    "\n  {} points",
                    finished.outcome.points.to_string().bright_cyan().bold()
                );
            } else {
                println!(
                    "{} {}",
                    "😅 Out of guesses! The word was".red().bold(),
                    finished.word.text().bright_yellow().bold()
                );
            }

            println!("\n  Guess history:");
            print_emoji_history(game.round());

            let stats = game.stats();
            println!(
                "\n  Played {}  Won {}  Points {}",
                stats.played, stats.won, stats.points
            );

            match get_user_input("Play again? (yes/no)")?
                .unwrap_or_default()
                .to_lowercase()
                .as_str()
            {
                "yes" | "y" => {
                    game.new_game();
                    println!("\n🔄 New game started!\n");
                }
                _ => {
                    println!("\n👋 Thanks for playing!\n");
                    return Ok(());
                }
            }
        }
    }
}

/// Get user input with a prompt; `None` at end of input
fn get_user_input(prompt: &str) -> Result<Option<String>> {
    print!("{prompt}: ");
    io::stdout().flush().context("flushing prompt")?;

    let mut input = String::new();
    let read = io::stdin()
        .read_line(&mut input)
        .context("reading input")?;

    Ok((read > 0).then(|| input.trim().to_string()))
}
