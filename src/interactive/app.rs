//! TUI application state and logic

use crate::round::Key;
use crate::round::solo::SoloGame;
use crate::wordlists::WordList;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;

/// Application state
#[derive(Debug)]
pub struct App {
    pub game: SoloGame,
    pub messages: Vec<Message>,
    pub should_quit: bool,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

impl App {
    #[must_use]
    pub fn new(words: WordList) -> Self {
        Self::with_game(SoloGame::new(words))
    }

    #[must_use]
    pub fn with_game(game: SoloGame) -> Self {
        Self {
            game,
            messages: vec![Message {
                text: "Guess the 5-letter word in 6 tries. Type letters, Enter to submit."
                    .to_string(),
                style: MessageStyle::Info,
            }],
            should_quit: false,
        }
    }

    /// Handle one terminal key event
    pub fn on_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        if key.code == KeyCode::Esc {
            self.should_quit = true;
            return;
        }

        if self.game.finished().is_some() {
            match key.code {
                KeyCode::Char('q' | 'Q') => self.should_quit = true,
                KeyCode::Char('n' | 'N') | KeyCode::Enter => self.new_game(),
                _ => {}
            }
            return;
        }

        let round_key = match key.code {
            KeyCode::Char(c) => Key::from_char(c),
            KeyCode::Backspace => Some(Key::Backspace),
            KeyCode::Enter => Some(Key::Enter),
            _ => None,
        };
        let Some(round_key) = round_key else {
            return;
        };

        let line = self.game.round().current_line();
        let changed = self.game.press(round_key);
        if round_key == Key::Enter && !changed && line == self.game.round().current_line() {
            self.add_message("Not enough letters", MessageStyle::Error);
        }

        if let Some(finished) = self.game.finished() {
            let (text, style) = if finished.outcome.is_win() {
                (
                    format!(
                        "🎉 You guessed it! +{} points. Press 'n' for new game or 'q' to quit.",
                        finished.outcome.points
                    ),
                    MessageStyle::Success,
                )
            } else {
                (
                    format!(
                        "😅 Oops! The word was {}. Press 'n' for new game or 'q' to quit.",
                        finished.word
                    ),
                    MessageStyle::Error,
                )
            };
            self.add_message(&text, style);
        }
    }

    pub fn new_game(&mut self) {
        self.game.new_game();
        self.messages.clear();
        self.add_message("New game started!", MessageStyle::Info);
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > 5 {
            self.messages.remove(0);
        }
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            // Only process key press events (fixes Windows double-input bug)
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.on_key(key);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
