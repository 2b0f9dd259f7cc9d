//! TUI (Terminal User Interface) module for Hangman
//!
//! Full-screen front end built on Ratatui, implementing `GameInterface`.
//!
//! # State Machine
//! Input states follow the game loop's requests:
//! - `EnteringName` once per session
//! - `ChoosingAction` → `EnteringLetter` | `EnteringWord` for every guess
//! - `AskingPlayAgain` after each round
//! - `Showing` while the loop is only displaying (countdown, pauses)

use crate::cli::{final_message, guess_outcome_message};
use crate::error::HangmanError;
use crate::game_state::{Board, GameInterface, UserAction};
use crate::render::{gallows, used_letters_line, word_line};
use crate::results::MatchResult;
use crate::round::{Guess, GuessOutcome, LIFE_BUDGET};
use crate::tracker::{Letter, UsedLetters};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const GALLOWS_PANEL_WIDTH: u16 = 30;
const GALLOWS_PANEL_HEIGHT: u16 = 25;
const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const MAX_INPUT_LEN: usize = 40;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const WORD_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    Showing,
    EnteringName,
    ChoosingAction,
    EnteringLetter,
    EnteringWord,
    AskingPlayAgain,
}

/// Context for rendering the UI.
struct RenderContext<'a> {
    state: TuiState,
    lives: i32,
    word: &'a str,
    used: &'a UsedLetters,
    current_input: &'a str,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    state: TuiState,
    lives: i32,
    word: String,
    used: UsedLetters,
    current_input: String,
    message: String,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, HangmanError> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal backend created");

        Ok(Self {
            terminal,
            state: TuiState::Showing,
            lives: LIFE_BUDGET,
            word: String::new(),
            used: UsedLetters::new(),
            current_input: String::new(),
            message: String::new(),
            error_message: String::new(),
            status: "Ready to start".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            state: self.state,
            lives: self.lives,
            word: &self.word,
            used: &self.used,
            current_input: &self.current_input,
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),                 // Title
                Constraint::Min(GALLOWS_PANEL_HEIGHT), // Gallows + round info
                Constraint::Length(3),                 // Status line
                Constraint::Length(3),                 // Instructions
            ])
            .split(f.area());

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(GALLOWS_PANEL_WIDTH), Constraint::Min(20)])
            .split(chunks[1]);

        Self::render_title(f, chunks[0]);
        Self::render_gallows(f, body[0], ctx.lives);
        Self::render_info(f, body[1], ctx);
        Self::render_status(f, chunks[2], ctx.status);
        Self::render_instructions(f, chunks[3], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("HANGMAN")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_gallows(f: &mut Frame, area: Rect, lives: i32) {
        let paragraph = Paragraph::new(gallows(lives)).block(
            Block::default()
                .title(format!("Lives: {}", lives.max(0)))
                .borders(Borders::ALL),
        );
        f.render_widget(paragraph, area);
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = vec![
            Line::from(vec![
                Span::styled("Used letters: ", INFO_STYLE),
                Span::raw(used_letters_line(ctx.used)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Word: ", INFO_STYLE),
                Span::styled(word_line(ctx.word), WORD_STYLE),
            ]),
            Line::from(""),
        ];

        if let Some(prompt) = Self::prompt_line(ctx.state, ctx.current_input) {
            lines.push(Line::from(vec![Span::styled(prompt, HEADER_STYLE)]));
            lines.push(Line::from(""));
        }

        if !ctx.message.is_empty() {
            for text in ctx.message.lines() {
                lines.push(Line::from(vec![Span::styled(text.to_string(), MESSAGE_STYLE)]));
            }
        }

        if !ctx.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(
                ctx.error_message.to_string(),
                ERROR_STYLE,
            )]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Round").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn prompt_line(state: TuiState, current_input: &str) -> Option<String> {
        match state {
            TuiState::Showing => None,
            TuiState::EnteringName => Some(format!("Your name: {current_input}_")),
            TuiState::ChoosingAction => Some("Guess a letter or the whole word? (L/W)".to_string()),
            TuiState::EnteringLetter => Some("Letter: _".to_string()),
            TuiState::EnteringWord => Some(format!("Word guess: {current_input}_")),
            TuiState::AskingPlayAgain => Some("Play again? (Y/N)".to_string()),
        }
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::Showing => "Please wait...",
            TuiState::EnteringName => "Type your name | ENTER: Confirm | ESC: Quit",
            TuiState::ChoosingAction => "L: Guess a letter | W: Guess the word | ESC: Quit",
            TuiState::EnteringLetter => "Press a letter | BACKSPACE: Go back | ESC: Quit",
            TuiState::EnteringWord => {
                "Type the word | ENTER: Submit | BACKSPACE: Delete (go back when empty) | ESC: Quit"
            }
            TuiState::AskingPlayAgain => "Y: Play again | N / ESC: Quit",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    /// Draws, then waits briefly for the next key press.
    fn next_key(&mut self) -> Result<Option<KeyEvent>, io::Error> {
        self.draw()?;
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => {
                if key.kind != event::KeyEventKind::Press {
                    return Ok(None);
                }
                if let KeyCode::Char(c) = key.code
                    && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
                {
                    debug_log!("next_key() - Ignoring control character: {:?}", c);
                    return Ok(None);
                }
                if Self::has_modifier_keys(&key) {
                    debug_log!("next_key() - Ignoring key with modifier: {:?}", key.modifiers);
                    return Ok(None);
                }
                Ok(Some(key))
            }
            other => {
                debug_log!("next_key() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(event::KeyModifiers::ALT)
            || key.modifiers.contains(event::KeyModifiers::CONTROL)
    }

    fn enter_state(&mut self, state: TuiState) {
        self.state = state;
        self.current_input.clear();
    }

    /// Applies a key to the free-text input. Returns `true` on ENTER.
    fn edit_input(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if self.current_input.chars().count() < MAX_INPUT_LEN => {
                self.current_input.push(c);
                false
            }
            KeyCode::Backspace => {
                self.current_input.pop();
                false
            }
            KeyCode::Enter => true,
            _ => false,
        }
    }

    fn handle_action_key(&mut self, key: KeyEvent) -> Option<UserAction> {
        self.error_message.clear();
        match (self.state, key.code) {
            (_, KeyCode::Esc) => {
                info_log!("handle_action_key() - ESC pressed, returning Exit");
                Some(UserAction::Exit)
            }
            (TuiState::ChoosingAction, KeyCode::Char('l' | 'L')) => {
                self.enter_state(TuiState::EnteringLetter);
                None
            }
            (TuiState::ChoosingAction, KeyCode::Char('w' | 'W')) => {
                self.enter_state(TuiState::EnteringWord);
                None
            }
            (TuiState::ChoosingAction, KeyCode::Char(c)) => {
                self.error_message = format!("Press L or W ('{c}' is not an option)");
                None
            }
            (TuiState::EnteringLetter, KeyCode::Char(c)) => match Letter::try_from(c) {
                Ok(letter) => Some(UserAction::Guess(Guess::Letter(letter))),
                Err(e) => {
                    self.error_message = format!("Only letters are allowed! ({e})");
                    None
                }
            },
            (TuiState::EnteringLetter, KeyCode::Backspace) => {
                self.enter_state(TuiState::ChoosingAction);
                None
            }
            (TuiState::EnteringWord, KeyCode::Backspace) if self.current_input.is_empty() => {
                self.enter_state(TuiState::ChoosingAction);
                None
            }
            (TuiState::EnteringWord, _) => {
                if !self.edit_input(key) {
                    return None;
                }
                let guess = self.current_input.trim().to_string();
                if guess.is_empty() {
                    self.error_message = "Type a word first!".to_string();
                    None
                } else {
                    Some(UserAction::Guess(Guess::Word(guess)))
                }
            }
            _ => None,
        }
    }
}

impl GameInterface for TuiInterface {
    fn read_player_name(&mut self) -> Option<String> {
        self.enter_state(TuiState::EnteringName);
        self.status = "Before we start, enter your name (a nickname is fine)".to_string();
        loop {
            let key = match self.next_key() {
                Ok(Some(key)) => key,
                Ok(None) => continue,
                Err(e) => {
                    debug_log!("read_player_name() - {}", e);
                    return None;
                }
            };
            if key.code == KeyCode::Esc {
                return None;
            }
            if self.edit_input(key) {
                let name = self.current_input.trim().to_string();
                if name.is_empty() {
                    self.error_message = "Your name cannot be empty!".to_string();
                } else {
                    self.error_message.clear();
                    self.enter_state(TuiState::Showing);
                    return Some(name);
                }
            }
        }
    }

    fn display_round_intro(&mut self, player: &str, board: &Board<'_>) {
        self.enter_state(TuiState::Showing);
        self.lives = board.lives;
        self.word = board.word.to_string();
        self.used = board.used.clone();
        self.error_message.clear();
        self.message = format!("Good luck, {player}!\nHere we go ...");
        self.status = "New round".to_string();
        self.draw_or_log();
    }

    fn display_countdown(&mut self, remaining: u32) {
        self.message.push_str(&format!("\n{remaining} ..."));
        self.draw_or_log();
    }

    fn display_board(&mut self, board: &Board<'_>) {
        self.lives = board.lives;
        self.word = board.word.to_string();
        self.used = board.used.clone();
        self.status = format!("{} lives left", board.lives.max(0));
        self.draw_or_log();
    }

    fn read_action(&mut self) -> UserAction {
        self.enter_state(TuiState::ChoosingAction);
        self.message.clear();
        loop {
            let key = match self.next_key() {
                Ok(Some(key)) => key,
                Ok(None) => continue,
                Err(e) => {
                    debug_log!("read_action() - {}", e);
                    return UserAction::Exit;
                }
            };
            if let Some(action) = self.handle_action_key(key) {
                self.enter_state(TuiState::Showing);
                info_log!("read_action() - Action received: {:?}", action);
                return action;
            }
        }
    }

    fn display_guess_outcome(&mut self, outcome: GuessOutcome) {
        self.message = match outcome {
            GuessOutcome::Revealed(n) => format!("Nice! {n} position(s) revealed."),
            GuessOutcome::WordMatched => "That's the word!".to_string(),
            _ => guess_outcome_message(outcome).unwrap_or_default().to_string(),
        };
        self.draw_or_log();
    }

    fn display_final_board(&mut self, board: &Board<'_>, result: &MatchResult) {
        self.enter_state(TuiState::Showing);
        self.lives = board.lives;
        self.word = board.word.to_string();
        self.used = board.used.clone();
        self.message = final_message(result);
        self.status = format!("Round over - the word was {}", board.word.to_uppercase());
        self.draw_or_log();
    }

    fn display_warning(&mut self, message: &str) {
        self.error_message = message.to_string();
        self.draw_or_log();
    }

    fn read_play_again(&mut self) -> bool {
        self.enter_state(TuiState::AskingPlayAgain);
        loop {
            match self.next_key() {
                Ok(Some(key)) => match key.code {
                    KeyCode::Char('y' | 'Y') => return true,
                    KeyCode::Char('n' | 'N') | KeyCode::Esc => return false,
                    _ => {}
                },
                Ok(None) => {}
                Err(e) => {
                    debug_log!("read_play_again() - {}", e);
                    return false;
                }
            }
        }
    }

    fn display_exit_message(&mut self) {
        self.enter_state(TuiState::Showing);
        self.message = "Goodbye.".to_string();
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
