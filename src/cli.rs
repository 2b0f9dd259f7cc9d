use crate::debug_log;
use crate::game_state::{Board, GameInterface, UserAction};
use crate::render::render;
use crate::results::{DEFAULT_RESULTS_FILE, MatchResult, Outcome};
use crate::round::{Guess, GuessOutcome};
use crate::tracker::Letter;
use clap::Parser;
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

pub const DEFAULT_TUI_LOG_FILE: &str = "hangman.log";

/// Hangman in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list (defaults to the built-in list)
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<String>,

    /// File that match results are appended to
    #[arg(short = 'o', long = "output", default_value = DEFAULT_RESULTS_FILE)]
    pub results_path: String,

    /// Seed for the word draw (defaults to the current time)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Use the full-screen interface
    #[arg(long)]
    pub tui: bool,

    /// Skip the dramatic pauses
    #[arg(long = "no-pause")]
    pub no_pause: bool,

    /// Write log records to this file instead of stderr
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Where log records go. The full-screen interface owns the terminal, so
    /// it logs to `DEFAULT_TUI_LOG_FILE` unless `--log-file` says otherwise.
    #[must_use]
    pub fn log_path(&self) -> Option<PathBuf> {
        match &self.log_file {
            Some(path) => Some(path.clone()),
            None if self.tui => Some(PathBuf::from(DEFAULT_TUI_LOG_FILE)),
            None => None,
        }
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

enum ActionChoice {
    Letter,
    Word,
    Exit,
}

fn parse_action_choice(input: &str) -> Option<ActionChoice> {
    if input.eq_ignore_ascii_case("exit") {
        return Some(ActionChoice::Exit);
    }
    match input.chars().next().map(|c| c.to_ascii_uppercase()) {
        Some('L') => Some(ActionChoice::Letter),
        Some('W') => Some(ActionChoice::Word),
        _ => None,
    }
}

fn parse_yes_no(input: &str) -> Option<bool> {
    match input.chars().next().map(|c| c.to_ascii_uppercase()) {
        Some('Y') => Some(true),
        Some('N') => Some(false),
        _ => None,
    }
}

fn prompt(text: &str) {
    print!("{text}");
    let _ = io::stdout().flush();
}

fn clear_screen() {
    if let Err(e) = execute!(io::stdout(), Clear(ClearType::All), cursor::MoveTo(0, 0)) {
        debug_log!("clear_screen() - {}", e);
    }
}

pub fn guess_outcome_message(outcome: GuessOutcome) -> Option<&'static str> {
    match outcome {
        GuessOutcome::Repeated => Some("Letter already used!"),
        GuessOutcome::Missed => Some("Wrong letter!"),
        GuessOutcome::WordMissed => Some("Wrong word!"),
        GuessOutcome::Revealed(_) | GuessOutcome::WordMatched => None,
    }
}

pub fn final_message(result: &MatchResult) -> String {
    match result.outcome {
        Outcome::Win => format!("Congratulations, {}! You nailed it.", result.player),
        Outcome::Loss => format!(
            "Sorry, {}! You were hanged, end of the line.",
            result.player
        ),
    }
}

/// Line-oriented implementation of `GameInterface` over any `BufRead`.
pub struct CliInterface<R: BufRead> {
    reader: R,
    clear_screen: bool,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            clear_screen: true,
        }
    }

    #[must_use]
    pub fn without_clearing(mut self) -> Self {
        self.clear_screen = false;
        self
    }

    /// Next trimmed line, or `None` once input is closed.
    fn read_input(&mut self) -> Option<String> {
        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) => None,
            Ok(_) => Some(input.trim().to_string()),
            Err(e) => {
                debug_log!("read_input() - {}", e);
                None
            }
        }
    }

    fn clear(&self) {
        if self.clear_screen {
            clear_screen();
        }
    }

    fn read_letter(&mut self) -> Option<Letter> {
        loop {
            prompt("Enter a valid letter: ");
            let input = self.read_input()?;
            if let Some(letter) = input.chars().next().and_then(|c| Letter::try_from(c).ok()) {
                return Some(letter);
            }
        }
    }

    fn read_word(&mut self) -> Option<String> {
        loop {
            prompt("Enter a word: ");
            let input = self.read_input()?;
            if !input.is_empty() {
                return Some(input);
            }
        }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn read_player_name(&mut self) -> Option<String> {
        loop {
            prompt("\nBefore we start, enter your name (a nickname is fine): ");
            let name = self.read_input()?;
            if !name.is_empty() {
                return Some(name);
            }
        }
    }

    fn display_round_intro(&mut self, player: &str, _board: &Board<'_>) {
        self.clear();
        println!("Good luck, {player}!\nHere we go ...\n");
    }

    fn display_countdown(&mut self, remaining: u32) {
        println!("{remaining} ...");
    }

    fn display_board(&mut self, board: &Board<'_>) {
        self.clear();
        print!("{}", render(board.lives, board.word, board.used));
    }

    fn read_action(&mut self) -> UserAction {
        let choice = loop {
            prompt("Guess a letter or try the whole word (L/W): ");
            let Some(input) = self.read_input() else {
                return UserAction::Exit;
            };
            if let Some(choice) = parse_action_choice(&input) {
                break choice;
            }
        };
        println!();

        let guess = match choice {
            ActionChoice::Exit => return UserAction::Exit,
            ActionChoice::Letter => self.read_letter().map(Guess::Letter),
            ActionChoice::Word => self.read_word().map(Guess::Word),
        };
        guess.map_or(UserAction::Exit, UserAction::Guess)
    }

    fn display_guess_outcome(&mut self, outcome: GuessOutcome) {
        if let Some(message) = guess_outcome_message(outcome) {
            println!("\n{message}");
        }
    }

    fn display_final_board(&mut self, board: &Board<'_>, result: &MatchResult) {
        self.clear();
        print!("{}", render(board.lives, board.word, board.used));
        println!("\n\n{}", final_message(result));
    }

    fn display_warning(&mut self, message: &str) {
        eprintln!("Warning: {message}");
    }

    fn read_play_again(&mut self) -> bool {
        loop {
            prompt("\nPlay again (Y/N): ");
            let Some(input) = self.read_input() else {
                return false;
            };
            if let Some(answer) = parse_yes_no(&input) {
                return answer;
            }
        }
    }

    fn display_exit_message(&mut self) {
        println!("\nGoodbye.");
    }
}
