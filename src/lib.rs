// Library interface for hangman
// This allows integration tests to access internal modules

pub mod cli;
pub mod error;
pub mod game_state;
pub mod logging;
pub mod render;
pub mod results;
pub mod round;
pub mod text;
pub mod tracker;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use error::HangmanError;
pub use game_state::{Board, GameConfig, GameInterface, Pacing, UserAction, game_loop};
pub use results::{MatchResult, Outcome, ResultLog};
pub use round::{Guess, GuessOutcome, LIFE_BUDGET, Player, Round, RoundState};
pub use tracker::{Letter, RevealedWord, UsedLetters};
pub use wordbank::WordSource;
