//! Round engine: the state machine for a single match.
//!
//! A round starts `InProgress` with the full life budget. Letter guesses cost
//! one life on a miss and two on a repeat; a wrong full-word guess costs two.
//! The round is `Lost` as soon as lives reach zero or below and `Won` once the
//! revealed word spells the secret or a word guess matches it.

use crate::error::HangmanError;
use crate::results::{MatchResult, Outcome};
use crate::text::{equals_case_insensitive, trim};
use crate::tracker::{Letter, RevealedWord, UsedLetters};
use crate::{debug_log, info_log};
use chrono::{DateTime, Local};

pub const LIFE_BUDGET: i32 = 7;
const MISS_PENALTY: i32 = 1;
const REPEAT_PENALTY: i32 = 2;
const WRONG_WORD_PENALTY: i32 = 2;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    name: String,
    lives: i32,
}

impl Player {
    /// Builds a player from raw input; the name is trimmed and must not be empty.
    pub fn new(name: &str) -> Result<Self, HangmanError> {
        let name = trim(name);
        if name.is_empty() {
            return Err(HangmanError::EmptyName);
        }
        Ok(Self {
            name: name.to_string(),
            lives: LIFE_BUDGET,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundState {
    InProgress,
    Won,
    Lost,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Guess {
    Letter(Letter),
    Word(String),
}

/// What a single guess did to the round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuessOutcome {
    Revealed(usize),
    Missed,
    Repeated,
    WordMatched,
    WordMissed,
}

#[derive(Debug)]
pub struct Round {
    player: Player,
    secret: String,
    revealed: RevealedWord,
    used: UsedLetters,
    state: RoundState,
}

impl Round {
    /// Starts a round with the standard life budget.
    pub fn start(player: Player, secret: impl Into<String>) -> Self {
        Self::with_lives(player, secret, LIFE_BUDGET)
    }

    fn with_lives(mut player: Player, secret: impl Into<String>, lives: i32) -> Self {
        let secret = secret.into();
        player.lives = lives;
        info_log!(
            "Round started for '{}' with a {}-letter word",
            player.name(),
            secret.chars().count()
        );
        let mut round = Self {
            player,
            revealed: RevealedWord::new(secret.chars().count()),
            secret,
            used: UsedLetters::new(),
            state: RoundState::InProgress,
        };
        round.settle();
        round
    }

    pub fn apply(&mut self, guess: &Guess) -> Result<GuessOutcome, HangmanError> {
        match guess {
            Guess::Letter(letter) => self.guess_letter(*letter),
            Guess::Word(word) => self.guess_word(word),
        }
    }

    pub fn guess_letter(&mut self, letter: Letter) -> Result<GuessOutcome, HangmanError> {
        self.ensure_in_progress()?;
        let outcome = if self.used.mark_and_check(letter) {
            self.player.lives -= REPEAT_PENALTY;
            GuessOutcome::Repeated
        } else {
            match self.revealed.reveal(&self.secret, letter) {
                0 => {
                    self.player.lives -= MISS_PENALTY;
                    GuessOutcome::Missed
                }
                n => GuessOutcome::Revealed(n),
            }
        };
        debug_log!(
            "Letter {} -> {:?}, lives now {}",
            letter,
            outcome,
            self.player.lives
        );
        self.settle();
        Ok(outcome)
    }

    pub fn guess_word(&mut self, word: &str) -> Result<GuessOutcome, HangmanError> {
        self.ensure_in_progress()?;
        let word = trim(word);
        if word.is_empty() {
            return Err(HangmanError::EmptyGuess);
        }
        if equals_case_insensitive(word, &self.secret) {
            self.state = RoundState::Won;
            info_log!("Word guess matched, round won");
            return Ok(GuessOutcome::WordMatched);
        }
        self.player.lives -= WRONG_WORD_PENALTY;
        debug_log!("Word guess missed, lives now {}", self.player.lives);
        self.settle();
        Ok(GuessOutcome::WordMissed)
    }

    fn ensure_in_progress(&self) -> Result<(), HangmanError> {
        if self.is_over() {
            Err(HangmanError::RoundFinished)
        } else {
            Ok(())
        }
    }

    fn settle(&mut self) {
        if self.player.lives <= 0 {
            self.state = RoundState::Lost;
        } else if equals_case_insensitive(&self.revealed.as_string(), &self.secret) {
            self.state = RoundState::Won;
        }
    }

    #[must_use]
    pub fn state(&self) -> RoundState {
        self.state
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state != RoundState::InProgress
    }

    #[must_use]
    pub fn lives(&self) -> i32 {
        self.player.lives
    }

    #[must_use]
    pub fn player(&self) -> &Player {
        &self.player
    }

    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }

    #[must_use]
    pub fn revealed(&self) -> &RevealedWord {
        &self.revealed
    }

    #[must_use]
    pub fn used(&self) -> &UsedLetters {
        &self.used
    }

    /// Record for the results log. Win iff lives remain.
    #[must_use]
    pub fn result(&self, timestamp: DateTime<Local>) -> MatchResult {
        let outcome = if self.player.lives > 0 {
            Outcome::Win
        } else {
            Outcome::Loss
        };
        MatchResult::new(timestamp, self.player.name(), &self.secret, outcome)
    }

    /// Ends the round and hands the player back.
    #[must_use]
    pub fn into_player(self) -> Player {
        self.player
    }
}
