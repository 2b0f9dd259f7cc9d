use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HangmanError {
    #[error("word list unavailable: {reason}")]
    SourceUnavailable { reason: String },

    #[error("results log '{}' unavailable: {source}", .path.display())]
    LogUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("'{0}' is not a letter")]
    InvalidLetter(char),

    #[error("player name must not be empty")]
    EmptyName,

    #[error("word guess must not be empty")]
    EmptyGuess,

    #[error("the round is already over")]
    RoundFinished,

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

impl HangmanError {
    pub fn source_unavailable(reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            reason: reason.into(),
        }
    }
}
