use crate::error::HangmanError;
use crate::info_log;
use chrono::{DateTime, Local};
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const DEFAULT_RESULTS_FILE: &str = "resultados.txt";
const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Win => write!(f, "Vitoria"),
            Self::Loss => write!(f, "Derrota"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchResult {
    pub timestamp: DateTime<Local>,
    pub player: String,
    pub secret: String,
    pub outcome: Outcome,
}

impl MatchResult {
    pub fn new(timestamp: DateTime<Local>, player: &str, secret: &str, outcome: Outcome) -> Self {
        Self {
            timestamp,
            player: player.to_string(),
            secret: secret.to_string(),
            outcome,
        }
    }

    /// `[DD/MM/YYYY HH:MM]\t<player>\t<secret>\t<outcome>`, without newline.
    #[must_use]
    pub fn to_line(&self) -> String {
        format!(
            "[{}]\t{}\t{}\t{}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.player,
            self.secret,
            self.outcome
        )
    }
}

/// Append-only results file. Opened and closed on every write.
#[derive(Clone, Debug)]
pub struct ResultLog {
    path: PathBuf,
}

impl ResultLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, result: &MatchResult) -> Result<(), HangmanError> {
        let unavailable = |source| HangmanError::LogUnavailable {
            path: self.path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(unavailable)?;
        writeln!(file, "{}", result.to_line()).map_err(unavailable)?;
        info_log!("Recorded {} for '{}'", result.outcome, result.player);
        Ok(())
    }
}
