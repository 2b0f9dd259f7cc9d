use crate::error::HangmanError;
use crate::text::trim;
use rand::Rng;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

pub const EMBEDDED_WORDS: &str = include_str!("resources/palavras.txt");

/// Where secret words come from. Entries are trimmed lines; blank lines are
/// skipped and do not count.
#[derive(Debug, Clone)]
pub enum WordSource {
    File(PathBuf),
    Inline(String),
}

impl WordSource {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }

    pub fn from_text(data: &str) -> Self {
        Self::Inline(data.to_string())
    }

    #[must_use]
    pub fn embedded() -> Self {
        Self::from_text(EMBEDDED_WORDS)
    }

    pub fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Inline(_) => "embedded word list".to_string(),
        }
    }

    pub fn count_entries(&self) -> Result<usize, HangmanError> {
        match self {
            Self::File(path) => {
                let mut count = 0;
                for_each_file_entry(path, |_| {
                    count += 1;
                    true
                })?;
                Ok(count)
            }
            Self::Inline(data) => Ok(inline_entries(data).count()),
        }
    }

    /// Draws an index uniformly from `[0, entry_count)` and returns that entry.
    pub fn pick_word<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        entry_count: usize,
    ) -> Result<String, HangmanError> {
        if entry_count == 0 {
            return Err(HangmanError::source_unavailable(format!(
                "{} has no words",
                self.describe()
            )));
        }
        let index = rng.gen_range(0..entry_count);
        self.entry_at(index)?.ok_or_else(|| {
            HangmanError::source_unavailable(format!(
                "{} has fewer than {} words",
                self.describe(),
                index + 1
            ))
        })
    }

    fn entry_at(&self, index: usize) -> Result<Option<String>, HangmanError> {
        match self {
            Self::File(path) => {
                let mut seen = 0;
                let mut found = None;
                for_each_file_entry(path, |entry| {
                    if seen == index {
                        found = Some(entry.to_string());
                        return false;
                    }
                    seen += 1;
                    true
                })?;
                Ok(found)
            }
            Self::Inline(data) => Ok(inline_entries(data).nth(index).map(str::to_string)),
        }
    }
}

fn inline_entries(data: &str) -> impl Iterator<Item = &str> {
    data.lines().map(trim).filter(|entry| !entry.is_empty())
}

/// Feeds every non-blank trimmed line to `visit` until it returns `false`.
fn for_each_file_entry<F>(path: &Path, mut visit: F) -> Result<(), HangmanError>
where
    F: FnMut(&str) -> bool,
{
    let unavailable = |e: std::io::Error| {
        HangmanError::source_unavailable(format!("cannot read '{}': {e}", path.display()))
    };
    let file = File::open(path).map_err(unavailable)?;
    let reader = BufReader::new(file);
    for line in reader.lines() {
        let line = line.map_err(unavailable)?;
        let entry = trim(&line);
        if entry.is_empty() {
            continue;
        }
        if !visit(entry) {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::fs;

    #[test]
    fn test_count_entries_inline_skips_blank_lines() {
        let source = WordSource::from_text("gato\n\n  casa  \nsol\n   \n");
        assert_eq!(source.count_entries().unwrap(), 3);
    }

    #[test]
    fn test_embedded_list_is_usable() {
        let source = WordSource::embedded();
        let count = source.count_entries().unwrap();
        assert!(count > 0);
        let mut rng = StdRng::seed_from_u64(7);
        let word = source.pick_word(&mut rng, count).unwrap();
        assert!(!word.is_empty());
        assert!(word.chars().all(|c| c.is_ascii_alphabetic()));
    }

    #[test]
    fn test_pick_word_trims_entry() {
        let source = WordSource::from_text("  abacaxi \r\n");
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(source.pick_word(&mut rng, 1).unwrap(), "abacaxi");
    }

    #[test]
    fn test_pick_word_zero_entries_fails() {
        let source = WordSource::from_text("");
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            source.pick_word(&mut rng, 0),
            Err(HangmanError::SourceUnavailable { .. })
        ));
    }

    #[test]
    fn test_pick_word_overstated_count_fails_when_index_missing() {
        let source = WordSource::from_text("gato\n");
        let mut rng = StdRng::seed_from_u64(3);
        // Any draw above 0 lands past the single entry.
        let outcomes: Vec<_> = (0..20).map(|_| source.pick_word(&mut rng, 50)).collect();
        assert!(
            outcomes
                .iter()
                .any(|r| matches!(r, Err(HangmanError::SourceUnavailable { .. })))
        );
        assert!(outcomes.iter().flatten().all(|w| w == "gato"));
    }

    #[test]
    fn test_pick_word_is_deterministic_for_seed() {
        let source = WordSource::from_text("gato\ncasa\nsol\nlua\nmar\n");
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..10 {
            assert_eq!(
                source.pick_word(&mut a, 5).unwrap(),
                source.pick_word(&mut b, 5).unwrap()
            );
        }
    }

    #[test]
    fn test_pick_word_covers_every_entry() {
        let source = WordSource::from_text("gato\ncasa\nsol\n");
        let mut rng = StdRng::seed_from_u64(9);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(source.pick_word(&mut rng, 3).unwrap());
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_file_source_counts_and_picks() {
        let path = std::env::temp_dir().join("hangman_wordbank_file_source.txt");
        fs::write(&path, "gato\ncasa\n\nsol\n").unwrap();

        let source = WordSource::from_file(&path);
        assert_eq!(source.count_entries().unwrap(), 3);
        let mut rng = StdRng::seed_from_u64(5);
        let word = source.pick_word(&mut rng, 3).unwrap();
        assert!(["gato", "casa", "sol"].contains(&word.as_str()));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_is_source_unavailable() {
        let path = std::env::temp_dir().join("hangman_wordbank_does_not_exist.txt");
        let _ = fs::remove_file(&path);
        let source = WordSource::from_file(&path);
        assert!(matches!(
            source.count_entries(),
            Err(HangmanError::SourceUnavailable { .. })
        ));
    }
}
