use crate::error::HangmanError;
use std::fmt;

pub const ALPHABET_SIZE: usize = 26;
pub const PLACEHOLDER: char = '_';

/// A member of the A–Z alphabet, stored as its 0-based index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Letter(u8);

impl Letter {
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    #[must_use]
    pub fn as_char(self) -> char {
        char::from(b'A' + self.0)
    }

    /// Every letter, in alphabetical order.
    pub fn all() -> impl Iterator<Item = Letter> {
        (0..ALPHABET_SIZE as u8).map(Letter)
    }

    fn matches(self, c: char) -> bool {
        c.to_ascii_uppercase() == self.as_char()
    }
}

impl TryFrom<char> for Letter {
    type Error = HangmanError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        if c.is_ascii_alphabetic() {
            Ok(Self(c.to_ascii_uppercase() as u8 - b'A'))
        } else {
            Err(HangmanError::InvalidLetter(c))
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Letters already tried in the current round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UsedLetters {
    used: [bool; ALPHABET_SIZE],
}

impl UsedLetters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `letter` was already used. Otherwise marks it and
    /// returns `false`.
    pub fn mark_and_check(&mut self, letter: Letter) -> bool {
        let slot = &mut self.used[letter.index()];
        if *slot {
            return true;
        }
        *slot = true;
        false
    }

    #[must_use]
    pub fn is_used(&self, letter: Letter) -> bool {
        self.used[letter.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = Letter> + '_ {
        Letter::all().filter(|l| self.is_used(*l))
    }
}

/// The display word: placeholders plus the letters guessed so far.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealedWord {
    cells: Vec<char>,
}

impl RevealedWord {
    #[must_use]
    pub fn new(length: usize) -> Self {
        Self {
            cells: vec![PLACEHOLDER; length],
        }
    }

    /// Uncovers every position of `secret` holding `letter` and returns how
    /// many positions matched. Revealed cells are stored uppercase.
    pub fn reveal(&mut self, secret: &str, letter: Letter) -> usize {
        let mut count = 0;
        for (cell, c) in self.cells.iter_mut().zip(secret.chars()) {
            if letter.matches(c) {
                *cell = letter.as_char();
                count += 1;
            }
        }
        count
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn as_string(&self) -> String {
        self.cells.iter().collect()
    }
}

impl fmt::Display for RevealedWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}
