//! Text rendering of the board: used letters, gallows stage and word line.
//!
//! The gallows is drawn from a fixed table of eight stages indexed by the
//! remaining lives, from fully hanged (0) to an empty gallows (7).

use crate::tracker::{Letter, UsedLetters};

pub const STAGE_COUNT: usize = 8;

const GALLOWS: [&str; STAGE_COUNT] = [
    // 0 lives: hanged
    " ___________________\n|/                  |\n|                 -----\n|                | \" \" |\n|                |  |  |\n|                | ___ |\n|                 -----\n|                   |\n|                  /|\\\n|                 / | \\\n|                /  |  \\\n|                   |\n|                   |\n|                   |\n|                   |\n|                  / \\\n|                 /   \\\n|                /     \\\n|              _/       \\_\n|\n|\n|\n|\n",
    // 1
    " ___________________\n|/                  |\n|                 -----\n|                | \" \" |\n|                |  |  |\n|                | ___ |\n|                 -----\n|                   |\n|                  /|\\\n|                 / | \\\n|                /  |  \\\n|                   |\n|                   |\n|                   |\n|                   |\n|                  /\n|                 /\n|                /\n|              _/\n|\n|\n|\n|\n",
    // 2
    " ___________________\n|/                  |\n|                 -----\n|                | \" \" |\n|                |  |  |\n|                | ___ |\n|                 -----\n|                   |\n|                  /|\\\n|                 / | \\\n|                /  |  \\\n|                   |\n|                   |\n|                   |\n|                   |\n|\n|\n|\n|\n|\n|\n|\n|\n",
    // 3
    " ___________________\n|/                  |\n|                 -----\n|                | \" \" |\n|                |  |  |\n|                | ___ |\n|                 -----\n|                   |\n|                  /|\n|                 / |\n|                /  |\n|                   |\n|                   |\n|                   |\n|                   |\n|\n|\n|\n|\n|\n|\n|\n|\n",
    // 4
    " ___________________\n|/                  |\n|                 -----\n|                | \" \" |\n|                |  |  |\n|                | ___ |\n|                 -----\n|                   |\n|                   |\n|                   |\n|                   |\n|                   |\n|                   |\n|                   |\n|                   |\n|\n|\n|\n|\n|\n|\n|\n|\n",
    // 5
    " ___________________\n|/                  |\n|                 -----\n|                | \" \" |\n|                |  |  |\n|                | ___ |\n|                 -----\n|\n|\n|\n|\n|\n|\n|\n|\n|\n|\n|\n|\n|\n|\n|\n|\n",
    // 6
    " ___________________ \n|/                  |\n|                 -----\n|                |     |\n|                |     |\n|                |     |\n|                 -----\n|\n|\n|\n|\n|\n|\n|\n|\n|\n|\n|\n|\n|\n|\n|\n|\n",
    // 7 lives: empty gallows
    " ___________________ \n|/                  |\n|\n|\n|\n|\n|\n|\n|\n|\n|\n|\n|\n|\n|\n|\n|\n|\n|\n|\n|\n|\n|\n",
];

/// Gallows stage for `lives`, clamped to `[0, 7]`.
#[must_use]
pub fn stage_index(lives: i32) -> usize {
    lives.clamp(0, STAGE_COUNT as i32 - 1) as usize
}

#[must_use]
pub fn gallows(lives: i32) -> &'static str {
    GALLOWS[stage_index(lives)]
}

/// Used letters in alphabetical order, space separated.
#[must_use]
pub fn used_letters_line(used: &UsedLetters) -> String {
    used.iter()
        .map(|l: Letter| l.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Each character of `word` uppercased and space separated.
#[must_use]
pub fn word_line(word: &str) -> String {
    word.chars()
        .flat_map(char::to_uppercase)
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Full board as printed by the line-oriented front end.
#[must_use]
pub fn render(lives: i32, word: &str, used: &UsedLetters) -> String {
    format!(
        "\n\n\tUsed letters: {}\n\n{}|\tWord: {}\n\n",
        used_letters_line(used),
        gallows(lives),
        word_line(word)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn used(letters: &str) -> UsedLetters {
        let mut used = UsedLetters::new();
        for c in letters.chars() {
            used.mark_and_check(Letter::try_from(c).unwrap());
        }
        used
    }

    #[test]
    fn test_stage_index_clamps() {
        assert_eq!(stage_index(-2), 0);
        assert_eq!(stage_index(0), 0);
        assert_eq!(stage_index(3), 3);
        assert_eq!(stage_index(7), 7);
        assert_eq!(stage_index(12), 7);
        assert_eq!(stage_index(i32::MIN), 0);
    }

    #[test]
    fn test_negative_lives_draw_the_hanged_stage() {
        assert_eq!(gallows(-2), gallows(0));
        assert_eq!(
            render(-2, "SOL", &UsedLetters::new()),
            render(0, "SOL", &UsedLetters::new())
        );
    }

    #[test]
    fn test_every_stage_is_distinct() {
        for i in 0..STAGE_COUNT {
            for j in (i + 1)..STAGE_COUNT {
                assert_ne!(GALLOWS[i], GALLOWS[j], "stages {i} and {j}");
            }
        }
    }

    #[test]
    fn test_stages_are_plain_lf_text() {
        for (i, stage) in GALLOWS.iter().enumerate() {
            assert!(!stage.contains('\r'), "stage {i} has a carriage return");
            assert!(stage.ends_with('\n'), "stage {i} is not newline terminated");
        }
    }

    #[test]
    fn test_stages_share_the_same_height() {
        let height = GALLOWS[0].lines().count();
        assert!(GALLOWS.iter().all(|stage| stage.lines().count() == height));
    }

    #[test]
    fn test_hanged_stage_has_both_legs() {
        assert!(gallows(0).contains("_/       \\_"));
        assert!(!gallows(1).contains("\\_"));
        assert!(!gallows(7).contains("-----"));
    }

    #[test]
    fn test_used_letters_line() {
        assert_eq!(used_letters_line(&used("zaM")), "A M Z");
        assert_eq!(used_letters_line(&UsedLetters::new()), "");
    }

    #[test]
    fn test_word_line_uppercases_and_spaces() {
        assert_eq!(word_line("g_to"), "G _ T O");
        assert_eq!(word_line(""), "");
    }

    #[test]
    fn test_render_layout() {
        let board = render(7, "_A_A", &used("ab"));
        let used_at = board.find("Used letters: A B").unwrap();
        let art_at = board.find(gallows(7)).unwrap();
        let word_at = board.find("Word: _ A _ A").unwrap();
        assert!(used_at < art_at && art_at < word_at);
    }
}
