use crate::error::HangmanError;
use crate::results::{MatchResult, ResultLog};
use crate::round::{Guess, GuessOutcome, Player, Round, RoundState};
use crate::tracker::UsedLetters;
use crate::wordbank::WordSource;
use crate::{debug_log, info_log};
use chrono::Local;
use rand::Rng;
use std::thread;
use std::time::Duration;

const COUNTDOWN_FROM: u32 = 3;

/// What the player chose to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(Guess),
    Exit,
}

/// Snapshot of the board handed to the front end for drawing.
#[derive(Debug, Clone, Copy)]
pub struct Board<'a> {
    pub lives: i32,
    pub word: &'a str,
    pub used: &'a UsedLetters,
}

/// Blocking pauses between game beats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub beat: Duration,
    pub pause: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            beat: Duration::from_secs(1),
            pause: Duration::from_secs(3),
        }
    }
}

impl Pacing {
    #[must_use]
    pub fn none() -> Self {
        Self {
            beat: Duration::ZERO,
            pause: Duration::ZERO,
        }
    }

    fn sleep(duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub pacing: Pacing,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pacing: Pacing::default(),
        }
    }
}

/// Seam between the game loop and whatever talks to the player.
pub trait GameInterface {
    /// `None` when input is closed.
    fn read_player_name(&mut self) -> Option<String>;
    /// `board` is the round as it starts: full lives, nothing revealed.
    fn display_round_intro(&mut self, player: &str, board: &Board<'_>);
    fn display_countdown(&mut self, remaining: u32);
    fn display_board(&mut self, board: &Board<'_>);
    fn read_action(&mut self) -> UserAction;
    fn display_guess_outcome(&mut self, outcome: GuessOutcome);
    fn display_final_board(&mut self, board: &Board<'_>, result: &MatchResult);
    fn display_warning(&mut self, message: &str);
    fn read_play_again(&mut self) -> bool;
    fn display_exit_message(&mut self);
}

enum RoundEnd {
    Finished,
    Abandoned,
}

/// Runs rounds until the player declines another one or input closes.
///
/// Word-source failures are returned to the caller. A result that cannot be
/// logged is reported as a warning and play continues.
pub fn game_loop<I, R>(
    source: &WordSource,
    rng: &mut R,
    results: &ResultLog,
    config: &GameConfig,
    interface: &mut I,
) -> Result<(), HangmanError>
where
    I: GameInterface + ?Sized,
    R: Rng + ?Sized,
{
    let entry_count = source.count_entries()?;
    info_log!("Loaded {} words from {}", entry_count, source.describe());

    let Some(mut player) = read_player(interface) else {
        interface.display_exit_message();
        return Ok(());
    };

    loop {
        let secret = source.pick_word(rng, entry_count)?;
        let mut round = Round::start(player, secret);

        let revealed = round.revealed().as_string();
        interface.display_round_intro(
            round.player().name(),
            &Board {
                lives: round.lives(),
                word: &revealed,
                used: round.used(),
            },
        );
        for remaining in (1..=COUNTDOWN_FROM).rev() {
            Pacing::sleep(config.pacing.beat);
            interface.display_countdown(remaining);
        }
        Pacing::sleep(config.pacing.beat);

        let end = play_round(&mut round, config, interface);
        if let RoundEnd::Abandoned = end {
            info_log!("Round abandoned, nothing recorded");
            interface.display_exit_message();
            return Ok(());
        }

        let result = round.result(Local::now());
        interface.display_final_board(
            &Board {
                lives: round.lives(),
                word: round.secret(),
                used: round.used(),
            },
            &result,
        );
        if let Err(e) = results.append(&result) {
            log::warn!("{e}");
            interface.display_warning(&format!("Result not saved: {e}"));
        }

        player = round.into_player();
        if !interface.read_play_again() {
            interface.display_exit_message();
            return Ok(());
        }
    }
}

fn read_player<I: GameInterface + ?Sized>(interface: &mut I) -> Option<Player> {
    loop {
        let name = interface.read_player_name()?;
        match Player::new(&name) {
            Ok(player) => return Some(player),
            Err(e) => {
                debug_log!("Rejected player name: {}", e);
            }
        }
    }
}

fn play_round<I: GameInterface + ?Sized>(
    round: &mut Round,
    config: &GameConfig,
    interface: &mut I,
) -> RoundEnd {
    while round.state() == RoundState::InProgress {
        let revealed = round.revealed().as_string();
        interface.display_board(&Board {
            lives: round.lives(),
            word: &revealed,
            used: round.used(),
        });

        let guess = match interface.read_action() {
            UserAction::Exit => return RoundEnd::Abandoned,
            UserAction::Guess(guess) => guess,
        };

        match round.apply(&guess) {
            Ok(outcome) => {
                interface.display_guess_outcome(outcome);
                Pacing::sleep(config.pacing.pause);
            }
            Err(e) => {
                debug_log!("Guess rejected: {}", e);
                interface.display_warning(&e.to_string());
            }
        }
    }
    RoundEnd::Finished
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::Outcome;
    use crate::round::LIFE_BUDGET;
    use crate::tracker::Letter;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::VecDeque;
    use std::fs;

    /// Scripted front end that records what the loop showed.
    #[derive(Default)]
    struct ScriptedInterface {
        names: VecDeque<String>,
        actions: VecDeque<UserAction>,
        replays: VecDeque<bool>,
        boards: Vec<(i32, String)>,
        outcomes: Vec<GuessOutcome>,
        results: Vec<MatchResult>,
        warnings: Vec<String>,
        countdown: Vec<u32>,
        intros: Vec<(String, i32, String)>,
        exited: bool,
    }

    impl ScriptedInterface {
        fn new(name: &str, actions: Vec<UserAction>, replays: Vec<bool>) -> Self {
            Self {
                names: VecDeque::from(vec![name.to_string()]),
                actions: actions.into(),
                replays: replays.into(),
                ..Self::default()
            }
        }
    }

    impl GameInterface for ScriptedInterface {
        fn read_player_name(&mut self) -> Option<String> {
            self.names.pop_front()
        }
        fn display_round_intro(&mut self, player: &str, board: &Board<'_>) {
            self.intros
                .push((player.to_string(), board.lives, board.word.to_string()));
        }
        fn display_countdown(&mut self, remaining: u32) {
            self.countdown.push(remaining);
        }
        fn display_board(&mut self, board: &Board<'_>) {
            self.boards.push((board.lives, board.word.to_string()));
        }
        fn read_action(&mut self) -> UserAction {
            self.actions.pop_front().unwrap_or(UserAction::Exit)
        }
        fn display_guess_outcome(&mut self, outcome: GuessOutcome) {
            self.outcomes.push(outcome);
        }
        fn display_final_board(&mut self, _board: &Board<'_>, result: &MatchResult) {
            self.results.push(result.clone());
        }
        fn display_warning(&mut self, message: &str) {
            self.warnings.push(message.to_string());
        }
        fn read_play_again(&mut self) -> bool {
            self.replays.pop_front().unwrap_or(false)
        }
        fn display_exit_message(&mut self) {
            self.exited = true;
        }
    }

    fn letter(c: char) -> UserAction {
        UserAction::Guess(Guess::Letter(Letter::try_from(c).unwrap()))
    }

    fn word(w: &str) -> UserAction {
        UserAction::Guess(Guess::Word(w.to_string()))
    }

    fn config() -> GameConfig {
        GameConfig {
            pacing: Pacing::none(),
        }
    }

    fn temp_log(name: &str) -> ResultLog {
        let path = std::env::temp_dir().join(name);
        let _ = fs::remove_file(&path);
        ResultLog::new(path)
    }

    #[test]
    fn test_letter_win_is_logged() {
        let source = WordSource::from_text("gato\n");
        let log = temp_log("hangman_game_state_letter_win.txt");
        let mut ui = ScriptedInterface::new(
            "Ana",
            vec![letter('g'), letter('a'), letter('t'), letter('o')],
            vec![false],
        );
        let mut rng = StdRng::seed_from_u64(1);

        game_loop(&source, &mut rng, &log, &config(), &mut ui).unwrap();

        assert_eq!(ui.countdown, vec![3, 2, 1]);
        assert_eq!(ui.boards.first().unwrap(), &(7, "____".to_string()));
        assert_eq!(ui.boards.last().unwrap(), &(7, "GAT_".to_string()));
        assert_eq!(ui.results.len(), 1);
        assert_eq!(ui.results[0].outcome, Outcome::Win);
        assert!(ui.exited);

        let contents = fs::read_to_string(log.path()).unwrap();
        assert!(contents.ends_with("\tAna\tgato\tVitoria\n"));
        fs::remove_file(log.path()).unwrap();
    }

    #[test]
    fn test_loss_by_wrong_words() {
        let source = WordSource::from_text("sol\n");
        let log = temp_log("hangman_game_state_loss.txt");
        let mut ui = ScriptedInterface::new(
            "Bia",
            vec![word("mar"), word("lua"), word("rio"), word("ceu")],
            vec![],
        );
        let mut rng = StdRng::seed_from_u64(1);

        game_loop(&source, &mut rng, &log, &config(), &mut ui).unwrap();

        assert_eq!(ui.outcomes, vec![GuessOutcome::WordMissed; 4]);
        assert_eq!(ui.results[0].outcome, Outcome::Loss);
        fs::remove_file(log.path()).unwrap();
    }

    #[test]
    fn test_play_again_keeps_player_and_resets_round() {
        let source = WordSource::from_text("sol\n");
        let log = temp_log("hangman_game_state_replay.txt");
        let mut ui = ScriptedInterface::new(
            "Caio",
            vec![letter('x'), word("sol"), word("SOL")],
            vec![true, false],
        );
        let mut rng = StdRng::seed_from_u64(1);

        game_loop(&source, &mut rng, &log, &config(), &mut ui).unwrap();

        assert_eq!(ui.results.len(), 2);
        assert!(ui.results.iter().all(|r| r.player == "Caio"));
        // Second round starts fresh.
        assert_eq!(ui.boards.last().unwrap(), &(7, "___".to_string()));
        let contents = fs::read_to_string(log.path()).unwrap();
        assert_eq!(contents.lines().count(), 2);
        fs::remove_file(log.path()).unwrap();
    }

    #[test]
    fn test_abandoned_round_is_not_logged() {
        let source = WordSource::from_text("sol\n");
        let log = temp_log("hangman_game_state_abandoned.txt");
        let mut ui = ScriptedInterface::new("Ana", vec![letter('s')], vec![]);
        let mut rng = StdRng::seed_from_u64(1);

        game_loop(&source, &mut rng, &log, &config(), &mut ui).unwrap();

        assert!(ui.results.is_empty());
        assert!(ui.exited);
        assert!(!log.path().exists());
    }

    #[test]
    fn test_blank_names_are_asked_again() {
        let source = WordSource::from_text("sol\n");
        let log = temp_log("hangman_game_state_names.txt");
        let mut ui = ScriptedInterface::new("Ana", vec![word("sol")], vec![]);
        ui.names = VecDeque::from(vec!["   ".to_string(), "".to_string(), " Dora ".to_string()]);
        let mut rng = StdRng::seed_from_u64(1);

        game_loop(&source, &mut rng, &log, &config(), &mut ui).unwrap();

        assert_eq!(ui.results[0].player, "Dora");
        fs::remove_file(log.path()).unwrap();
    }

    #[test]
    fn test_closed_input_before_name_exits_cleanly() {
        let source = WordSource::from_text("sol\n");
        let log = temp_log("hangman_game_state_no_name.txt");
        let mut ui = ScriptedInterface::default();
        let mut rng = StdRng::seed_from_u64(1);

        game_loop(&source, &mut rng, &log, &config(), &mut ui).unwrap();
        assert!(ui.exited);
        assert!(ui.boards.is_empty());
    }

    #[test]
    fn test_empty_source_is_fatal() {
        let source = WordSource::from_text("\n\n");
        let log = temp_log("hangman_game_state_empty_source.txt");
        let mut ui = ScriptedInterface::new("Ana", vec![], vec![]);
        let mut rng = StdRng::seed_from_u64(1);

        let err = game_loop(&source, &mut rng, &log, &config(), &mut ui).unwrap_err();
        assert!(matches!(err, HangmanError::SourceUnavailable { .. }));
    }

    #[test]
    fn test_unwritable_log_is_a_warning() {
        let source = WordSource::from_text("sol\n");
        let dir = std::env::temp_dir().join("hangman_game_state_no_such_dir");
        let _ = fs::remove_dir_all(&dir);
        let log = ResultLog::new(dir.join("results.txt"));
        let mut ui = ScriptedInterface::new("Ana", vec![word("sol")], vec![]);
        let mut rng = StdRng::seed_from_u64(1);

        game_loop(&source, &mut rng, &log, &config(), &mut ui).unwrap();

        assert_eq!(ui.results.len(), 1);
        assert_eq!(ui.warnings.len(), 1);
        assert!(ui.warnings[0].starts_with("Result not saved"));
    }

    #[test]
    fn test_empty_word_guess_warns_without_penalty() {
        let source = WordSource::from_text("sol\n");
        let log = temp_log("hangman_game_state_empty_guess.txt");
        let mut ui = ScriptedInterface::new("Ana", vec![word("  "), word("sol")], vec![]);
        let mut rng = StdRng::seed_from_u64(1);

        game_loop(&source, &mut rng, &log, &config(), &mut ui).unwrap();

        assert_eq!(ui.warnings, vec!["word guess must not be empty".to_string()]);
        assert_eq!(ui.boards, vec![(7, "___".to_string()), (7, "___".to_string())]);
        fs::remove_file(log.path()).unwrap();
    }

    #[test]
    fn test_round_intro_shows_the_starting_board() {
        let source = WordSource::from_text("sol\n");
        let log = temp_log("hangman_game_state_intro.txt");
        let mut ui = ScriptedInterface::new(
            "Ana",
            vec![letter('x'), letter('y'), word("sol"), word("sol")],
            vec![true, false],
        );
        let mut rng = StdRng::seed_from_u64(1);

        game_loop(&source, &mut rng, &log, &config(), &mut ui).unwrap();

        // The second intro follows a round that lost lives; it must not carry them over.
        let fresh = ("Ana".to_string(), LIFE_BUDGET, "___".to_string());
        assert_eq!(ui.intros, vec![fresh.clone(), fresh]);
        fs::remove_file(log.path()).unwrap();
    }
}
