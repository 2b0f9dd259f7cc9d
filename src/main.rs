use chrono::Utc;
use hangman::cli::{CliInterface, parse_cli};
use hangman::logging::init_logging;
use hangman::tui::TuiInterface;
use hangman::{GameConfig, Pacing, ResultLog, WordSource, game_loop};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_cli();
    if let Err(e) = init_logging(cli.log_path().as_deref()) {
        eprintln!("Failed to open log file: {e}");
    }

    let source = match &cli.wordbank_path {
        Some(path) => WordSource::from_file(path),
        None => WordSource::embedded(),
    };
    let seed = cli.seed.unwrap_or_else(clock_seed);
    log::info!("Seeding word draw with {seed}");
    let mut rng = StdRng::seed_from_u64(seed);
    let results = ResultLog::new(&cli.results_path);
    let config = GameConfig {
        pacing: if cli.no_pause {
            Pacing::none()
        } else {
            Pacing::default()
        },
    };

    let outcome = if cli.tui {
        match TuiInterface::new() {
            Ok(mut interface) => game_loop(&source, &mut rng, &results, &config, &mut interface),
            Err(e) => Err(e),
        }
    } else {
        let mut interface = CliInterface::new(io::stdin().lock());
        game_loop(&source, &mut rng, &results, &config, &mut interface)
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn clock_seed() -> u64 {
    Utc::now()
        .timestamp_nanos_opt()
        .map_or(0, |nanos| nanos.unsigned_abs())
}
