use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;
use std::io;
use std::path::Path;

const DEFAULT_FILTER: &str = "warn";

/// Installs `env_logger`. `RUST_LOG` overrides the default `warn` filter.
///
/// With a log file, records go there instead of stderr so they do not land
/// on top of the full-screen interface.
pub fn init_logging(log_file: Option<&Path>) -> io::Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER));
    if let Some(path) = log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(Target::Pipe(Box::new(file)));
    }
    // A second call (tests, embedding) keeps the first logger.
    let _ = builder.try_init();
    Ok(())
}

// Debug-build-only logging macros; release builds compile them away.

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}
