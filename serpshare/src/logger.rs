// serpshare/src/logger.rs
//! Logger setup for the CLI.
//!
//! `RUST_LOG` is honored unless an explicit level is passed, which is how
//! `--quiet` and `--debug` take precedence over the environment.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Default filter when neither a flag nor `RUST_LOG` chooses one.
const DEFAULT_FILTER: &str = "warn";

/// Initializes the global logger, writing to stderr.
///
/// Calling it twice is harmless; the second call is ignored.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.target(Target::Stderr).format_timestamp(None);

    if builder.try_init().is_err() {
        log::debug!("Logger already initialized; keeping the existing one.");
    }
}
