//! File-backed logger setup.
//!
//! The terminal belongs to the game screen, so log records go to
//! ~/.blazing-runner/runner.log instead of stderr.

use crate::constants::LOG_FILE;
use crate::utils::persistence::save_path;
use std::fs::OpenOptions;
use std::io;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Install the global logger. Safe to call more than once; later calls
/// are ignored by `try_init`.
pub fn init_file_logger() -> io::Result<()> {
    let path = save_path(LOG_FILE)?;
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(DEFAULT_FILTER),
    )
    .format_timestamp_secs()
    .target(env_logger::Target::Pipe(Box::new(file)))
    .try_init();
    Ok(())
}
