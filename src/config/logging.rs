//! Tracing setup
//!
//! The TUI owns stdout, so events are written to `finman.log` in the data
//! directory. The filter comes from `FINMAN_LOG` and defaults to `info`.

use std::fs::OpenOptions;
use std::sync::{Mutex, Once};

use tracing::debug;
use tracing_subscriber::EnvFilter;

use super::paths::FinmanPaths;
use crate::error::FinmanError;

static TRACING_INIT: Once = Once::new();

/// Environment variable holding the tracing filter directives
pub const LOG_ENV: &str = "FINMAN_LOG";

/// Install the global subscriber, appending to the log file under `paths`.
///
/// Returns whether this call installed it. Later calls, or a process that
/// already has a subscriber, leave the existing one in place.
pub fn init_logging(paths: &FinmanPaths) -> Result<bool, FinmanError> {
    paths.ensure_directories()?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths.log_file())
        .map_err(|e| FinmanError::Io(format!("Failed to open log file: {}", e)))?;

    let mut installed = false;
    TRACING_INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

        match tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
        {
            Ok(()) => installed = true,
            Err(err) => debug!(error = %err, "Tracing subscriber already installed"),
        }
    });

    Ok(installed)
}
