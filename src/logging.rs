//! Log output for the terminal front end.
//!
//! The chart owns the alternate screen, so anything written to stdout or
//! stderr while it runs lands on top of the drawing. Logs go to a plain
//! file instead.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing::Subscriber;
use tracing_subscriber::EnvFilter;

use crate::error::Result;

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "warn";

/// Builds a subscriber that appends uncolored lines to `path`, truncating
/// whatever the file held before.
pub fn file_subscriber(
    path: &Path,
    filter: EnvFilter,
) -> Result<impl Subscriber + Send + Sync + 'static> {
    let file = File::create(path)?;

    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .finish())
}

/// `RUST_LOG` if set, [`DEFAULT_FILTER`] otherwise.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
