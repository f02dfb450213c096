//! Error types for a report run.

use std::path::PathBuf;
use thiserror::Error;

/// Convenience result type used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Every error here is terminal for the run.
///
/// Rows with an unknown carrier or a malformed address are not errors; they are
/// dropped during extraction.
#[derive(Debug, Error)]
pub enum Error {
    /// A source page failed to load, returned a non-success status, or never
    /// contained the expected table.
    #[error("fetch from '{name}' ({url}) failed: {message}")]
    Fetch {
        name: String,
        url: String,
        message: String,
    },

    /// The merged and capped report is too small to replace the previous one.
    #[error("too few IPs after merge: {total} (minimum {minimum}), abort writing")]
    InsufficientData { total: usize, minimum: usize },

    /// Creating the parent directory or writing the report failed.
    #[error("error writing report {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration value or unreadable config file.
    #[error("config error: {message}")]
    Config { message: String },
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}
