use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by Travelog.
#[derive(Error, Debug)]
pub enum TravelogError {
    /// The trip feed (or zones file) could not be opened or read from disk.
    #[error("Failed to read data file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// No trip feed file was found at any of the candidate locations.
    #[error("Trip data file not found: {0}")]
    DataFileNotFound(PathBuf),

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the travelog crates.
pub type Result<T> = std::result::Result<T, TravelogError>;
