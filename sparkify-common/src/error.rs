//! Common error types for Sparkify

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for Sparkify operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the Sparkify crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data root missing or unreadable
    #[error("File system error at {path}: {reason}")]
    FileSystem { path: PathBuf, reason: String },

    /// A data file does not carry the fields its record type requires
    #[error("Malformed record in {path}: {reason}")]
    MalformedRecord { path: PathBuf, reason: String },

    /// Processing of one data file failed; its writes were rolled back
    #[error("Failed to process {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Attach the data file being processed when the error occurred
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Error::File { .. } | Error::MalformedRecord { .. } => self,
            other => Error::File {
                path: path.into(),
                source: Box::new(other),
            },
        }
    }

    /// True for errors that only invalidate the current file, not the run
    pub fn is_file_local(&self) -> bool {
        matches!(self, Error::MalformedRecord { .. })
    }
}
