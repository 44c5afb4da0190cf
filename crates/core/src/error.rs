//! Error types for the BPE learning library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the BPE learning library.
#[derive(Error, Debug)]
pub enum BpeError {
    /// A dictionary-mode input line did not have the `word count` shape
    #[error("Failed reading vocabulary file {source_name} at line {line}: {content:?}")]
    MalformedDictLine {
        source_name: String,
        line: usize,
        content: String,
    },

    /// I/O error with file context
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error loading merge rules
    #[error("Load error: {0}")]
    Load(String),

    /// Error saving merge rules or word counts
    #[error("Save error: {0}")]
    Save(String),
}

impl BpeError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            err,
        }
    }
}

/// Result type alias for BPE learning operations.
pub type Result<T> = std::result::Result<T, BpeError>;
