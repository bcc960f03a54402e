//! Domain error types.

use std::path::PathBuf;

use thiserror::Error;

/// Value object validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("staff id must not be empty")]
    EmptyStaffId,

    #[error("session id must not be empty")]
    EmptySessionId,

    #[error("invalid date key '{0}', expected YYYY-MM-DD")]
    InvalidDateKey(String),
}

/// Snapshot persistence errors
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),
}
