//! Error types for the conversion core.

use thiserror::Error;

/// Errors produced while converting between text records and store events.
#[derive(Error, Debug)]
pub enum TransferError {
    /// A line had fewer delimited fields than the format requires.
    #[error("expected at least {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    /// Direction token was not IN or OUT.
    #[error("invalid direction token: {0}")]
    Direction(String),

    /// Call outcome token was not OK or MISSED.
    #[error("invalid call outcome token: {0}")]
    Outcome(String),

    /// Timestamp field did not parse as ISO-8601.
    #[error("invalid timestamp '{value}': {source}")]
    Timestamp {
        value: String,
        source: chrono::ParseError,
    },

    /// The event fetched from the store is not of the kind being exported.
    #[error("event kind mismatch: expected {expected}, found {found}")]
    KindMismatch {
        expected: commhist_lib::EventKind,
        found: commhist_lib::EventKind,
    },

    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Store error.
    #[error(transparent)]
    History(#[from] commhist_lib::HistoryError),
}

/// Result type using `TransferError`.
pub type Result<T> = std::result::Result<T, TransferError>;
