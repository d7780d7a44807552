//! Error types for `commhist-lib`.

use thiserror::Error;

/// Primary error type for store operations.
#[derive(Error, Debug)]
pub enum HistoryError {
    /// The store rejected a write request up front.
    #[error("Request rejected by store: {0}")]
    Rejected(String),

    /// An accepted write reported failure on commit.
    #[error("Commit failed: {0}")]
    CommitFailed(String),

    /// The store went away without reporting a commit outcome.
    #[error("Store dropped without reporting a commit outcome")]
    CommitDropped,

    /// A stored value could not be mapped back onto the data model.
    #[error("Corrupt {field} value in stored record: {value}")]
    CorruptField { field: String, value: String },

    /// Unrecognized event kind token.
    #[error("Invalid event kind: {0}")]
    InvalidKind(String),

    /// Unrecognized direction token.
    #[error("Invalid direction: {0}")]
    InvalidDirection(String),

    /// Unrecognized event status token.
    #[error("Invalid event status: {0}")]
    InvalidStatus(String),

    /// Underlying SQLite error.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl HistoryError {
    #[must_use]
    pub fn corrupt_field(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::CorruptField {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Result type using `HistoryError`.
pub type Result<T> = std::result::Result<T, HistoryError>;
