//! Unified error type for `Talk2Trade`.
//!
//! Storage adapters and configuration loading return these errors. The catalog and
//! settings stores never hand them to their callers: every storage error is logged and
//! mapped to a documented fallback (seed products, default settings).

use thiserror::Error;

/// Every failure the crate can report.
#[derive(Debug, Error)]
pub enum Error {
    /// The key-value store could not be read or written.
    #[error("Storage unavailable: {message}")]
    StorageUnavailable {
        /// What went wrong
        message: String,
    },

    /// Error raised by the `SeaORM` backed store
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A persisted blob could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// A value supplied by the user could not be interpreted
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// What went wrong
        message: String,
    },

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for building a [`Error::StorageUnavailable`].
    pub fn storage(message: impl Into<String>) -> Self {
        Self::StorageUnavailable {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
