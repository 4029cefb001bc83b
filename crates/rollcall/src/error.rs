//! Error types for rollcall.
//!
//! This module defines all error types used throughout the rollcall crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for rollcall operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the store database.
    #[error("failed to open store at {path}: {source}")]
    StoreOpen {
        /// Path to the store file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A store query failed.
    #[error("store query failed: {0}")]
    StoreQuery(#[from] rusqlite::Error),

    /// The value at the store key is not a valid record list.
    #[error("corrupt store at key '{key}': {source}")]
    CorruptStore {
        /// The store key holding the corrupt value.
        key: String,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    // === Validation Errors ===
    /// The student name was empty after trimming.
    #[error("student name must not be empty")]
    EmptyStudentName,

    /// The given text is not a calendar month name.
    #[error("'{input}' is not a month name")]
    InvalidMonth {
        /// The rejected input.
        input: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for rollcall operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a corrupt-store error for the given key.
    #[must_use]
    pub fn corrupt_store(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self::CorruptStore {
            key: key.into(),
            source,
        }
    }

    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Create an invalid-month error.
    #[must_use]
    pub fn invalid_month(input: impl Into<String>) -> Self {
        Self::InvalidMonth {
            input: input.into(),
        }
    }

    /// Check if this error indicates a corrupt store value.
    #[must_use]
    pub fn is_corrupt_store(&self) -> bool {
        matches!(self, Self::CorruptStore { .. })
    }

    /// Check if this error is a user-input validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyStudentName | Self::InvalidMonth { .. })
    }
}
