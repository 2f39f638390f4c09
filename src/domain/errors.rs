//! Domain error types
//!
//! This module defines the error hierarchy for RxLedger.
//! Errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main RxLedger error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum RxLedgerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Record loading errors
    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),

    /// Aggregation pass errors (a worker failed)
    #[error("Engine error: {0}")]
    Engine(String),

    /// Report output errors
    #[error("Output error: {0}")]
    Output(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Record loading errors
///
/// Raised for problems with a whole input source (a directory or a file).
/// Individual malformed records never produce one of these; the loader
/// skips them and keeps going.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input directory does not exist or is not a directory
    #[error("Input directory not found: {0}")]
    DirectoryNotFound(String),

    /// A file or directory could not be read
    #[error("Failed to read {path}: {message}")]
    ReadFailed { path: String, message: String },

    /// File content has the wrong overall shape
    #[error("Invalid format in {path}: {message}")]
    InvalidFormat { path: String, message: String },

    /// CSV reader failure that is not tied to a single row
    #[error("CSV error in {path}: {message}")]
    CsvFailed { path: String, message: String },
}

impl IngestError {
    /// Creates a read failure for a path
    pub fn read_failed(path: impl Into<String>, message: impl ToString) -> Self {
        Self::ReadFailed {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Creates a format failure for a path
    pub fn invalid_format(path: impl Into<String>, message: impl ToString) -> Self {
        Self::InvalidFormat {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for RxLedgerError {
    fn from(err: std::io::Error) -> Self {
        RxLedgerError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for RxLedgerError {
    fn from(err: serde_json::Error) -> Self {
        RxLedgerError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for RxLedgerError {
    fn from(err: toml::de::Error) -> Self {
        RxLedgerError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<csv::Error> for RxLedgerError {
    fn from(err: csv::Error) -> Self {
        RxLedgerError::Serialization(format!("CSV error: {err}"))
    }
}

// A panicked or cancelled worker fails the whole pass
impl From<tokio::task::JoinError> for RxLedgerError {
    fn from(err: tokio::task::JoinError) -> Self {
        RxLedgerError::Engine(format!("worker task failed: {err}"))
    }
}
