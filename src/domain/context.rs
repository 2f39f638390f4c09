//! Error context extension trait
//!
//! Adds `.context()` and `.with_context()` to any result whose error converts
//! into [`RxLedgerError`], so library code can say what it was doing without
//! leaving the domain error type.
//!
//! ```rust
//! use rxledger::domain::Result;
//! use rxledger::domain::context::ResultExt;
//!
//! fn read_report(path: &str) -> Result<String> {
//!     std::fs::read_to_string(path).with_context(|| format!("Failed to read report {path}"))
//! }
//! ```

use crate::domain::errors::RxLedgerError;
use crate::domain::result::Result;

/// Extension trait for adding context to `Result` types
pub trait ResultExt<T> {
    /// Add context to an error (evaluated eagerly)
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static;

    /// Add context to an error, computing it only on failure
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<RxLedgerError>,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| wrap(e.into(), context))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| wrap(e.into(), f()))
    }
}

// Keeps the variant for errors callers branch on; everything else becomes Other
fn wrap(err: RxLedgerError, context: impl std::fmt::Display) -> RxLedgerError {
    match err {
        RxLedgerError::Configuration(msg) => {
            RxLedgerError::Configuration(format!("{context}: {msg}"))
        }
        RxLedgerError::Output(msg) => RxLedgerError::Output(format!("{context}: {msg}")),
        RxLedgerError::Io(msg) => RxLedgerError::Io(format!("{context}: {msg}")),
        other => RxLedgerError::Other(format!("{context}: {other}")),
    }
}
