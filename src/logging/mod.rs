//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output with a configurable level
//! - JSON-formatted local log files with rotation
//! - Shared macros for the events every pass emits
//!
//! # Example
//!
//! ```no_run
//! use rxledger::logging::init_logging;
//! use rxledger::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of an aggregation pass
///
/// # Example
///
/// ```no_run
/// use rxledger::log_pass_start;
///
/// log_pass_start!(1000, 42, 10);
/// ```
#[macro_export]
macro_rules! log_pass_start {
    ($claims:expr, $reverts:expr, $chunks:expr) => {
        tracing::info!(
            claims = $claims,
            reverts = $reverts,
            chunks = $chunks,
            "Starting aggregation pass"
        );
    };
}

/// Log the completion of an aggregation pass
///
/// # Example
///
/// ```no_run
/// use rxledger::log_pass_complete;
/// use std::time::Duration;
///
/// log_pass_complete!(128, Duration::from_millis(40));
/// ```
#[macro_export]
macro_rules! log_pass_complete {
    ($buckets:expr, $duration:expr) => {
        tracing::info!(
            buckets = $buckets,
            duration_ms = $duration.as_millis() as u64,
            "Aggregation pass completed"
        );
    };
}

/// Log a record left out of aggregation
///
/// Filtered and duplicate records are routine, so this logs at debug.
///
/// ```no_run
/// use rxledger::log_record_skipped;
///
/// log_record_skipped!("claim", "abc-123", "duplicate claim id");
/// ```
#[macro_export]
macro_rules! log_record_skipped {
    ($kind:expr, $id:expr, $reason:expr) => {
        tracing::debug!(
            kind = $kind,
            id = %$id,
            reason = $reason,
            "Record skipped"
        );
    };
}

/// Log a malformed input record
///
/// ```no_run
/// use rxledger::log_malformed_record;
///
/// log_malformed_record!("data/claims/a.json", 3, "missing field `npi`");
/// ```
#[macro_export]
macro_rules! log_malformed_record {
    ($path:expr, $index:expr, $reason:expr) => {
        tracing::warn!(
            path = %$path,
            index = $index,
            reason = %$reason,
            "Malformed record skipped"
        );
    };
}

/// Log an error with context
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
