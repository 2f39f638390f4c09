//! Result type alias for RxLedger
//!
//! This module provides a convenient Result type alias that uses RxLedgerError
//! as the error type.

use super::errors::RxLedgerError;

/// Result type alias for RxLedger operations
///
/// # Examples
///
/// ```
/// use rxledger::domain::result::Result;
/// use rxledger::domain::errors::RxLedgerError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(RxLedgerError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, RxLedgerError>;
