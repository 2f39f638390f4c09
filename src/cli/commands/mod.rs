//! CLI command implementations
//!
//! Commands return a process exit code:
//! 0 success, 1 malformed records skipped under `--strict`, 2 configuration error,
//! 3 input error, 5 fatal error.

pub mod init;
pub mod run;
pub mod validate;
