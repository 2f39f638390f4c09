//! Configuration management for RxLedger.
//!
//! # Overview
//!
//! RxLedger uses a TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `RXLEDGER_<SECTION>_<KEY>` overrides applied after parsing
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rxledger::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("rxledger.toml")?;
//!
//! println!("Claims: {}", config.input.claims_dir);
//! println!("Workers: {}", config.engine.workers);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`InputConfig`] - Claim, revert and pharmacy directories
//! - [`EngineConfig`] - Worker count, deduplication and prescriber filtering
//! - [`OutputConfig`] - Report directory, file names and formatting
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [input]
//! claims_dir = "${RXLEDGER_DATA_ROOT}/claims"
//! reverts_dir = "${RXLEDGER_DATA_ROOT}/reverts"
//! pharmacies_dir = "${RXLEDGER_DATA_ROOT}/pharmacies"
//!
//! [engine]
//! workers = 10
//! restrict_to_pharmacies = true
//!
//! [output]
//! directory = "output"
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, EngineConfig, InputConfig, LoggingConfig, OutputConfig, RxLedgerConfig,
};
