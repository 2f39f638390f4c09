//! External system integrations for RxLedger.
//!
//! - [`source`] - Record sources feeding claims, reverts and pharmacies into the pipeline
//! - [`output`] - Report writers
//!
//! # Design Pattern
//!
//! Adapters isolate file formats from the analytics core. The pipeline only sees
//! the [`source::RecordSource`] trait, so tests can feed records from memory:
//!
//! ```rust,no_run
//! use rxledger::adapters::source::{JsonDirectorySource, RecordSource};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = JsonDirectorySource::new("data/claims", "data/reverts", "data/pharmacies");
//! let claims = source.retrieve_claims().await?;
//! println!("{} claims, {} malformed", claims.len(), claims.malformed);
//! # Ok(())
//! # }
//! ```

pub mod output;
pub mod source;
