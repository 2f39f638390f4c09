//! Domain models and types for RxLedger.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`ClaimId`], [`RevertId`], [`Npi`], [`Ndc`], [`ChainName`])
//! - **Records** ([`Claim`], [`Revert`], [`Pharmacy`]) as handed over by the loader
//! - **Error types** ([`RxLedgerError`], [`IngestError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Identifiers use the newtype pattern so a prescriber NPI can never be passed
//! where a drug NDC is expected:
//!
//! ```rust
//! use rxledger::domain::{Ndc, Npi};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let npi = Npi::new("4444444444")?;
//! let ndc = Ndc::new("00093752910")?;
//!
//! // let wrong: Npi = ndc;  // Compile error!
//! # Ok(())
//! # }
//! ```

pub mod claim;
pub mod context;
pub mod errors;
pub mod ids;
pub mod pharmacy;
pub mod result;
pub mod revert;
pub mod timestamp;

// Re-export commonly used types for convenience
pub use claim::{Claim, ClaimBuilder};
pub use errors::{IngestError, RxLedgerError};
pub use ids::{ChainName, ClaimId, Ndc, Npi, RevertId};
pub use pharmacy::{ChainDirectory, Pharmacy};
pub use result::Result;
pub use revert::Revert;
