//! Input adapters
//!
//! - [`traits`] - The [`RecordSource`] trait and the [`Loaded`] result
//! - [`json`] - Directory-backed source reading JSON claims/reverts and CSV pharmacies

pub mod json;
pub mod traits;

pub use json::JsonDirectorySource;
pub use traits::{Loaded, RecordSource};
