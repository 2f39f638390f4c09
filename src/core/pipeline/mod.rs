//! Analytics run orchestration
//!
//! - [`coordinator`] - Loads records and drives reconciliation and reporting
//! - [`summary`] - Counters collected over a run

pub mod coordinator;
pub mod summary;

pub use coordinator::{AnalyticsCoordinator, AnalyticsReports, AnalyticsRun};
pub use summary::RunSummary;
