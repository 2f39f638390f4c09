//! Core business logic for RxLedger.
//!
//! # Modules
//!
//! - [`reconcile`] - Claim/revert reconciliation into per-(prescriber, drug) buckets
//! - [`report`] - Metrics, chain recommendation and quantity ranking views
//! - [`pipeline`] - Run orchestration and summary
//!
//! # Run Workflow
//!
//! 1. **Load**: Read claims, reverts and pharmacies concurrently
//! 2. **Filter**: Build the prescriber allow-list from the pharmacy list
//! 3. **Reconcile**: Fold claims and reverts over parallel workers and merge
//! 4. **Report**: Derive metrics, chain recommendations and quantity rankings
//! 5. **Summarize**: Log counters for the run
//!
//! # Example
//!
//! ```rust,no_run
//! use rxledger::config::load_config;
//! use rxledger::core::pipeline::AnalyticsCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("rxledger.toml")?;
//! let run = AnalyticsCoordinator::from_config(config).run().await?;
//!
//! println!("Buckets: {}", run.summary.buckets);
//! println!("Drugs ranked: {}", run.summary.drugs_ranked);
//! # Ok(())
//! # }
//! ```

pub mod pipeline;
pub mod reconcile;
pub mod report;
