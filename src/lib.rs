// RxLedger - Pharmacy Claims Analytics
// Copyright (c) 2025 RxLedger Contributors
// Licensed under the MIT License

//! # RxLedger - Pharmacy Claims Analytics
//!
//! RxLedger reconciles pharmacy claim events against revert (cancellation) events
//! and derives per-prescriber, per-drug analytics from the result.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Loading** claims, reverts and pharmacy listings from JSON and CSV directories
//! - **Reconciling** claims with reverts into per-(prescriber, drug) buckets, in parallel
//! - **Reporting** fill metrics, the cheapest pharmacy chains per drug and the most
//!   commonly prescribed quantities per drug
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (reconciliation, reports, run orchestration)
//! - [`adapters`] - Input sources and report writers
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rxledger::adapters::output::JsonReportWriter;
//! use rxledger::config::load_config;
//! use rxledger::core::pipeline::AnalyticsCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("rxledger.toml")?;
//!     let writer = JsonReportWriter::new(&config.output);
//!
//!     let run = AnalyticsCoordinator::from_config(config).run().await?;
//!     writer.write_all(&run.reports)?;
//!
//!     println!("Aggregated {} prescriber/drug pairs", run.summary.buckets);
//!     Ok(())
//! }
//! ```
//!
//! ## Reconciliation
//!
//! The engine can be used directly on in-memory records:
//!
//! ```rust
//! use rxledger::core::reconcile::reconcile;
//! use rxledger::domain::timestamp::parse_timestamp;
//! use rxledger::domain::Claim;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let claim = Claim::builder()
//!     .id("c1")
//!     .npi("4444444444")
//!     .ndc("00093752910")
//!     .price(60849.0)
//!     .quantity(90.0)
//!     .timestamp(parse_timestamp("2024-03-01T21:09:01")?)
//!     .build()?;
//!
//! let result = reconcile(&[claim], &[], None);
//! assert_eq!(result.buckets.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Library code returns [`domain::RxLedgerError`]. Malformed individual records are
//! never errors; they are logged, skipped and counted.
//!
//! ## Logging
//!
//! RxLedger uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! tracing::info!(claims = 1000, "Loaded input directory");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
