//! Claim/revert reconciliation
//!
//! This module provides the aggregation rule shared by every analytics view:
//! - [`engine`] - Sequential fold of claims then reverts into per-(prescriber, drug) buckets
//! - [`partition`] - Chunked fan-out of the same fold over blocking workers
//! - [`allow_list`] - Per-call prescriber filter

pub mod allow_list;
pub mod engine;
pub mod partition;

pub use allow_list::AllowList;
pub use engine::{
    reconcile, AggregateBucket, AggregateKey, BucketMap, ReconcileStats, Reconciliation,
};
pub use partition::{reconcile_partitioned, PartitionOptions};
