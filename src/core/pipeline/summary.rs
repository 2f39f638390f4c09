//! Run summary and reporting
//!
//! This module defines the counters collected over one analytics run.

use crate::core::reconcile::ReconcileStats;
use std::time::Duration;

/// Summary of an analytics run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Well-formed claims loaded
    pub claims_loaded: usize,

    /// Well-formed reverts loaded
    pub reverts_loaded: usize,

    /// Well-formed pharmacies loaded
    pub pharmacies_loaded: usize,

    /// Claim records skipped as malformed
    pub malformed_claims: usize,

    /// Revert records skipped as malformed
    pub malformed_reverts: usize,

    /// Pharmacy rows skipped as malformed
    pub malformed_pharmacies: usize,

    /// Prescribers admitted by the allow-list (`None` when unrestricted)
    pub allow_list_size: Option<usize>,

    /// Reconciliation counters
    pub reconcile: ReconcileStats,

    /// Distinct (prescriber, drug) buckets
    pub buckets: usize,

    /// Drugs with a chain recommendation
    pub drugs_recommended: usize,

    /// Drugs with a quantity ranking
    pub drugs_ranked: usize,

    /// Configured worker count
    pub workers: usize,

    /// Chunks the claims were split into
    pub chunks: usize,

    /// Duration of the run
    pub duration: Duration,
}

impl RunSummary {
    /// Create a new empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Records skipped as malformed across all inputs
    pub fn malformed_total(&self) -> usize {
        self.malformed_claims + self.malformed_reverts + self.malformed_pharmacies
    }

    /// Whether any input record was skipped as malformed
    pub fn has_malformed(&self) -> bool {
        self.malformed_total() > 0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            claims = self.claims_loaded,
            reverts = self.reverts_loaded,
            pharmacies = self.pharmacies_loaded,
            accepted = self.reconcile.claims_accepted,
            reverts_applied = self.reconcile.reverts_applied,
            buckets = self.buckets,
            drugs_recommended = self.drugs_recommended,
            drugs_ranked = self.drugs_ranked,
            workers = self.workers,
            chunks = self.chunks,
            duration_ms = self.duration.as_millis() as u64,
            "Analytics run completed"
        );

        let stats = &self.reconcile;
        if stats.claims_filtered + stats.duplicate_claims + stats.reverts_unmatched > 0 {
            tracing::info!(
                filtered = stats.claims_filtered,
                duplicates = stats.duplicate_claims,
                unmatched_reverts = stats.reverts_unmatched,
                "Records left out of aggregation"
            );
        }

        if stats.repeated_reverts > 0 {
            tracing::warn!(
                repeated_reverts = stats.repeated_reverts,
                "Claims reverted more than once; only the first revert counted"
            );
        }

        if self.has_malformed() {
            tracing::warn!(
                claims = self.malformed_claims,
                reverts = self.malformed_reverts,
                pharmacies = self.malformed_pharmacies,
                "Malformed input records skipped"
            );
        }
    }
}
