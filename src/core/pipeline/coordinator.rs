//! Analytics coordinator - main orchestrator for one run
//!
//! Loads the three record sets, builds the prescriber allow-list, runs the
//! partitioned reconciliation and derives the three reports from it.

use crate::adapters::source::{JsonDirectorySource, RecordSource};
use crate::config::RxLedgerConfig;
use crate::core::pipeline::summary::RunSummary;
use crate::core::reconcile::{reconcile_partitioned, AllowList, PartitionOptions};
use crate::core::report::{
    rank_quantities, recommend, report, ChainRecommendation, PrescriberDrugMetrics,
    QuantityRanking,
};
use crate::domain::{ChainDirectory, Npi, Result, RxLedgerError};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

/// The three analytics views of one run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalyticsReports {
    /// Per-(prescriber, drug) metrics, sorted by (npi, ndc)
    pub metrics: Vec<PrescriberDrugMetrics>,
    /// Two cheapest chains per drug
    pub chains: Vec<ChainRecommendation>,
    /// Most prescribed quantities per drug
    pub quantities: Vec<QuantityRanking>,
}

/// Reports plus the counters collected while producing them
#[derive(Debug, Clone)]
pub struct AnalyticsRun {
    /// Computed reports
    pub reports: AnalyticsReports,
    /// Run counters
    pub summary: RunSummary,
}

/// Analytics coordinator
pub struct AnalyticsCoordinator {
    config: RxLedgerConfig,
    source: Arc<dyn RecordSource>,
}

impl AnalyticsCoordinator {
    /// Create a coordinator over an explicit record source
    pub fn new(config: RxLedgerConfig, source: Arc<dyn RecordSource>) -> Self {
        Self { config, source }
    }

    /// Create a coordinator reading the directories named in `[input]`
    pub fn from_config(config: RxLedgerConfig) -> Self {
        let source = Arc::new(JsonDirectorySource::from_config(&config.input));
        Self::new(config, source)
    }

    /// Configuration in effect
    pub fn config(&self) -> &RxLedgerConfig {
        &self.config
    }

    /// Builds the prescriber allow-list
    ///
    /// The list is the union of the pharmacy NPIs (when `restrict_to_pharmacies`
    /// is set) and `allowed_npis`. An empty union means no filtering.
    pub fn build_allow_list(&self, directory: &ChainDirectory) -> Option<AllowList> {
        let engine = &self.config.engine;
        let mut allowed = AllowList::new();

        if engine.restrict_to_pharmacies {
            allowed.extend(directory.npis().cloned());
        }
        allowed.extend(
            engine
                .allowed_npis
                .iter()
                .filter_map(|npi| Npi::new(npi.as_str()).ok()),
        );

        if allowed.is_empty() {
            if engine.restrict_to_pharmacies {
                tracing::warn!("No pharmacies loaded; prescriber filtering disabled");
            }
            None
        } else {
            Some(allowed)
        }
    }

    /// Execute the run
    ///
    /// # Errors
    ///
    /// Returns an error if any record source fails or an aggregation worker fails.
    pub async fn run(&self) -> Result<AnalyticsRun> {
        let start_time = Instant::now();
        tracing::info!(source = %self.source.describe(), "Starting analytics run");

        let (claims, reverts, pharmacies) = tokio::try_join!(
            self.source.retrieve_claims(),
            self.source.retrieve_reverts(),
            self.source.retrieve_pharmacies(),
        )?;

        let mut summary = RunSummary {
            claims_loaded: claims.len(),
            reverts_loaded: reverts.len(),
            pharmacies_loaded: pharmacies.len(),
            malformed_claims: claims.malformed,
            malformed_reverts: reverts.malformed,
            malformed_pharmacies: pharmacies.malformed,
            workers: self.config.engine.workers,
            ..RunSummary::default()
        };

        let directory = ChainDirectory::from_pharmacies(&pharmacies.records);
        let allowed = self.build_allow_list(&directory).map(Arc::new);
        summary.allow_list_size = allowed.as_ref().map(|a| a.len());

        let claims = Arc::new(claims.records);
        let reverts = Arc::new(reverts.records);
        let options = PartitionOptions {
            workers: self.config.engine.workers,
            global_dedup: self.config.engine.global_dedup,
        };

        let ranking = {
            let claims = Arc::clone(&claims);
            let reverts = Arc::clone(&reverts);
            let allowed = allowed.clone();
            tokio::task::spawn_blocking(move || {
                rank_quantities(&claims, &reverts, allowed.as_deref())
            })
        };

        let (reconciliation, quantities) = tokio::try_join!(
            reconcile_partitioned(claims, reverts, allowed, options),
            async { ranking.await.map_err(RxLedgerError::from) },
        )?;

        let metrics = report(&reconciliation.buckets);
        let chains = recommend(&reconciliation.buckets, &directory);

        summary.reconcile = reconciliation.stats;
        summary.buckets = reconciliation.buckets.len();
        summary.chunks = reconciliation.chunks;
        summary.drugs_recommended = chains.len();
        summary.drugs_ranked = quantities.len();

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();

        Ok(AnalyticsRun {
            reports: AnalyticsReports {
                metrics,
                chains,
                quantities,
            },
            summary,
        })
    }
}
