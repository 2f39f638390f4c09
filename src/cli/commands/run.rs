//! Run command implementation
//!
//! This module implements the `run` command: load the inputs, compute the three
//! analytics reports and write them to the output directory.

use crate::adapters::output::JsonReportWriter;
use crate::config::{load_config, RxLedgerConfig};
use crate::core::pipeline::{AnalyticsCoordinator, RunSummary};
use crate::domain::RxLedgerError;
use clap::Args;

/// Arguments for the run command
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Override number of aggregation workers
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Override output directory
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Aggregate claims from every prescriber, not only known pharmacies
    #[arg(long)]
    pub no_restrict: bool,

    /// Only drop duplicate claim ids within each worker's chunk
    #[arg(long)]
    pub no_global_dedup: bool,

    /// Exit with code 1 if any malformed input record was skipped
    #[arg(long)]
    pub strict: bool,

    /// Compute and print the summary without writing reports
    #[arg(long)]
    pub dry_run: bool,
}

impl RunArgs {
    /// Apply command-line overrides to a loaded configuration
    pub fn apply_overrides(&self, config: &mut RxLedgerConfig) {
        if let Some(workers) = self.workers {
            tracing::info!(workers, "Overriding worker count from CLI");
            config.engine.workers = workers;
        }
        if let Some(dir) = &self.output_dir {
            tracing::info!(directory = %dir, "Overriding output directory from CLI");
            config.output.directory = dir.clone();
        }
        if self.no_restrict {
            config.engine.restrict_to_pharmacies = false;
        }
        if self.no_global_dedup {
            config.engine.global_dedup = false;
        }
    }

    /// Execute the run command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting run command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("❌ {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        self.apply_overrides(&mut config);
        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("❌ Configuration validation failed: {e}");
            return Ok(2);
        }

        if self.dry_run {
            tracing::info!("Dry run mode enabled - no reports will be written");
            println!("🔍 DRY RUN MODE - No reports will be written");
            println!();
        }

        let writer = JsonReportWriter::new(&config.output);
        let coordinator = AnalyticsCoordinator::from_config(config);

        println!("🚀 Starting analytics run...");
        let run = match coordinator.run().await {
            Ok(run) => run,
            Err(e @ RxLedgerError::Ingest(_)) => {
                tracing::error!(error = %e, "Failed to load input");
                eprintln!("❌ {e}");
                return Ok(3); // Input error exit code
            }
            Err(e) => {
                crate::log_error_with_context!(e, "analytics run");
                eprintln!("❌ Run failed: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        println!();
        print_summary(&run.summary);

        if !self.dry_run {
            match writer.write_all(&run.reports) {
                Ok(written) => {
                    println!();
                    println!("✅ Reports written:");
                    println!("  {}", written.metrics.display());
                    println!("  {}", written.chains.display());
                    println!("  {}", written.quantities.display());
                }
                Err(e) => {
                    crate::log_error_with_context!(e, "writing reports");
                    eprintln!("❌ Failed to write reports: {e}");
                    return Ok(5);
                }
            }
        }

        if self.strict && run.summary.has_malformed() {
            println!();
            println!(
                "⚠️  {} malformed record(s) skipped (--strict)",
                run.summary.malformed_total()
            );
            return Ok(1);
        }

        Ok(0)
    }
}

fn print_summary(summary: &RunSummary) {
    let stats = &summary.reconcile;
    println!("📊 Run Summary:");
    println!("  Claims loaded: {}", summary.claims_loaded);
    println!("  Reverts loaded: {}", summary.reverts_loaded);
    println!("  Pharmacies loaded: {}", summary.pharmacies_loaded);
    println!("  Malformed records skipped: {}", summary.malformed_total());
    match summary.allow_list_size {
        Some(size) => println!("  Allowed prescribers: {size}"),
        None => println!("  Allowed prescribers: all"),
    }
    println!("  Claims aggregated: {}", stats.claims_accepted);
    println!("  Claims filtered: {}", stats.claims_filtered);
    println!("  Duplicate claims: {}", stats.duplicate_claims);
    println!("  Reverts applied: {}", stats.reverts_applied);
    println!("  Reverts unmatched: {}", stats.reverts_unmatched);
    println!("  Repeated reverts: {}", stats.repeated_reverts);
    println!("  Prescriber/drug pairs: {}", summary.buckets);
    println!("  Workers: {} ({} chunks)", summary.workers, summary.chunks);
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
}
