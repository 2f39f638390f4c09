//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the RxLedger configuration file.

use crate::config::{load_config, RxLedgerConfig};
use clap::Args;
use std::path::Path;

/// Arguments for the validate-config command
#[derive(Args, Debug, Default)]
pub struct ValidateArgs {
    /// Also check that the input directories exist
    #[arg(long)]
    pub check_inputs: bool,
}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates as part of loading
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!();
        print_config_summary(&config);
        println!();

        if self.check_inputs {
            let missing = missing_input_dirs(&config);
            if !missing.is_empty() {
                for dir in &missing {
                    println!("❌ Input directory not found: {dir}");
                }
                return Ok(3); // Input error exit code
            }
            println!("✅ Input directories exist");
        }

        Ok(0)
    }
}

fn print_config_summary(config: &RxLedgerConfig) {
    println!("Configuration Summary:");
    println!("  Log Level: {}", config.application.log_level);
    println!("  Claims: {}", config.input.claims_dir);
    println!("  Reverts: {}", config.input.reverts_dir);
    println!("  Pharmacies: {}", config.input.pharmacies_dir);
    println!("  Workers: {}", config.engine.workers);
    println!("  Global Dedup: {}", config.engine.global_dedup);
    println!(
        "  Restrict To Pharmacies: {}",
        config.engine.restrict_to_pharmacies
    );
    if !config.engine.allowed_npis.is_empty() {
        println!("  Extra Allowed NPIs: {}", config.engine.allowed_npis.len());
    }
    println!("  Output Directory: {}", config.output.directory);
    println!(
        "  Output Files: {}, {}, {}",
        config.output.metrics_file, config.output.chains_file, config.output.quantities_file
    );
    println!("  File Logging: {}", config.logging.local_enabled);
}

/// Input directories from the configuration that do not exist
pub fn missing_input_dirs(config: &RxLedgerConfig) -> Vec<String> {
    [
        &config.input.claims_dir,
        &config.input.reverts_dir,
        &config.input.pharmacies_dir,
    ]
    .into_iter()
    .filter(|dir| !Path::new(dir.as_str()).is_dir())
    .cloned()
    .collect()
}
