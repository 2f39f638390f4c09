//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "rxledger.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing RxLedger configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Point [input] at your claims, reverts and pharmacies directories");
                println!("  2. Validate configuration: rxledger validate-config --check-inputs");
                println!("  3. Run analytics: rxledger run");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate the sample configuration
    pub fn generate_config() -> String {
        r#"# RxLedger Configuration File
# Pharmacy claims analytics

[application]
log_level = "info"  # trace | debug | info | warn | error

[input]
# Each claims/reverts file is a JSON array; pharmacies are CSV with chain,npi columns.
# Paths may use ${VAR} environment substitution, e.g. "${RXLEDGER_DATA_ROOT}/claims"
claims_dir = "data/claims"
reverts_dir = "data/reverts"
pharmacies_dir = "data/pharmacies"

[engine]
workers = 10                   # 1..=256
global_dedup = true            # drop duplicate claim ids before splitting across workers
restrict_to_pharmacies = true  # only aggregate prescribers listed in the pharmacy files
allowed_npis = []              # extra prescribers to admit

[output]
directory = "output"
pretty = true
metrics_file = "metrics.json"
chains_file = "chain_recommendations.json"
quantities_file = "quantity_rankings.json"

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"  # daily | hourly | never
"#
        .to_string()
    }
}
