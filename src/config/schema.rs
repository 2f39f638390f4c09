//! Configuration schema types
//!
//! This module defines the configuration structure that maps to `rxledger.toml`.

use serde::{Deserialize, Serialize};

/// Upper bound on aggregation workers
pub const MAX_WORKERS: usize = 256;

/// Main RxLedger configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RxLedgerConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Input directories
    pub input: InputConfig,

    /// Aggregation settings
    #[serde(default)]
    pub engine: EngineConfig,

    /// Report output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RxLedgerConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.input.validate()?;
        self.engine.validate()?;
        self.output.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Input directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Directory of claim JSON files
    pub claims_dir: String,

    /// Directory of revert JSON files
    pub reverts_dir: String,

    /// Directory of pharmacy CSV files
    pub pharmacies_dir: String,
}

impl InputConfig {
    fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("claims_dir", &self.claims_dir),
            ("reverts_dir", &self.reverts_dir),
            ("pharmacies_dir", &self.pharmacies_dir),
        ] {
            if value.trim().is_empty() {
                return Err(format!("input.{name} cannot be empty"));
            }
        }
        Ok(())
    }
}

/// Aggregation engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of claim chunks processed in parallel
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Drop duplicate claim ids across the whole input before partitioning
    #[serde(default = "default_true")]
    pub global_dedup: bool,

    /// Only aggregate claims whose prescriber is a known pharmacy
    #[serde(default = "default_true")]
    pub restrict_to_pharmacies: bool,

    /// Extra prescribers admitted alongside the pharmacy list
    #[serde(default)]
    pub allowed_npis: Vec<String>,
}

impl EngineConfig {
    fn validate(&self) -> Result<(), String> {
        if self.workers == 0 || self.workers > MAX_WORKERS {
            return Err(format!(
                "engine.workers must be between 1 and {MAX_WORKERS}, got {}",
                self.workers
            ));
        }
        if self.allowed_npis.iter().any(|npi| npi.trim().is_empty()) {
            return Err("engine.allowed_npis cannot contain empty entries".to_string());
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            global_dedup: true,
            restrict_to_pharmacies: true,
            allowed_npis: Vec::new(),
        }
    }
}

/// Report output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the reports are written into
    #[serde(default = "default_output_directory")]
    pub directory: String,

    /// Pretty-print JSON (2-space indent)
    #[serde(default = "default_true")]
    pub pretty: bool,

    /// Metrics file name
    #[serde(default = "default_metrics_file")]
    pub metrics_file: String,

    /// Chain recommendations file name
    #[serde(default = "default_chains_file")]
    pub chains_file: String,

    /// Quantity rankings file name
    #[serde(default = "default_quantities_file")]
    pub quantities_file: String,
}

impl OutputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.directory.trim().is_empty() {
            return Err("output.directory cannot be empty".to_string());
        }

        let files = [
            ("metrics_file", &self.metrics_file),
            ("chains_file", &self.chains_file),
            ("quantities_file", &self.quantities_file),
        ];
        for (name, value) in files {
            if value.trim().is_empty() {
                return Err(format!("output.{name} cannot be empty"));
            }
            if !value.ends_with(".json") {
                return Err(format!("output.{name} must end with .json, got '{value}'"));
            }
            if value.contains('/') || value.contains('\\') {
                return Err(format!("output.{name} must be a file name, got '{value}'"));
            }
        }

        if self.metrics_file == self.chains_file
            || self.metrics_file == self.quantities_file
            || self.chains_file == self.quantities_file
        {
            return Err("output file names must be distinct".to_string());
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            pretty: true,
            metrics_file: default_metrics_file(),
            chains_file: default_chains_file(),
            quantities_file: default_quantities_file(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err(
                "logging.local_path cannot be empty when local logging is enabled".to_string(),
            );
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_workers() -> usize {
    10
}

fn default_output_directory() -> String {
    "output".to_string()
}

fn default_metrics_file() -> String {
    "metrics.json".to_string()
}

fn default_chains_file() -> String {
    "chain_recommendations.json".to_string()
}

fn default_quantities_file() -> String {
    "quantity_rankings.json".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
