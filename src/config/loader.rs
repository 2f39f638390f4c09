//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::RxLedgerConfig;
use crate::domain::errors::RxLedgerError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into RxLedgerConfig
/// 4. Applies environment variable overrides (RXLEDGER_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`RxLedgerError::Configuration`] if the file is missing or unreadable,
/// a referenced variable is unset, the TOML is invalid, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use rxledger::config::loader::load_config;
///
/// let config = load_config("rxledger.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<RxLedgerConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RxLedgerError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        RxLedgerError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration text, applying substitution, overrides and validation
pub fn parse_config(contents: &str) -> Result<RxLedgerConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: RxLedgerConfig = toml::from_str(&contents)
        .map_err(|e| RxLedgerError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        RxLedgerError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied through untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| RxLedgerError::Configuration(format!("Invalid placeholder pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(RxLedgerError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

fn env_parse<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        RxLedgerError::Configuration(format!("Invalid value for {name}: '{value}'"))
    })
}

/// Applies environment variable overrides using RXLEDGER_* prefix
///
/// Environment variables follow the pattern: RXLEDGER_<SECTION>_<KEY>
/// For example: RXLEDGER_ENGINE_WORKERS, RXLEDGER_OUTPUT_DIRECTORY.
/// `RXLEDGER_ENGINE_ALLOWED_NPIS` takes a comma-separated list.
fn apply_env_overrides(config: &mut RxLedgerConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("RXLEDGER_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Input overrides
    if let Ok(val) = std::env::var("RXLEDGER_INPUT_CLAIMS_DIR") {
        config.input.claims_dir = val;
    }
    if let Ok(val) = std::env::var("RXLEDGER_INPUT_REVERTS_DIR") {
        config.input.reverts_dir = val;
    }
    if let Ok(val) = std::env::var("RXLEDGER_INPUT_PHARMACIES_DIR") {
        config.input.pharmacies_dir = val;
    }

    // Engine overrides
    if let Ok(val) = std::env::var("RXLEDGER_ENGINE_WORKERS") {
        config.engine.workers = env_parse("RXLEDGER_ENGINE_WORKERS", &val)?;
    }
    if let Ok(val) = std::env::var("RXLEDGER_ENGINE_GLOBAL_DEDUP") {
        config.engine.global_dedup = env_parse("RXLEDGER_ENGINE_GLOBAL_DEDUP", &val)?;
    }
    if let Ok(val) = std::env::var("RXLEDGER_ENGINE_RESTRICT_TO_PHARMACIES") {
        config.engine.restrict_to_pharmacies =
            env_parse("RXLEDGER_ENGINE_RESTRICT_TO_PHARMACIES", &val)?;
    }
    if let Ok(val) = std::env::var("RXLEDGER_ENGINE_ALLOWED_NPIS") {
        config.engine.allowed_npis = val
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
    }

    // Output overrides
    if let Ok(val) = std::env::var("RXLEDGER_OUTPUT_DIRECTORY") {
        config.output.directory = val;
    }
    if let Ok(val) = std::env::var("RXLEDGER_OUTPUT_PRETTY") {
        config.output.pretty = env_parse("RXLEDGER_OUTPUT_PRETTY", &val)?;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("RXLEDGER_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = env_parse("RXLEDGER_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("RXLEDGER_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("RXLEDGER_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
