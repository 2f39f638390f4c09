//! Integration tests for logging functionality
//!
//! The global subscriber can only be installed once per process, so everything
//! that needs it lives in a single test.

use rxledger::config::LoggingConfig;
use rxledger::domain::RxLedgerError;
use rxledger::logging::init_logging;
use rxledger::logging::structured::{parse_log_level, parse_rotation, LOG_FILE_PREFIX};
use tempfile::TempDir;
use test_case::test_case;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_path, "logs");
    assert_eq!(config.local_rotation, "daily");
}

#[test_case("daily" ; "daily")]
#[test_case("hourly" ; "hourly")]
#[test_case("never" ; "never")]
fn test_supported_rotations(rotation: &str) {
    assert!(parse_rotation(rotation).is_ok());
}

#[test_case("weekly" ; "weekly")]
#[test_case("Daily" ; "capitalized")]
#[test_case("" ; "empty")]
fn test_unsupported_rotations(rotation: &str) {
    assert!(matches!(
        parse_rotation(rotation),
        Err(RxLedgerError::Configuration(_))
    ));
}

#[test]
fn test_log_level_case_insensitive() {
    assert_eq!(parse_log_level("WARN").unwrap(), tracing::Level::WARN);
    assert!(parse_log_level("verbose").is_err());
}

#[test]
fn test_invalid_level_rejected_before_install() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("never-created");
    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "daily".to_string(),
    };

    assert!(init_logging("loud", &config).is_err());
    assert!(!log_path.exists());
}

#[test]
fn test_file_logging_writes_json_lines() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs").join("nested");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };
    assert!(!log_path.exists());

    let guard = init_logging("info", &config).unwrap();
    assert!(log_path.is_dir());

    tracing::info!(target: "rxledger::pipeline", claims = 42, "Loaded input directory");
    tracing::debug!(target: "rxledger::pipeline", "below the configured level");

    // A second subscriber cannot be installed
    let second = init_logging("info", &LoggingConfig::default());
    assert!(matches!(second, Err(RxLedgerError::Configuration(_))));

    // Dropping the guard flushes the background writer
    drop(guard);

    let contents = std::fs::read_to_string(log_path.join(LOG_FILE_PREFIX)).unwrap();
    let line = contents
        .lines()
        .find(|line| line.contains("Loaded input directory"))
        .unwrap();
    let event: serde_json::Value = serde_json::from_str(line).unwrap();

    assert_eq!(event["level"], "INFO");
    assert_eq!(event["target"], "rxledger::pipeline");
    assert_eq!(event["fields"]["claims"], 42);
    assert!(!contents.contains("below the configured level"));
}
