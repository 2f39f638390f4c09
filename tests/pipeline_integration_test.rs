//! End-to-end tests: input directories through the run command to report files

use rxledger::adapters::output::JsonReportWriter;
use rxledger::cli::commands::run::RunArgs;
use rxledger::config::RxLedgerConfig;
use rxledger::core::pipeline::AnalyticsCoordinator;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PHARMACIES: &str = "chain,npi\ndoctor,1111111111\nsaint,2222222222\nhealth,3333333333\n";

/// Three pharmacies, one outside prescriber, one reverted claim and one
/// revert for a claim that never arrived
fn claims_json() -> Value {
    json!([
        {"id": "c1", "npi": "1111111111", "ndc": "A", "price": 200.0, "quantity": 10.0, "timestamp": "2024-03-01T09:00:00"},
        {"id": "c2", "npi": "2222222222", "ndc": "A", "price": 210.0, "quantity": 10.0, "timestamp": "2024-03-01T09:05:00"},
        {"id": "c3", "npi": "3333333333", "ndc": "A", "price": 300.0, "quantity": 10.0, "timestamp": "2024-03-01T09:10:00"},
        {"id": "c4", "npi": "1111111111", "ndc": "B", "price": 50.0, "quantity": 5.0, "timestamp": "2024-03-01T09:15:00"},
        {"id": "c5", "npi": "9999999999", "ndc": "A", "price": 1.0, "quantity": 10.0, "timestamp": "2024-03-01T09:20:00"},
        {"id": "c6", "npi": "2222222222", "ndc": "B", "price": 30.0, "quantity": 5.0, "timestamp": "2024-03-01T09:25:00"}
    ])
}

fn reverts_json() -> Value {
    json!([
        {"id": "r1", "claim_id": "c6", "timestamp": "2024-04-01T10:00:00"},
        {"id": "r2", "claim_id": "ghost", "timestamp": "2024-04-01T10:05:00"}
    ])
}

struct Workspace {
    root: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let root = TempDir::new().unwrap();
        for dir in ["claims", "reverts", "pharmacies"] {
            fs::create_dir(root.path().join(dir)).unwrap();
        }
        let workspace = Self { root };
        workspace.write("claims/claims.json", &claims_json().to_string());
        workspace.write("reverts/reverts.json", &reverts_json().to_string());
        workspace.write("pharmacies/pharmacies.csv", PHARMACIES);
        workspace
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    fn write(&self, relative: &str, contents: &str) {
        fs::write(self.path(relative), contents).unwrap();
    }

    fn config_toml(&self, extra: &str) -> String {
        format!(
            "[input]\nclaims_dir = {:?}\nreverts_dir = {:?}\npharmacies_dir = {:?}\n\n[output]\ndirectory = {:?}\n{extra}",
            self.path("claims").to_string_lossy(),
            self.path("reverts").to_string_lossy(),
            self.path("pharmacies").to_string_lossy(),
            self.path("out").to_string_lossy(),
        )
    }

    fn config(&self) -> RxLedgerConfig {
        let config: RxLedgerConfig = toml::from_str(&self.config_toml("")).unwrap();
        config.validate().unwrap();
        config
    }

    /// Writes rxledger.toml and returns its path for the run command
    fn config_file(&self, extra: &str) -> String {
        let path = self.path("rxledger.toml");
        fs::write(&path, self.config_toml(extra)).unwrap();
        path.to_string_lossy().to_string()
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn test_run_produces_expected_reports() {
    let workspace = Workspace::new();
    let config = workspace.config();
    let writer = JsonReportWriter::new(&config.output);

    let run = AnalyticsCoordinator::from_config(config).run().await.unwrap();
    let written = writer.write_all(&run.reports).unwrap();

    assert_eq!(
        read_json(&written.metrics),
        json!([
            {"npi": "1111111111", "ndc": "A", "fills": 1, "reverted": 0, "avg_price": 20.0, "total_price": 200.0},
            {"npi": "1111111111", "ndc": "B", "fills": 1, "reverted": 0, "avg_price": 10.0, "total_price": 50.0},
            {"npi": "2222222222", "ndc": "A", "fills": 1, "reverted": 0, "avg_price": 21.0, "total_price": 210.0},
            {"npi": "2222222222", "ndc": "B", "fills": 0, "reverted": 1, "avg_price": 0.0, "total_price": 0.0},
            {"npi": "3333333333", "ndc": "A", "fills": 1, "reverted": 0, "avg_price": 30.0, "total_price": 300.0}
        ])
    );
    assert_eq!(
        read_json(&written.chains),
        json!([
            {"ndc": "A", "chain": [{"name": "doctor", "avg_price": 20.0}, {"name": "saint", "avg_price": 21.0}]},
            {"ndc": "B", "chain": [{"name": "doctor", "avg_price": 10.0}]}
        ])
    );
    assert_eq!(
        read_json(&written.quantities),
        json!([
            {"ndc": "A", "most_prescribed_quantity": [10.0]},
            {"ndc": "B", "most_prescribed_quantity": [5.0]}
        ])
    );
}

#[tokio::test]
async fn test_run_summary_counters() {
    let workspace = Workspace::new();

    let run = AnalyticsCoordinator::from_config(workspace.config())
        .run()
        .await
        .unwrap();
    let summary = run.summary;

    assert_eq!(summary.claims_loaded, 6);
    assert_eq!(summary.reverts_loaded, 2);
    assert_eq!(summary.pharmacies_loaded, 3);
    assert_eq!(summary.allow_list_size, Some(3));
    assert_eq!(summary.reconcile.claims_accepted, 5);
    assert_eq!(summary.reconcile.claims_filtered, 1);
    assert_eq!(summary.reconcile.reverts_applied, 1);
    assert_eq!(summary.reconcile.reverts_unmatched, 1);
    assert_eq!(summary.buckets, 5);
    assert_eq!(summary.drugs_recommended, 2);
    assert_eq!(summary.drugs_ranked, 2);
    assert!(!summary.has_malformed());
}

#[tokio::test]
async fn test_unrestricted_run_includes_outside_prescriber() {
    let workspace = Workspace::new();
    let mut config = workspace.config();
    config.engine.restrict_to_pharmacies = false;

    let run = AnalyticsCoordinator::from_config(config).run().await.unwrap();

    assert_eq!(run.summary.allow_list_size, None);
    assert_eq!(run.reports.metrics.len(), 6);
    // Outside prescribers have no chain, so recommendations are unchanged
    assert_eq!(run.reports.chains.len(), 2);
    assert_eq!(run.reports.chains[0].chain[0].name.as_str(), "doctor");
}

#[tokio::test]
async fn test_worker_count_does_not_change_reports() {
    let workspace = Workspace::new();

    let mut reports = Vec::new();
    for workers in [1, 2, 4, 64] {
        let mut config = workspace.config();
        config.engine.workers = workers;
        let run = AnalyticsCoordinator::from_config(config).run().await.unwrap();
        reports.push(run.reports);
    }

    assert!(reports.windows(2).all(|pair| pair[0] == pair[1]));
}

#[tokio::test]
async fn test_run_command_writes_reports() {
    let workspace = Workspace::new();
    let config_path = workspace.config_file("pretty = false\n");

    let code = RunArgs::default().execute(&config_path).await.unwrap();

    assert_eq!(code, 0);
    let metrics = fs::read_to_string(workspace.path("out/metrics.json")).unwrap();
    assert!(!metrics.contains('\n'));
    assert!(workspace.path("out/chain_recommendations.json").is_file());
    assert!(workspace.path("out/quantity_rankings.json").is_file());
}

#[tokio::test]
async fn test_run_command_dry_run_writes_nothing() {
    let workspace = Workspace::new();
    let config_path = workspace.config_file("");

    let args = RunArgs {
        dry_run: true,
        ..RunArgs::default()
    };

    assert_eq!(args.execute(&config_path).await.unwrap(), 0);
    assert!(!workspace.path("out").exists());
}

#[tokio::test]
async fn test_run_command_output_dir_override() {
    let workspace = Workspace::new();
    let config_path = workspace.config_file("");
    let override_dir = workspace.path("elsewhere");

    let args = RunArgs {
        output_dir: Some(override_dir.to_string_lossy().to_string()),
        ..RunArgs::default()
    };

    assert_eq!(args.execute(&config_path).await.unwrap(), 0);
    assert!(override_dir.join("metrics.json").is_file());
    assert!(!workspace.path("out").exists());
}

#[tokio::test]
async fn test_run_command_strict_with_malformed_records() {
    let workspace = Workspace::new();
    workspace.write(
        "claims/zz-bad.json",
        r#"[{"id": "bad", "npi": "1111111111", "ndc": "A", "price": "n/a", "quantity": 1, "timestamp": "2024-03-01T00:00:00"}]"#,
    );
    let config_path = workspace.config_file("");

    let lenient = RunArgs::default().execute(&config_path).await.unwrap();
    assert_eq!(lenient, 0);

    let strict = RunArgs {
        strict: true,
        ..RunArgs::default()
    };
    assert_eq!(strict.execute(&config_path).await.unwrap(), 1);
    // Reports are still written before the strict check fails the run
    assert!(workspace.path("out/metrics.json").is_file());
}

#[tokio::test]
async fn test_run_command_missing_input_directory() {
    let workspace = Workspace::new();
    fs::remove_dir_all(workspace.path("reverts")).unwrap();
    let config_path = workspace.config_file("");

    assert_eq!(RunArgs::default().execute(&config_path).await.unwrap(), 3);
    assert!(!workspace.path("out").exists());
}

#[tokio::test]
async fn test_run_command_malformed_input_file() {
    let workspace = Workspace::new();
    workspace.write("claims/claims.json", r#"{"not": "an array"}"#);
    let config_path = workspace.config_file("");

    assert_eq!(RunArgs::default().execute(&config_path).await.unwrap(), 3);
}

#[tokio::test]
async fn test_run_command_configuration_errors() {
    let workspace = Workspace::new();

    let missing = workspace.path("absent.toml").to_string_lossy().to_string();
    assert_eq!(RunArgs::default().execute(&missing).await.unwrap(), 2);

    let config_path = workspace.config_file("");
    let zero_workers = RunArgs {
        workers: Some(0),
        ..RunArgs::default()
    };
    assert_eq!(zero_workers.execute(&config_path).await.unwrap(), 2);
}
