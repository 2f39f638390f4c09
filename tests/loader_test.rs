//! Integration tests for the directory-backed record source

use rxledger::adapters::source::{JsonDirectorySource, RecordSource};
use rxledger::config::InputConfig;
use rxledger::domain::{IngestError, RxLedgerError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

struct Inputs {
    _root: TempDir,
    source: JsonDirectorySource,
}

type Files<'a> = &'a [(&'a str, &'a str)];

fn inputs(claims: Files, reverts: Files, pharmacies: Files) -> Inputs {
    let root = TempDir::new().unwrap();
    let dirs = ["claims", "reverts", "pharmacies"].map(|name| root.path().join(name));
    for (dir, files) in dirs.iter().zip([claims, reverts, pharmacies]) {
        fs::create_dir(dir).unwrap();
        for (name, contents) in files {
            fs::write(dir.join(name), contents).unwrap();
        }
    }

    let config = InputConfig {
        claims_dir: path_string(&dirs[0]),
        reverts_dir: path_string(&dirs[1]),
        pharmacies_dir: path_string(&dirs[2]),
    };
    Inputs {
        source: JsonDirectorySource::from_config(&config),
        _root: root,
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

const CLAIMS_A: &str = r#"[
  {"id": "9b778873-a1d4-4d34-8b36-94e3b6b0a1f3", "npi": "4444444444", "ndc": "00093752910",
   "price": 608.49, "quantity": 90.0, "timestamp": "2024-03-01T21:09:01"},
  {"id": "0c2a4e3c-39c6-4a25-b4c5-4b0b3de6b7ad", "npi": "1111111111", "ndc": "00002323401",
   "price": 12.5, "quantity": 30, "timestamp": "2024-03-02T08:15:00+02:00"}
]"#;

const CLAIMS_B: &str = r#"[
  {"id": "c-3", "npi": "4444444444", "ndc": "00093752910",
   "price": 300.0, "quantity": 45.0, "timestamp": "2024-03-03T10:00:00"},
  {"id": "c-bad-price", "npi": "4444444444", "ndc": "00093752910",
   "price": "free", "quantity": 1.0, "timestamp": "2024-03-03T10:00:00"},
  {"id": "c-negative", "npi": "4444444444", "ndc": "00093752910",
   "price": -1.0, "quantity": 1.0, "timestamp": "2024-03-03T10:00:00"},
  {"id": "", "npi": "4444444444", "ndc": "00093752910",
   "price": 1.0, "quantity": 1.0, "timestamp": "2024-03-03T10:00:00"},
  {"id": "c-bad-time", "npi": "4444444444", "ndc": "00093752910",
   "price": 1.0, "quantity": 1.0, "timestamp": "yesterday"}
]"#;

const REVERTS: &str = r#"[
  {"id": "r-1", "claim_id": "c-3", "timestamp": "2024-04-02T21:41:19"},
  {"id": "r-2", "timestamp": "2024-04-02T21:41:19"}
]"#;

const PHARMACIES: &str = "chain,npi\ndoctor , 4444444444\nsaint,1111111111\n,2222222222\n";

#[tokio::test]
async fn test_loads_all_three_record_sets() {
    let inputs = inputs(
        &[("a.json", CLAIMS_A), ("b.json", CLAIMS_B)],
        &[("reverts.json", REVERTS)],
        &[("pharmacies.csv", PHARMACIES)],
    );

    let claims = inputs.source.retrieve_claims().await.unwrap();
    assert_eq!(claims.len(), 3);
    assert_eq!(claims.malformed, 4);
    let ids: Vec<&str> = claims.records.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "9b778873-a1d4-4d34-8b36-94e3b6b0a1f3",
            "0c2a4e3c-39c6-4a25-b4c5-4b0b3de6b7ad",
            "c-3"
        ]
    );
    // Offset timestamps are normalized to UTC
    assert_eq!(claims.records[1].timestamp.to_string(), "2024-03-02 06:15:00");

    let reverts = inputs.source.retrieve_reverts().await.unwrap();
    assert_eq!(reverts.len(), 1);
    assert_eq!(reverts.malformed, 1);
    assert_eq!(reverts.records[0].claim_id.as_str(), "c-3");

    let pharmacies = inputs.source.retrieve_pharmacies().await.unwrap();
    assert_eq!(pharmacies.len(), 2);
    assert_eq!(pharmacies.malformed, 1);
    assert_eq!(pharmacies.records[0].chain.as_str(), "doctor");
    assert_eq!(pharmacies.records[0].npi.as_str(), "4444444444");
}

#[tokio::test]
async fn test_other_extensions_ignored() {
    let inputs = inputs(
        &[
            ("claims.json", CLAIMS_A),
            ("README.md", "not json"),
            ("claims.json.bak", "[{]"),
        ],
        &[],
        &[("pharmacies.csv", PHARMACIES), ("notes.txt", "chain\n")],
    );

    assert_eq!(inputs.source.retrieve_claims().await.unwrap().len(), 2);
    assert_eq!(inputs.source.retrieve_pharmacies().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_empty_directories_load_nothing() {
    let inputs = inputs(&[], &[], &[]);

    let claims = inputs.source.retrieve_claims().await.unwrap();
    let reverts = inputs.source.retrieve_reverts().await.unwrap();
    let pharmacies = inputs.source.retrieve_pharmacies().await.unwrap();

    assert!(claims.is_empty());
    assert!(reverts.is_empty());
    assert!(pharmacies.is_empty());
    assert_eq!(claims.malformed + reverts.malformed + pharmacies.malformed, 0);
}

#[tokio::test]
async fn test_empty_array_file() {
    let inputs = inputs(&[("empty.json", "[]")], &[], &[]);

    let claims = inputs.source.retrieve_claims().await.unwrap();
    assert!(claims.is_empty());
    assert_eq!(claims.malformed, 0);
}

#[tokio::test]
async fn test_non_array_file_fails_whole_load() {
    let inputs = inputs(
        &[("a.json", CLAIMS_A), ("b.json", r#"{"id": "c-1"}"#)],
        &[],
        &[],
    );

    let err = inputs.source.retrieve_claims().await.unwrap_err();
    assert!(matches!(
        err,
        RxLedgerError::Ingest(IngestError::InvalidFormat { .. })
    ));
    assert!(err.to_string().contains("b.json"));
}

#[tokio::test]
async fn test_truncated_file_fails_whole_load() {
    let inputs = inputs(&[], &[("reverts.json", "[{\"id\": \"r-1\",")], &[]);

    let err = inputs.source.retrieve_reverts().await.unwrap_err();
    assert!(matches!(
        err,
        RxLedgerError::Ingest(IngestError::InvalidFormat { .. })
    ));
}

#[tokio::test]
async fn test_pharmacy_csv_without_npi_column() {
    let inputs = inputs(&[], &[], &[("pharmacies.csv", "chain,id\ndoctor,1\n")]);

    let err = inputs.source.retrieve_pharmacies().await.unwrap_err();
    assert!(err.to_string().contains("npi"));
}

#[tokio::test]
async fn test_missing_directory() {
    let source = JsonDirectorySource::new("/no/claims", "/no/reverts", "/no/pharmacies");

    let err = source.retrieve_claims().await.unwrap_err();
    assert!(matches!(
        err,
        RxLedgerError::Ingest(IngestError::DirectoryNotFound(_))
    ));
    assert!(source.describe().contains("/no/claims"));
}
