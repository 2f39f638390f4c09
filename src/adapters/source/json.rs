//! Directory-backed record source
//!
//! Claims and reverts are read from `*.json` files, each holding a JSON array of
//! records. Pharmacies are read from `*.csv` files with `chain` and `npi` columns.
//! Files are processed in file-name order, each on its own blocking task, and the
//! results are concatenated in that same order.

use super::traits::{Loaded, RecordSource};
use crate::config::InputConfig;
use crate::domain::{Claim, IngestError, Pharmacy, Result, Revert};
use async_trait::async_trait;
use futures::future::try_join_all;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads records from three input directories
#[derive(Debug, Clone)]
pub struct JsonDirectorySource {
    claims_dir: PathBuf,
    reverts_dir: PathBuf,
    pharmacies_dir: PathBuf,
}

impl JsonDirectorySource {
    /// Create a source over explicit directories
    pub fn new(
        claims_dir: impl Into<PathBuf>,
        reverts_dir: impl Into<PathBuf>,
        pharmacies_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            claims_dir: claims_dir.into(),
            reverts_dir: reverts_dir.into(),
            pharmacies_dir: pharmacies_dir.into(),
        }
    }

    /// Create a source from the `[input]` section
    pub fn from_config(config: &InputConfig) -> Self {
        Self::new(
            &config.claims_dir,
            &config.reverts_dir,
            &config.pharmacies_dir,
        )
    }
}

#[async_trait]
impl RecordSource for JsonDirectorySource {
    fn describe(&self) -> String {
        format!(
            "claims={} reverts={} pharmacies={}",
            self.claims_dir.display(),
            self.reverts_dir.display(),
            self.pharmacies_dir.display()
        )
    }

    async fn retrieve_claims(&self) -> Result<Loaded<Claim>> {
        load_directory(&self.claims_dir, "json", |path| {
            parse_json_file(path, Claim::validate)
        })
        .await
    }

    async fn retrieve_reverts(&self) -> Result<Loaded<Revert>> {
        load_directory(&self.reverts_dir, "json", |path| {
            parse_json_file(path, |_: &Revert| Ok(()))
        })
        .await
    }

    async fn retrieve_pharmacies(&self) -> Result<Loaded<Pharmacy>> {
        load_directory(&self.pharmacies_dir, "csv", parse_pharmacy_csv).await
    }
}

/// Lists files with `extension` directly under `dir`, sorted by name
pub fn list_files(dir: &Path, extension: &str) -> std::result::Result<Vec<PathBuf>, IngestError> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound(dir.display().to_string()));
    }

    let entries =
        fs::read_dir(dir).map_err(|e| IngestError::read_failed(dir.display().to_string(), e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| IngestError::read_failed(dir.display().to_string(), e))?
            .path();
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if matches && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

async fn load_directory<T, F>(dir: &Path, extension: &str, parse: F) -> Result<Loaded<T>>
where
    T: Send + 'static,
    F: Fn(&Path) -> Result<Loaded<T>> + Copy + Send + 'static,
{
    let files = list_files(dir, extension)?;
    if files.is_empty() {
        tracing::warn!(dir = %dir.display(), extension, "No input files found");
    }

    let tasks = files
        .into_iter()
        .map(|path| tokio::task::spawn_blocking(move || parse(&path)));
    let parts = try_join_all(tasks).await?;

    let mut loaded = Loaded::default();
    for part in parts {
        loaded.append(part?);
    }

    tracing::info!(
        dir = %dir.display(),
        records = loaded.len(),
        malformed = loaded.malformed,
        "Loaded input directory"
    );
    Ok(loaded)
}

/// Parses one JSON array file, skipping records that fail to parse or `check`
pub fn parse_json_file<T, C>(path: &Path, check: C) -> Result<Loaded<T>>
where
    T: DeserializeOwned,
    C: Fn(&T) -> std::result::Result<(), String>,
{
    let file = path.display().to_string();
    let bytes = fs::read(path).map_err(|e| IngestError::read_failed(&file, e))?;
    let value: Value =
        serde_json::from_slice(&bytes).map_err(|e| IngestError::invalid_format(&file, e))?;

    let Value::Array(items) = value else {
        return Err(IngestError::invalid_format(&file, "top level must be a JSON array").into());
    };

    let mut loaded = Loaded::new(Vec::with_capacity(items.len()), 0);
    for (index, item) in items.into_iter().enumerate() {
        let parsed = serde_json::from_value::<T>(item)
            .map_err(|e| e.to_string())
            .and_then(|record| check(&record).map(|_| record));
        match parsed {
            Ok(record) => loaded.records.push(record),
            Err(reason) => {
                crate::log_malformed_record!(file, index, reason);
                loaded.malformed += 1;
            }
        }
    }

    tracing::debug!(
        path = %file,
        records = loaded.len(),
        malformed = loaded.malformed,
        "Parsed file"
    );
    Ok(loaded)
}

#[derive(Debug, Deserialize)]
struct PharmacyRow {
    chain: String,
    npi: String,
}

/// Parses one pharmacy CSV file, skipping rows that fail to parse or validate
pub fn parse_pharmacy_csv(path: &Path) -> Result<Loaded<Pharmacy>> {
    let file = path.display().to_string();
    let csv_failed = |e: csv::Error| IngestError::CsvFailed {
        path: file.clone(),
        message: e.to_string(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_failed)?;

    let headers = reader.headers().map_err(csv_failed)?;
    for required in ["chain", "npi"] {
        if !headers.iter().any(|h| h == required) {
            return Err(IngestError::invalid_format(
                &file,
                format!("missing required column `{required}`"),
            )
            .into());
        }
    }

    let mut loaded = Loaded::default();
    for (index, row) in reader.deserialize::<PharmacyRow>().enumerate() {
        let parsed = row
            .map_err(|e| e.to_string())
            .and_then(|row| Pharmacy::new(&row.chain, row.npi));
        match parsed {
            Ok(pharmacy) => loaded.records.push(pharmacy),
            Err(reason) => {
                crate::log_malformed_record!(file, index, reason);
                loaded.malformed += 1;
            }
        }
    }

    Ok(loaded)
}
