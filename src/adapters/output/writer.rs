//! JSON report writer
//!
//! Each report is serialized to a hidden sibling file first and then renamed over
//! the target, so a reader never sees a half-written report.

use crate::config::OutputConfig;
use crate::core::pipeline::AnalyticsReports;
use crate::domain::context::ResultExt;
use crate::domain::{Result, RxLedgerError};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Paths of the reports written by [`JsonReportWriter::write_all`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReports {
    /// Per-(prescriber, drug) metrics
    pub metrics: PathBuf,
    /// Chain recommendations
    pub chains: PathBuf,
    /// Quantity rankings
    pub quantities: PathBuf,
}

/// Writes the three analytics reports as JSON files
#[derive(Debug, Clone)]
pub struct JsonReportWriter {
    directory: PathBuf,
    pretty: bool,
    metrics_file: String,
    chains_file: String,
    quantities_file: String,
}

impl JsonReportWriter {
    /// Create a writer from the `[output]` section
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            directory: PathBuf::from(&config.directory),
            pretty: config.pretty,
            metrics_file: config.metrics_file.clone(),
            chains_file: config.chains_file.clone(),
            quantities_file: config.quantities_file.clone(),
        }
    }

    /// Output directory
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Write all reports, creating the output directory if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or a file cannot be
    /// serialized, written or renamed into place.
    pub fn write_all(&self, reports: &AnalyticsReports) -> Result<WrittenReports> {
        fs::create_dir_all(&self.directory).with_context(|| {
            format!(
                "Failed to create output directory {}",
                self.directory.display()
            )
        })?;

        let written = WrittenReports {
            metrics: self.write_json(&self.metrics_file, &reports.metrics)?,
            chains: self.write_json(&self.chains_file, &reports.chains)?,
            quantities: self.write_json(&self.quantities_file, &reports.quantities)?,
        };

        tracing::info!(
            directory = %self.directory.display(),
            metrics = reports.metrics.len(),
            chains = reports.chains.len(),
            quantities = reports.quantities.len(),
            "Reports written"
        );
        Ok(written)
    }

    fn write_json<T: Serialize + ?Sized>(&self, file_name: &str, value: &T) -> Result<PathBuf> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(value)
        } else {
            serde_json::to_vec(value)
        }
        .map_err(|e| RxLedgerError::Output(format!("Failed to serialize {file_name}: {e}")))?;

        let target = self.directory.join(file_name);
        let staging = self.directory.join(format!(".{file_name}.tmp"));

        fs::write(&staging, &bytes)
            .with_context(|| format!("Failed to write {}", staging.display()))?;
        if let Err(e) = fs::rename(&staging, &target) {
            let _ = fs::remove_file(&staging);
            return Err(e)
                .with_context(|| format!("Failed to move report into {}", target.display()));
        }

        tracing::debug!(path = %target.display(), bytes = bytes.len(), "Report file written");
        Ok(target)
    }
}
