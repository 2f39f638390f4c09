//! Per-(prescriber, drug) metrics view

use super::round2;
use crate::core::reconcile::BucketMap;
use crate::domain::ids::{Ndc, Npi};
use serde::{Deserialize, Serialize};

/// One row of the metrics output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrescriberDrugMetrics {
    /// Prescriber NPI
    pub npi: Npi,
    /// Drug NDC
    pub ndc: Ndc,
    /// Active claims
    pub fills: u64,
    /// Reverted claims
    pub reverted: u64,
    /// Average unit price of active claims, rounded to cents
    pub avg_price: f64,
    /// Total price of active claims, rounded to cents
    pub total_price: f64,
}

/// Renders buckets as metrics rows, sorted by (npi, ndc)
pub fn report(buckets: &BucketMap) -> Vec<PrescriberDrugMetrics> {
    let mut rows: Vec<PrescriberDrugMetrics> = buckets
        .iter()
        .map(|(key, bucket)| PrescriberDrugMetrics {
            npi: key.npi.clone(),
            ndc: key.ndc.clone(),
            fills: bucket.fills,
            reverted: bucket.reverted,
            avg_price: round2(bucket.avg_price()),
            total_price: round2(bucket.total_price),
        })
        .collect();
    rows.sort_by(|a, b| (&a.npi, &a.ndc).cmp(&(&b.npi, &b.ndc)));
    rows
}
