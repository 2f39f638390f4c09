//! Analytics views over reconciled buckets
//!
//! - [`metrics`] - Per-(prescriber, drug) fill/revert metrics
//! - [`chains`] - Two cheapest chains per drug
//! - [`quantities`] - Most commonly prescribed quantities per drug
//!
//! Prices in every view are rounded to cents with [`round2`]; accumulation upstream
//! keeps full precision.

pub mod chains;
pub mod metrics;
pub mod quantities;

pub use chains::{recommend, ChainPrice, ChainRecommendation};
pub use metrics::{report, PrescriberDrugMetrics};
pub use quantities::{rank_quantities, QuantityRanking};

/// Rounds to two decimal places, half away from zero
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(676.1), 676.1);
        assert_eq!(round2(23.4249), 23.42);
        assert_eq!(round2(2.675001), 2.68);
        assert_eq!(round2(-1.006), -1.01);
        assert_eq!(round2(0.0), 0.0);
    }
}
