//! Cheapest-chain recommendation per drug
//!
//! Buckets are regrouped by (drug, chain) across every prescriber of the chain,
//! and the two chains with the lowest average unit price are recommended.

use super::round2;
use crate::core::reconcile::engine::average;
use crate::core::reconcile::BucketMap;
use crate::domain::ids::{ChainName, Ndc};
use crate::domain::ChainDirectory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Chains recommended per drug
pub const MAX_CHAINS_PER_DRUG: usize = 2;

/// A chain and its average unit price for a drug
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainPrice {
    /// Chain name
    pub name: ChainName,
    /// Average unit price, rounded to cents
    pub avg_price: f64,
}

/// Recommended chains for one drug, cheapest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainRecommendation {
    /// Drug NDC
    pub ndc: Ndc,
    /// At most two chains, ascending by average price
    pub chain: Vec<ChainPrice>,
}

#[derive(Debug, Default, Clone, Copy)]
struct ChainTotals {
    total_price: f64,
    total_quantity: f64,
}

/// Recommends the cheapest chains per drug
///
/// Buckets with no active fills or whose prescriber has no known chain are
/// left out. Chains with equal average price are ordered by name. Drugs are emitted
/// in ascending NDC order.
pub fn recommend(buckets: &BucketMap, directory: &ChainDirectory) -> Vec<ChainRecommendation> {
    let mut by_drug: BTreeMap<&Ndc, BTreeMap<&ChainName, ChainTotals>> = BTreeMap::new();

    for (key, bucket) in buckets {
        if bucket.fills == 0 || bucket.total_quantity <= 0.0 {
            continue;
        }
        let Some(chain) = directory.chain_of(&key.npi) else {
            continue;
        };
        let totals = by_drug
            .entry(&key.ndc)
            .or_default()
            .entry(chain)
            .or_default();
        totals.total_price += bucket.total_price;
        totals.total_quantity += bucket.total_quantity;
    }

    by_drug
        .into_iter()
        .map(|(ndc, chains)| {
            let mut ranked: Vec<(&ChainName, f64)> = chains
                .into_iter()
                .map(|(name, t)| (name, average(t.total_price, t.total_quantity)))
                .collect();
            ranked.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(b.0)));

            ChainRecommendation {
                ndc: ndc.clone(),
                chain: ranked
                    .into_iter()
                    .take(MAX_CHAINS_PER_DRUG)
                    .map(|(name, avg)| ChainPrice {
                        name: name.clone(),
                        avg_price: round2(avg),
                    })
                    .collect(),
            }
        })
        .collect()
}
