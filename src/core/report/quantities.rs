//! Most commonly prescribed quantities per drug
//!
//! Claims pass the same admission rules as reconciliation (allow-list, first
//! occurrence of an id wins) and are dropped if any revert references them.
//! Quantities are ranked by how often they occur; equal counts keep first-seen
//! order.

use crate::core::reconcile::allow_list::{admits, AllowList};
use crate::domain::ids::{ClaimId, Ndc};
use crate::domain::{Claim, Revert};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Ranked quantities for one drug
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityRanking {
    /// Drug NDC
    pub ndc: Ndc,
    /// Distinct quantities, most frequent first
    pub most_prescribed_quantity: Vec<f64>,
}

/// Per-drug tally preserving first-seen order of quantities
#[derive(Debug, Default)]
struct Tally {
    positions: HashMap<OrderedFloat<f64>, usize>,
    counts: Vec<(f64, usize)>,
}

impl Tally {
    fn record(&mut self, quantity: f64) {
        match self.positions.get(&OrderedFloat(quantity)) {
            Some(&pos) => self.counts[pos].1 += 1,
            None => {
                self.positions
                    .insert(OrderedFloat(quantity), self.counts.len());
                self.counts.push((quantity, 1));
            }
        }
    }

    fn ranked(mut self) -> Vec<f64> {
        // sort_by is stable, so ties stay in first-seen order
        self.counts.sort_by(|a, b| b.1.cmp(&a.1));
        self.counts.into_iter().map(|(q, _)| q).collect()
    }
}

/// Ranks prescribed quantities per drug, excluding reverted claims
///
/// Drugs are emitted in first-seen order.
pub fn rank_quantities(
    claims: &[Claim],
    reverts: &[Revert],
    allowed: Option<&AllowList>,
) -> Vec<QuantityRanking> {
    let reverted: HashSet<&ClaimId> = reverts.iter().map(|r| &r.claim_id).collect();
    let mut seen: HashSet<&ClaimId> = HashSet::with_capacity(claims.len());
    let mut drug_positions: HashMap<&Ndc, usize> = HashMap::new();
    let mut tallies: Vec<(&Ndc, Tally)> = Vec::new();

    for claim in claims {
        if !admits(allowed, &claim.npi) || !seen.insert(&claim.id) {
            continue;
        }
        if reverted.contains(&claim.id) {
            continue;
        }

        let pos = *drug_positions.entry(&claim.ndc).or_insert_with(|| {
            tallies.push((&claim.ndc, Tally::default()));
            tallies.len() - 1
        });
        tallies[pos].1.record(claim.quantity);
    }

    tallies
        .into_iter()
        .map(|(ndc, tally)| QuantityRanking {
            ndc: ndc.clone(),
            most_prescribed_quantity: tally.ranked(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::timestamp::parse_timestamp;
    use crate::domain::Npi;

    fn claim(id: &str, npi: &str, ndc: &str, quantity: f64) -> Claim {
        Claim::builder()
            .id(id)
            .npi(npi)
            .ndc(ndc)
            .price(1.0)
            .quantity(quantity)
            .timestamp(parse_timestamp("2024-03-01T21:09:01").unwrap())
            .build()
            .unwrap()
    }

    fn revert(claim_id: &str) -> Revert {
        Revert::new(
            format!("r-{claim_id}"),
            claim_id,
            parse_timestamp("2024-04-02T21:41:19").unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_ranked_by_frequency() {
        let claims = vec![
            claim("1", "n", "X", 30.0),
            claim("2", "n", "X", 90.0),
            claim("3", "n", "X", 90.0),
            claim("4", "n", "X", 8.5),
            claim("5", "n", "X", 90.0),
            claim("6", "n", "X", 8.5),
        ];
        let ranking = rank_quantities(&claims, &[], None);
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].most_prescribed_quantity, vec![90.0, 8.5, 30.0]);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let claims = vec![
            claim("1", "n", "X", 45.0),
            claim("2", "n", "X", 15.0),
            claim("3", "n", "X", 180.0),
        ];
        let ranking = rank_quantities(&claims, &[], None);
        assert_eq!(ranking[0].most_prescribed_quantity, vec![45.0, 15.0, 180.0]);
    }

    #[test]
    fn test_reverted_claims_excluded() {
        let claims = vec![
            claim("1", "n", "X", 10.0),
            claim("2", "n", "X", 10.0),
            claim("3", "n", "X", 20.0),
        ];
        let ranking = rank_quantities(&claims, &[revert("1"), revert("2")], None);
        assert_eq!(ranking[0].most_prescribed_quantity, vec![20.0]);
    }

    #[test]
    fn test_allow_list_and_duplicates_applied() {
        let allowed: AllowList = [Npi::new("ok").unwrap()].into_iter().collect();
        let claims = vec![
            claim("1", "ok", "X", 10.0),
            claim("1", "ok", "X", 20.0),
            claim("2", "other", "X", 20.0),
            claim("3", "ok", "X", 20.0),
        ];
        let ranking = rank_quantities(&claims, &[], Some(&allowed));
        assert_eq!(ranking[0].most_prescribed_quantity, vec![10.0, 20.0]);
    }

    #[test]
    fn test_drugs_in_first_seen_order() {
        let claims = vec![
            claim("1", "n", "B", 1.0),
            claim("2", "n", "A", 1.0),
            claim("3", "n", "B", 2.0),
        ];
        let ranking = rank_quantities(&claims, &[], None);
        let ndcs: Vec<&str> = ranking.iter().map(|r| r.ndc.as_str()).collect();
        assert_eq!(ndcs, vec!["B", "A"]);
    }

    #[test]
    fn test_drug_with_only_reverted_claims_omitted() {
        let claims = vec![claim("1", "n", "X", 1.0), claim("2", "n", "Y", 1.0)];
        let ranking = rank_quantities(&claims, &[revert("1")], None);
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].ndc.as_str(), "Y");
    }
}
