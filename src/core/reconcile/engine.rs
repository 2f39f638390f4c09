//! Claim/revert reconciliation
//!
//! The fold that every path goes through: claims are folded into per-(prescriber, drug)
//! buckets first, then reverts are resolved through the claim index and subtracted.
//! The partitioned path in [`super::partition`] reuses [`fold_claims`] and
//! [`apply_reverts`] per chunk.

use super::allow_list::{admits, AllowList};
use crate::domain::ids::{ClaimId, Ndc, Npi};
use crate::domain::{Claim, Revert};
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Bucket key: one prescriber and one drug
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct AggregateKey {
    /// Prescriber NPI
    pub npi: Npi,
    /// Drug NDC
    pub ndc: Ndc,
}

impl AggregateKey {
    /// Creates a key
    pub fn new(npi: Npi, ndc: Ndc) -> Self {
        Self { npi, ndc }
    }

    fn of(claim: &Claim) -> Self {
        Self::new(claim.npi.clone(), claim.ndc.clone())
    }
}

/// Running totals for one [`AggregateKey`]
///
/// `fills + reverted` equals the number of accepted claims at the key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AggregateBucket {
    /// Claims currently active
    pub fills: u64,
    /// Claims that were reverted
    pub reverted: u64,
    /// Sum of active claims' prices
    pub total_price: f64,
    /// Sum of active claims' quantities
    pub total_quantity: f64,
}

impl AggregateBucket {
    fn add_claim(&mut self, price: f64, quantity: f64) {
        self.fills += 1;
        self.total_price += price;
        self.total_quantity += quantity;
    }

    fn revert_claim(&mut self, price: f64, quantity: f64) {
        self.fills -= 1;
        self.reverted += 1;
        if self.fills == 0 {
            // No active claims left: drop rounding residue from the subtraction
            self.total_price = 0.0;
            self.total_quantity = 0.0;
        } else {
            self.total_price -= price;
            self.total_quantity -= quantity;
        }
    }

    /// Adds another partial bucket for the same key
    pub fn merge(&mut self, other: &AggregateBucket) {
        self.fills += other.fills;
        self.reverted += other.reverted;
        self.total_price += other.total_price;
        self.total_quantity += other.total_quantity;
    }

    /// Average unit price, or 0.0 when no quantity is left
    pub fn avg_price(&self) -> f64 {
        average(self.total_price, self.total_quantity)
    }
}

/// `price / quantity`, guarded so a non-positive quantity yields 0.0
pub fn average(total_price: f64, total_quantity: f64) -> f64 {
    if total_quantity > 0.0 {
        total_price / total_quantity
    } else {
        0.0
    }
}

/// Aggregated buckets of one pass
pub type BucketMap = HashMap<AggregateKey, AggregateBucket>;

#[derive(Debug, Clone)]
struct IndexedClaim {
    key: AggregateKey,
    price: f64,
    quantity: f64,
    reverted: bool,
}

/// Accepted claims by id, used to resolve reverts to their bucket
#[derive(Debug, Default)]
pub struct ClaimIndex {
    claims: HashMap<ClaimId, IndexedClaim>,
}

impl ClaimIndex {
    /// Number of accepted claims
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// Whether no claim was accepted
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Whether a claim id was accepted
    pub fn contains(&self, id: &ClaimId) -> bool {
        self.claims.contains_key(id)
    }
}

/// What a pass accepted and what it skipped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileStats {
    /// Claims aggregated
    pub claims_accepted: usize,
    /// Claims whose prescriber is not in the allow-list
    pub claims_filtered: usize,
    /// Claims dropped because their id was already accepted
    pub duplicate_claims: usize,
    /// Reverts subtracted from a bucket
    pub reverts_applied: usize,
    /// Reverts whose claim was never accepted
    pub reverts_unmatched: usize,
    /// Reverts ignored because their claim was already reverted
    pub repeated_reverts: usize,
}

impl ReconcileStats {
    /// Sums counters of another pass into this one
    pub fn merge(&mut self, other: &ReconcileStats) {
        self.claims_accepted += other.claims_accepted;
        self.claims_filtered += other.claims_filtered;
        self.duplicate_claims += other.duplicate_claims;
        self.reverts_applied += other.reverts_applied;
        self.reverts_unmatched += other.reverts_unmatched;
        self.repeated_reverts += other.repeated_reverts;
    }
}

/// Result of a reconciliation pass
#[derive(Debug, Clone, Default)]
pub struct Reconciliation {
    /// Aggregated buckets
    pub buckets: BucketMap,
    /// Pass counters
    pub stats: ReconcileStats,
    /// Number of chunks the claims were split into (1 for a sequential pass)
    pub chunks: usize,
}

/// Reconciles claims against reverts in a single pass
///
/// Claims are folded in input order with first-occurrence-wins duplicate handling,
/// then reverts are applied in input order. A claim is reverted at most once.
///
/// # Examples
///
/// ```
/// use rxledger::core::reconcile::{reconcile, AggregateKey};
/// use rxledger::domain::{Claim, Ndc, Npi, Revert};
/// use rxledger::domain::timestamp::parse_timestamp;
///
/// let ts = parse_timestamp("2024-03-01T21:09:01").unwrap();
/// let claim = Claim::builder()
///     .id("A").npi("4444444444").ndc("X")
///     .price(60849.0).quantity(90.0).timestamp(ts)
///     .build().unwrap();
/// let revert = Revert::new("R", "A", ts).unwrap();
///
/// let result = reconcile(&[claim], &[revert], None);
/// let key = AggregateKey::new(Npi::new("4444444444").unwrap(), Ndc::new("X").unwrap());
/// let bucket = result.buckets[&key];
/// assert_eq!((bucket.fills, bucket.reverted), (0, 1));
/// ```
pub fn reconcile(
    claims: &[Claim],
    reverts: &[Revert],
    allowed: Option<&AllowList>,
) -> Reconciliation {
    let mut stats = ReconcileStats::default();
    let (mut index, mut buckets) = fold_claims(claims, allowed, &mut stats);
    apply_reverts(&mut index, &mut buckets, reverts, &mut stats);

    tracing::debug!(
        claims = claims.len(),
        reverts = reverts.len(),
        buckets = buckets.len(),
        accepted = stats.claims_accepted,
        reverts_applied = stats.reverts_applied,
        "Reconciliation pass finished"
    );

    Reconciliation {
        buckets,
        stats,
        chunks: 1,
    }
}

/// Folds claims into the claim index and bucket map
pub fn fold_claims(
    claims: &[Claim],
    allowed: Option<&AllowList>,
    stats: &mut ReconcileStats,
) -> (ClaimIndex, BucketMap) {
    let mut index = ClaimIndex::default();
    let mut buckets = BucketMap::new();

    for claim in claims {
        if !admits(allowed, &claim.npi) {
            crate::log_record_skipped!("claim", claim.id, "prescriber not in allow-list");
            stats.claims_filtered += 1;
            continue;
        }

        let key = AggregateKey::of(claim);
        match index.claims.entry(claim.id.clone()) {
            Entry::Occupied(_) => {
                crate::log_record_skipped!("claim", claim.id, "duplicate claim id");
                stats.duplicate_claims += 1;
                continue;
            }
            Entry::Vacant(slot) => {
                slot.insert(IndexedClaim {
                    key: key.clone(),
                    price: claim.price,
                    quantity: claim.quantity,
                    reverted: false,
                });
            }
        }

        buckets
            .entry(key)
            .or_default()
            .add_claim(claim.price, claim.quantity);
        stats.claims_accepted += 1;
    }

    (index, buckets)
}

/// Applies reverts to buckets built by [`fold_claims`]
///
/// Reverts to claims missing from `index` are skipped; this is also how a chunk
/// ignores reverts that belong to claims of another chunk.
pub fn apply_reverts(
    index: &mut ClaimIndex,
    buckets: &mut BucketMap,
    reverts: &[Revert],
    stats: &mut ReconcileStats,
) {
    for revert in reverts {
        let Some(claim) = index.claims.get_mut(&revert.claim_id) else {
            crate::log_record_skipped!("revert", revert.id, "no accepted claim with that id");
            stats.reverts_unmatched += 1;
            continue;
        };

        if claim.reverted {
            tracing::warn!(
                revert_id = %revert.id,
                claim_id = %revert.claim_id,
                "Claim already reverted, ignoring repeated revert"
            );
            stats.repeated_reverts += 1;
            continue;
        }

        // Every indexed claim created its bucket in fold_claims
        if let Some(bucket) = buckets.get_mut(&claim.key) {
            bucket.revert_claim(claim.price, claim.quantity);
            claim.reverted = true;
            stats.reverts_applied += 1;
        }
    }
}

/// Merges partial bucket maps by key-wise summation
pub fn merge_buckets<I>(partials: I) -> BucketMap
where
    I: IntoIterator<Item = BucketMap>,
{
    let mut merged = BucketMap::new();
    for partial in partials {
        for (key, bucket) in partial {
            match merged.entry(key) {
                Entry::Occupied(mut existing) => existing.get_mut().merge(&bucket),
                Entry::Vacant(slot) => {
                    slot.insert(bucket);
                }
            }
        }
    }
    merged
}
