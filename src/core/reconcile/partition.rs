//! Parallel partitioning of a reconciliation pass
//!
//! Claims are split into contiguous chunks of `ceil(len / workers)`. Each chunk is
//! folded on a blocking worker against the full revert set, and the partial bucket
//! maps are summed. A revert whose claim lives in another chunk finds nothing in this
//! chunk's index and is ignored here; the owning chunk applies it.
//!
//! Duplicate claim ids are only detected within a chunk. With
//! [`PartitionOptions::global_dedup`] a single-threaded pre-pass applies the
//! allow-list and drops duplicate ids before the fan-out, so the merged result
//! matches [`reconcile`] for any input.

use super::allow_list::{admits, AllowList};
use super::engine::{
    apply_reverts, fold_claims, merge_buckets, reconcile, BucketMap, ReconcileStats,
    Reconciliation,
};
use crate::domain::{Claim, ClaimId, Result, Revert, RxLedgerError};
use futures::future::try_join_all;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

/// How a pass is split across workers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionOptions {
    /// Maximum number of concurrent chunks
    pub workers: usize,
    /// Drop cross-chunk duplicates before partitioning
    pub global_dedup: bool,
}

impl Default for PartitionOptions {
    fn default() -> Self {
        Self {
            workers: 10,
            global_dedup: true,
        }
    }
}

/// Chunk size for `len` claims over `workers`, never below 1
pub fn chunk_size(len: usize, workers: usize) -> usize {
    len.div_ceil(workers.max(1)).max(1)
}

/// Number of chunks `len` claims split into over `workers`
pub fn chunk_count(len: usize, workers: usize) -> usize {
    len.div_ceil(chunk_size(len, workers))
}

/// Result of the dedup pre-pass
#[derive(Debug)]
struct Prepared {
    claims: Arc<Vec<Claim>>,
    filtered: usize,
    duplicates: usize,
}

/// Applies the allow-list and first-occurrence-wins dedup in input order
fn prepare_claims(claims: &[Claim], allowed: Option<&AllowList>) -> Prepared {
    let mut seen: HashSet<&ClaimId> = HashSet::with_capacity(claims.len());
    let mut kept = Vec::with_capacity(claims.len());
    let mut filtered = 0;
    let mut duplicates = 0;

    for claim in claims {
        if !admits(allowed, &claim.npi) {
            filtered += 1;
        } else if !seen.insert(&claim.id) {
            crate::log_record_skipped!("claim", claim.id, "duplicate claim id");
            duplicates += 1;
        } else {
            kept.push(claim.clone());
        }
    }

    Prepared {
        claims: Arc::new(kept),
        filtered,
        duplicates,
    }
}

/// Reconciles claims against reverts using up to `options.workers` blocking workers
///
/// Falls back to a direct [`reconcile`] call when everything fits in one chunk.
///
/// # Errors
///
/// Returns [`RxLedgerError::Engine`] if any worker panics. Partial results are
/// discarded; there is no result without every chunk.
pub async fn reconcile_partitioned(
    claims: Arc<Vec<Claim>>,
    reverts: Arc<Vec<Revert>>,
    allowed: Option<Arc<AllowList>>,
    options: PartitionOptions,
) -> Result<Reconciliation> {
    if options.workers == 0 {
        return Err(RxLedgerError::Validation(
            "worker count must be at least 1".to_string(),
        ));
    }

    let started = Instant::now();
    let mut pre_stats = ReconcileStats::default();

    // After the pre-pass every remaining claim is admitted and unique
    let (claims, allowed) = if options.global_dedup {
        let prepared = prepare_claims(&claims, allowed.as_deref());
        pre_stats.claims_filtered = prepared.filtered;
        pre_stats.duplicate_claims = prepared.duplicates;
        (prepared.claims, None)
    } else {
        (claims, allowed)
    };

    let chunks = chunk_count(claims.len(), options.workers);
    if chunks <= 1 {
        let mut result = reconcile(&claims, &reverts, allowed.as_deref());
        result.stats.merge(&pre_stats);
        return Ok(result);
    }

    let size = chunk_size(claims.len(), options.workers);
    crate::log_pass_start!(claims.len(), reverts.len(), chunks);

    let tasks = (0..chunks).map(|chunk| {
        let claims = Arc::clone(&claims);
        let reverts = Arc::clone(&reverts);
        let allowed = allowed.clone();
        let start = chunk * size;
        let end = (start + size).min(claims.len());

        tokio::task::spawn_blocking(move || {
            let mut stats = ReconcileStats::default();
            let (mut index, mut buckets) =
                fold_claims(&claims[start..end], allowed.as_deref(), &mut stats);
            apply_reverts(&mut index, &mut buckets, &reverts, &mut stats);
            tracing::trace!(chunk, start, end, buckets = buckets.len(), "Chunk folded");
            (buckets, stats)
        })
    });

    let partials = try_join_all(tasks).await?;

    let mut stats = pre_stats;
    let mut bucket_maps: Vec<BucketMap> = Vec::with_capacity(partials.len());
    for (buckets, partial) in partials {
        stats.merge(&partial);
        bucket_maps.push(buckets);
    }
    // Each chunk reports every foreign revert as unmatched; count them once
    stats.reverts_unmatched = reverts
        .len()
        .saturating_sub(stats.reverts_applied + stats.repeated_reverts);

    let buckets = merge_buckets(bucket_maps);
    crate::log_pass_complete!(buckets.len(), started.elapsed());

    Ok(Reconciliation {
        buckets,
        stats,
        chunks,
    })
}
