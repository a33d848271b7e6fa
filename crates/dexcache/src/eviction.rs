//! Quota-driven eviction of cache entries
//!
//! Runs only after a write was rejected for capacity. Removes the oldest half
//! of the namespaced entries by write timestamp, and at least one.

use dexstore::Store;
use tracing::warn;

use crate::entry::stamp_of;
use crate::stats::CacheStats;

/// Number of entries one eviction pass removes out of `count`
pub fn eviction_batch(count: usize) -> usize {
    if count == 0 {
        0
    } else {
        (count / 2).max(1)
    }
}

/// Evict the oldest entries under `prefix`, returning how many were removed
///
/// Entries that fail to parse rank as timestamp 0. Ties are broken by key.
pub fn evict_oldest(store: &dyn Store, prefix: &str) -> usize {
    let mut ranked: Vec<(i64, String)> = store
        .keys_with_prefix(prefix)
        .into_iter()
        .map(|key| {
            let stamp = store.get(&key).map(|raw| stamp_of(&raw)).unwrap_or(0);
            (stamp, key)
        })
        .collect();
    ranked.sort();

    let batch = eviction_batch(ranked.len());
    let mut removed = 0;
    for (_, key) in ranked.into_iter().take(batch) {
        match store.remove(&key) {
            Ok(()) => removed += 1,
            Err(e) => warn!(key = %key, error = %e, "failed to evict cache entry"),
        }
    }

    warn!(
        candidates = batch,
        removed, prefix, "store full, evicted oldest cache entries"
    );
    removed
}

/// Write `value`, evicting once and retrying once if the store is full
///
/// Errors other than a capacity rejection are returned without a retry.
pub(crate) fn write_with_eviction(
    store: &dyn Store,
    prefix: &str,
    key: &str,
    value: &str,
    stats: &CacheStats,
) -> dexstore::Result<()> {
    match store.set(key, value) {
        Err(e) if e.is_quota_exceeded() => {
            let removed = evict_oldest(store, prefix);
            stats.record_evictions(removed);
            store.set(key, value)
        }
        other => other,
    }
}
