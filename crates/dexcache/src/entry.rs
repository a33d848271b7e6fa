//! Stored cache entry format

use serde::{Deserialize, Serialize};

/// A cached payload and the time it was written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Write time, epoch milliseconds
    pub timestamp: i64,
    /// Payload exactly as fetched
    pub data: serde_json::Value,
}

impl CacheEntry {
    /// Whether the entry may still be served at `now_ms`
    pub fn is_fresh(&self, now_ms: i64, ttl_ms: i64) -> bool {
        now_ms.saturating_sub(self.timestamp) < ttl_ms
    }
}

/// Timestamp-only view used when ranking entries for eviction
#[derive(Debug, Deserialize)]
pub(crate) struct Stamp {
    #[serde(default)]
    pub timestamp: i64,
}

/// Timestamp of a raw stored entry; anything unreadable ranks as oldest
pub(crate) fn stamp_of(raw: &str) -> i64 {
    serde_json::from_str::<Stamp>(raw)
        .map(|stamp| stamp.timestamp)
        .unwrap_or(0)
}
