//! # dexcache
//!
//! Store-first fetcher for the creature-data API.
//!
//! ## Architecture
//! - **CacheService**: serves fresh entries from a [`dexstore::Store`], falls
//!   back to a [`Remote`] and writes the result back with a timestamp
//! - **Eviction**: on a full store, drops the oldest half of the cache entries
//!   and retries the write once
//! - **Lists**: history and favorites kept beside the cache under fixed keys
//!
//! Payloads are decoded into typed records at this boundary; the combat math
//! in `dexbattle` only sees [`Entity`] and [`EntitySummary`]

#![warn(missing_docs)]

pub mod ability;
mod clock;
mod config;
mod entry;
mod error;
pub mod evolution;
mod eviction;
mod lists;
pub mod model;
mod query;
mod remote;
mod service;
mod stats;

pub use ability::{AbilityView, DEFAULT_LANG};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{
    CacheConfig, DEFAULT_BASE_URL, DEFAULT_CACHE_PREFIX, DEFAULT_FAVORITES_KEY,
    DEFAULT_HISTORY_KEY, DEFAULT_HISTORY_LIMIT, DEFAULT_TTL,
};
pub use entry::CacheEntry;
pub use error::{DexError, DexResult};
pub use evolution::{tiers, EvolutionStage, EvolutionTiers};
pub use eviction::{evict_oldest, eviction_batch};
pub use lists::{ListKind, Lists};
pub use model::{Entity, EntitySummary};
pub use query::{normalize_query, suggest, SUGGESTION_LIMIT};
pub use remote::{HttpRemote, Remote};
pub use service::{CacheService, Fetched, Origin};
pub use stats::CacheStats;
