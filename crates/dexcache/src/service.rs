//! Cache-backed fetcher
//!
//! Every read goes store first, remote second. Fresh entries are served as
//! stored; stale or unreadable entries are deleted and re-fetched. Writes are
//! best effort: a full store triggers one eviction pass and one retry, after
//! which the payload is returned uncached.

use std::fmt;
use std::sync::Arc;

use dexstore::Store;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::ability::AbilityResponse;
use crate::clock::{Clock, SystemClock};
use crate::config::CacheConfig;
use crate::entry::CacheEntry;
use crate::error::{DexError, DexResult};
use crate::evolution::EvolutionChainResponse;
use crate::eviction::write_with_eviction;
use crate::lists::Lists;
use crate::model::{Entity, NameIndexResponse, PokemonResponse, SpeciesResponse};
use crate::query::normalize_query;
use crate::remote::{HttpRemote, Remote};
use crate::stats::CacheStats;

/// Where a fetched payload came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Fresh entry from the local store
    Cache,
    /// Read from the API
    Remote,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Cache => write!(f, "CACHE"),
            Origin::Remote => write!(f, "REMOTE"),
        }
    }
}

/// A payload and its origin
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    /// Payload
    pub data: T,
    /// Where the payload came from
    pub origin: Origin,
}

impl<T> Fetched<T> {
    /// Transform the payload, keeping the origin
    pub fn try_map<U>(self, f: impl FnOnce(T) -> DexResult<U>) -> DexResult<Fetched<U>> {
        Ok(Fetched {
            data: f(self.data)?,
            origin: self.origin,
        })
    }
}

/// Store-first reader for the creature-data API
pub struct CacheService {
    config: Arc<CacheConfig>,
    store: Arc<dyn Store>,
    remote: Arc<dyn Remote>,
    clock: Arc<dyn Clock>,
    stats: Arc<CacheStats>,
    lists: Lists,
}

impl CacheService {
    /// Create a service from its collaborators
    pub fn new(
        config: CacheConfig,
        store: Arc<dyn Store>,
        remote: Arc<dyn Remote>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let config = Arc::new(config);
        let stats = Arc::new(CacheStats::new());
        let lists = Lists::with_stats(store.clone(), config.clone(), stats.clone());

        Self {
            config,
            store,
            remote,
            clock,
            stats,
            lists,
        }
    }

    /// Service over HTTP and the wall clock
    pub fn over_http(config: CacheConfig, store: Arc<dyn Store>) -> DexResult<Self> {
        let remote = HttpRemote::new(&config)?;
        Ok(Self::new(
            config,
            store,
            Arc::new(remote),
            Arc::new(SystemClock),
        ))
    }

    /// Active configuration
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Counters shared with the lists
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// History and favorites on the same store
    pub fn lists(&self) -> &Lists {
        &self.lists
    }

    /// Fresh entry for `key`, deleting it if stale or unreadable
    fn cached(&self, key: &str) -> Option<Value> {
        let raw = self.store.get(key)?;

        match serde_json::from_str::<CacheEntry>(&raw) {
            Ok(entry) if entry.is_fresh(self.clock.now_ms(), self.config.ttl_ms()) => {
                Some(entry.data)
            }
            Ok(entry) => {
                debug!(key, written = entry.timestamp, "cache entry expired");
                self.discard(key);
                None
            }
            Err(e) => {
                debug!(key, error = %e, "cache entry unreadable, refetching");
                self.discard(key);
                None
            }
        }
    }

    fn discard(&self, key: &str) {
        self.stats.record_expiration();
        if let Err(e) = self.store.remove(key) {
            warn!(key, error = %e, "failed to delete stale cache entry");
        }
    }

    fn persist(&self, key: &str, data: &Value) {
        let entry = CacheEntry {
            timestamp: self.clock.now_ms(),
            data: data.clone(),
        };
        let raw = match serde_json::to_string(&entry) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, error = %e, "failed to encode cache entry");
                return;
            }
        };

        if let Err(e) = write_with_eviction(
            self.store.as_ref(),
            &self.config.cache_prefix,
            key,
            &raw,
            &self.stats,
        ) {
            self.stats.record_dropped_write();
            warn!(key, error = %e, "payload not cached");
        }
    }

    /// Read `path`, serving a fresh cached copy under `cache_key` if present
    pub async fn fetch_resource(&self, path: &str, cache_key: &str) -> DexResult<Fetched<Value>> {
        let key = self.config.cache_key(cache_key);

        if let Some(data) = self.cached(&key) {
            self.stats.record_hit();
            debug!(key = %key, "cache hit");
            return Ok(Fetched {
                data,
                origin: Origin::Cache,
            });
        }

        self.stats.record_miss();
        let data = self.remote.get_json(path).await?;
        self.persist(&key, &data);

        Ok(Fetched {
            data,
            origin: Origin::Remote,
        })
    }

    /// [`CacheService::fetch_resource`] decoded into `T`
    pub async fn fetch_typed<T: DeserializeOwned>(
        &self,
        path: &str,
        cache_key: &str,
    ) -> DexResult<Fetched<T>> {
        let decoded = self.fetch_resource(path, cache_key).await?.try_map(|data| {
            serde_json::from_value(data).map_err(|e| DexError::InvalidResponse {
                path: path.to_string(),
                message: e.to_string(),
            })
        });
        self.forget_on_error(cache_key, decoded)
    }

    /// Drop the entry behind a payload that failed validation
    fn forget_on_error<T>(&self, cache_key: &str, result: DexResult<T>) -> DexResult<T> {
        if result.is_err() {
            let key = self.config.cache_key(cache_key);
            match self.store.remove(&key) {
                Ok(()) => debug!(key = %key, "dropped cache entry that failed validation"),
                Err(e) => warn!(key = %key, error = %e, "failed to drop invalid cache entry"),
            }
        }
        result
    }

    /// Look up a creature by name or id
    pub async fn fetch_pokemon(&self, query: &str) -> DexResult<Fetched<Entity>> {
        let query = normalize_query(query)?;
        let cache_key = format!("pk_{}", query);
        let fetched = self
            .fetch_typed::<PokemonResponse>(&format!("pokemon/{}", query), &cache_key)
            .await?;
        self.forget_on_error(&cache_key, fetched.try_map(Entity::from_response))
    }

    /// Species record, which links to the evolution chain
    pub async fn fetch_species(&self, id: u32) -> DexResult<Fetched<SpeciesResponse>> {
        self.fetch_typed(&format!("pokemon-species/{}", id), &format!("sp_{}", id))
            .await
    }

    /// Evolution chain by id
    pub async fn fetch_evolution_chain(
        &self,
        id: u32,
    ) -> DexResult<Fetched<EvolutionChainResponse>> {
        self.fetch_typed(&format!("evolution-chain/{}", id), &format!("evo_{}", id))
            .await
    }

    /// Look up an ability by name or id
    pub async fn fetch_ability(&self, query: &str) -> DexResult<Fetched<AbilityResponse>> {
        let query = normalize_query(query)?;
        self.fetch_typed(&format!("ability/{}", query), &format!("ab_{}", query))
            .await
    }

    /// Every creature name, for suggestions
    pub async fn fetch_name_index(&self) -> DexResult<Vec<String>> {
        let index: Fetched<NameIndexResponse> =
            self.fetch_typed("pokemon?limit=1000", "all_names").await?;
        Ok(index.data.results.into_iter().map(|r| r.name).collect())
    }

    /// Number of entries under the cache prefix
    pub fn cache_len(&self) -> usize {
        self.store.keys_with_prefix(&self.config.cache_prefix).len()
    }

    /// Remove every cache entry, returning how many were removed
    ///
    /// Lists are not touched.
    pub fn clear_cache(&self) -> DexResult<usize> {
        let keys = self.store.keys_with_prefix(&self.config.cache_prefix);
        for key in &keys {
            self.store.remove(key)?;
        }
        debug!(removed = keys.len(), "cache cleared");
        Ok(keys.len())
    }
}
