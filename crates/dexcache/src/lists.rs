//! History and favorites lists
//!
//! Each list is one JSON array under a fixed, non-prefixed key. Both lists
//! share the write policy of the cache: on a full store, evict cache entries
//! once and retry once.

use std::fmt;
use std::sync::Arc;

use dexstore::Store;
use tracing::{debug, warn};

use crate::config::CacheConfig;
use crate::error::{DexError, DexResult};
use crate::eviction::write_with_eviction;
use crate::model::EntitySummary;
use crate::stats::CacheStats;

/// Which persisted list to act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// Recently viewed, most recent first
    History,
    /// Marked by the user
    Favorites,
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListKind::History => write!(f, "history"),
            ListKind::Favorites => write!(f, "favorites"),
        }
    }
}

/// History and favorites over a shared store
#[derive(Clone)]
pub struct Lists {
    store: Arc<dyn Store>,
    config: Arc<CacheConfig>,
    stats: Arc<CacheStats>,
}

impl Lists {
    /// Lists with their own statistics
    pub fn new(store: Arc<dyn Store>, config: CacheConfig) -> Self {
        Self::with_stats(store, Arc::new(config), Arc::new(CacheStats::new()))
    }

    pub(crate) fn with_stats(
        store: Arc<dyn Store>,
        config: Arc<CacheConfig>,
        stats: Arc<CacheStats>,
    ) -> Self {
        Self {
            store,
            config,
            stats,
        }
    }

    fn key(&self, kind: ListKind) -> &str {
        match kind {
            ListKind::History => &self.config.history_key,
            ListKind::Favorites => &self.config.favorites_key,
        }
    }

    /// Current contents of a list; unreadable lists read as empty
    pub fn load(&self, kind: ListKind) -> Vec<EntitySummary> {
        let Some(raw) = self.store.get(self.key(kind)) else {
            return Vec::new();
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(list = %kind, error = %e, "stored list is unreadable, treating as empty");
            Vec::new()
        })
    }

    /// Search history, most recent first
    pub fn history(&self) -> Vec<EntitySummary> {
        self.load(ListKind::History)
    }

    /// Favorites in the order they were added
    pub fn favorites(&self) -> Vec<EntitySummary> {
        self.load(ListKind::Favorites)
    }

    fn persist(&self, kind: ListKind, list: &[EntitySummary]) -> DexResult<()> {
        let raw = serde_json::to_string(list).map_err(|e| DexError::InvalidResponse {
            path: self.key(kind).to_string(),
            message: format!("failed to serialize list: {}", e),
        })?;

        write_with_eviction(
            self.store.as_ref(),
            &self.config.cache_prefix,
            self.key(kind),
            &raw,
            &self.stats,
        )
        .map_err(|e| {
            self.stats.record_dropped_write();
            DexError::from(e)
        })
    }

    /// Move `entity` to the front of the history, keeping the newest entries
    ///
    /// Returns whether the list was persisted. A failed write is logged and
    /// the update dropped.
    pub fn record_history(&self, entity: impl Into<EntitySummary>) -> bool {
        let summary = entity.into();
        let mut history = self.history();

        history.retain(|entry| entry.id != summary.id);
        history.insert(0, summary);
        history.truncate(self.config.history_limit);

        match self.persist(ListKind::History, &history) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "history not saved");
                false
            }
        }
    }

    /// Add `entity` to the favorites, or remove it if already there
    ///
    /// Returns `true` when added and `false` when removed. If the list cannot
    /// be persisted the toggle is abandoned and the error returned.
    pub fn toggle_favorite(&self, entity: impl Into<EntitySummary>) -> DexResult<bool> {
        let summary = entity.into();
        let mut favorites = self.favorites();

        let added = match favorites.iter().position(|entry| entry.id == summary.id) {
            Some(index) => {
                favorites.remove(index);
                false
            }
            None => {
                favorites.push(summary);
                true
            }
        };

        self.persist(ListKind::Favorites, &favorites)?;
        debug!(added, "favorites updated");
        Ok(added)
    }

    /// Whether `id` is a favorite
    pub fn is_favorite(&self, id: u32) -> bool {
        self.favorites().iter().any(|entry| entry.id == id)
    }

    /// Delete one entry from a list, returning whether it was present
    pub fn remove(&self, kind: ListKind, id: u32) -> DexResult<bool> {
        let mut list = self.load(kind);
        let before = list.len();
        list.retain(|entry| entry.id != id);

        if list.len() == before {
            return Ok(false);
        }
        self.persist(kind, &list)?;
        Ok(true)
    }

    /// Delete a whole list
    pub fn clear(&self, kind: ListKind) -> DexResult<()> {
        self.store.remove(self.key(kind))?;
        Ok(())
    }
}
