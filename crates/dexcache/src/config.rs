//! Cache service configuration

use std::time::Duration;

use serde::Deserialize;

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Default entry lifetime (5 minutes)
pub const DEFAULT_TTL: Duration = Duration::from_millis(300_000);

/// Namespace shared by every cache entry
pub const DEFAULT_CACHE_PREFIX: &str = "poke_cache_";

/// Key holding the serialized history list
pub const DEFAULT_HISTORY_KEY: &str = "poke_history";

/// Key holding the serialized favorites list
pub const DEFAULT_FAVORITES_KEY: &str = "poke_favs";

/// Most recent history entries kept
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Configuration for [`crate::CacheService`] and [`crate::Lists`]
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// API base URL, without trailing slash
    pub base_url: String,
    /// How long an entry is served from the store
    #[serde(with = "duration_ms")]
    pub ttl: Duration,
    /// Prefix of every cache entry key
    pub cache_prefix: String,
    /// Store key of the history list
    pub history_key: String,
    /// Store key of the favorites list
    pub favorites_key: String,
    /// Maximum history length
    pub history_limit: usize,
    /// Per-request timeout; none by default
    #[serde(with = "duration_ms_opt")]
    pub request_timeout: Option<Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            ttl: DEFAULT_TTL,
            cache_prefix: DEFAULT_CACHE_PREFIX.to_string(),
            history_key: DEFAULT_HISTORY_KEY.to_string(),
            favorites_key: DEFAULT_FAVORITES_KEY.to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            request_timeout: None,
        }
    }
}

impl CacheConfig {
    /// Set the API base URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the entry lifetime
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the history length limit
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Set a per-request timeout
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Entry lifetime in epoch milliseconds
    pub fn ttl_ms(&self) -> i64 {
        i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX)
    }

    /// Full store key for a cache suffix
    pub fn cache_key(&self, suffix: &str) -> String {
        format!("{}{}", self.cache_prefix, suffix)
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(de)?))
    }
}

mod duration_ms_opt {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(de)?.map(Duration::from_millis))
    }
}
