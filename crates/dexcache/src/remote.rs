//! Remote resource reads
//!
//! This is the only place that interprets HTTP status codes. Callers see
//! either a JSON body or a [`DexError`].

use async_trait::async_trait;
use reqwest::Url;
use tracing::debug;

use crate::config::CacheConfig;
use crate::error::{DexError, DexResult};

/// Read-only access to the creature-data API
#[async_trait]
pub trait Remote: Send + Sync {
    /// GET `{base}/{path}` and parse the body as JSON
    async fn get_json(&self, path: &str) -> DexResult<serde_json::Value>;
}

/// reqwest-backed remote
#[derive(Debug, Clone)]
pub struct HttpRemote {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRemote {
    /// Build a remote from the service configuration
    pub fn new(config: &CacheConfig) -> DexResult<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("dex/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| DexError::Config {
            message: format!("failed to build HTTP client: {}", e),
        })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve `path` against the base URL; unsafe characters are escaped
    pub fn url_for(&self, path: &str) -> DexResult<Url> {
        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        Url::parse(&raw).map_err(|e| DexError::Config {
            message: format!("invalid resource URL {}: {}", raw, e),
        })
    }
}

#[async_trait]
impl Remote for HttpRemote {
    async fn get_json(&self, path: &str) -> DexResult<serde_json::Value> {
        let url = self.url_for(path)?;
        debug!(%url, "remote read");

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(DexError::NotFound {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| DexError::Network {
                message: format!("failed to read response body for {}: {}", path, e),
            })
    }
}
