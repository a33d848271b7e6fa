//! Error types for the cache layer

/// Cache and fetch errors
#[derive(Debug, thiserror::Error)]
pub enum DexError {
    /// Remote answered with a non-success status
    #[error("not found: {path} (status {status})")]
    NotFound {
        /// Resource path relative to the base URL
        path: String,
        /// HTTP status code
        status: u16,
    },

    /// Transport failure talking to the remote
    #[error("network error: {message}")]
    Network {
        /// Underlying transport error
        message: String,
    },

    /// Payload did not have the expected shape
    #[error("invalid response for {path}: {message}")]
    InvalidResponse {
        /// Resource path or store key the payload came from
        path: String,
        /// Decode or validation failure
        message: String,
    },

    /// Local store stayed full after eviction
    #[error("storage quota exceeded: {message}")]
    StorageQuota {
        /// Store error from the retried write
        message: String,
    },

    /// Any other local store failure
    #[error("store error: {0}")]
    Store(dexstore::Error),

    /// Rejected user input
    #[error("invalid query: {message}")]
    InvalidQuery {
        /// What was wrong with the input
        message: String,
    },

    /// Configuration error
    #[error("configuration error: {message}")]
    Config {
        /// What was wrong with the setting
        message: String,
    },
}

impl DexError {
    /// Exit code for CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => 1,
            Self::InvalidQuery { .. } => 1,
            Self::Config { .. } => 1,

            Self::Network { .. } => 2,
            Self::InvalidResponse { .. } => 2,

            Self::StorageQuota { .. } => 3,
            Self::Store(_) => 3,
        }
    }

    /// Whether the remote reported the resource as absent
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<dexstore::Error> for DexError {
    fn from(err: dexstore::Error) -> Self {
        match err {
            dexstore::Error::QuotaExceeded {
                requested,
                available,
            } => Self::StorageQuota {
                message: format!("write needs {} bytes, {} available", requested, available),
            },
            other => Self::Store(other),
        }
    }
}

impl From<reqwest::Error> for DexError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}

/// Result type for cache operations
pub type DexResult<T> = Result<T, DexError>;
