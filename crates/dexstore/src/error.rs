//! Error types for dexstore

use std::io;

/// Result type alias for dexstore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for store operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Write rejected because it would exceed the store capacity
    #[error("Quota exceeded: write needs {requested} bytes, {available} available")]
    QuotaExceeded {
        /// Bytes the write would occupy
        requested: usize,
        /// Bytes still free before the write
        available: usize,
    },

    /// Key contains a record separator
    #[error("Invalid key: {0:?}")]
    InvalidKey(String),

    /// Value contains a record separator
    #[error("Invalid value for key {0:?}")]
    InvalidValue(String),

    /// Store is closed
    #[error("Store is closed")]
    Closed,
}

impl Error {
    /// Whether the error is a capacity rejection
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, Error::QuotaExceeded { .. })
    }
}

impl From<nom::Err<nom::error::Error<&[u8]>>> for Error {
    fn from(err: nom::Err<nom::error::Error<&[u8]>>) -> Self {
        Error::Parse(format!("{:?}", err))
    }
}
