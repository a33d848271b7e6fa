//! The store capability shared by every backend

use crate::error::Result;

/// Synchronous string-keyed storage with a finite capacity.
///
/// Implementations may reject a `set` with [`crate::Error::QuotaExceeded`];
/// a rejected write must not modify the store.
pub trait Store: Send + Sync {
    /// Get the value stored at `key`
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` at `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing an absent key is not an error
    fn remove(&self, key: &str) -> Result<()>;

    /// All keys currently stored, in no particular order
    fn keys(&self) -> Vec<String>;

    /// Check whether `key` is present
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// All keys starting with `prefix`
    fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.keys()
            .into_iter()
            .filter(|key| key.starts_with(prefix))
            .collect()
    }
}
