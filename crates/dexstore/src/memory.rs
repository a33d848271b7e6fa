//! MemoryStore: a quota-bounded table with no persistence

use parking_lot::RwLock;

use crate::error::Result;
use crate::store::Store;
use crate::table::Table;

/// In-memory store, optionally bounded by a byte capacity
pub struct MemoryStore {
    table: RwLock<Table>,
}

impl MemoryStore {
    /// Create an unbounded store
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table::new(None)),
        }
    }

    /// Create a store that rejects writes past `capacity` bytes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            table: RwLock::new(Table::new(Some(capacity))),
        }
    }

    /// Bytes currently occupied by keys and values
    pub fn usage(&self) -> usize {
        self.table.read().used()
    }

    /// Configured capacity, if any
    pub fn capacity(&self) -> Option<usize> {
        self.table.read().capacity()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.table.read().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.table.read().len() == 0
    }

    /// Remove every entry
    pub fn clear(&self) {
        self.table.write().clear();
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.table.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        Table::validate(key, value)?;
        let mut table = self.table.write();
        table.check_capacity(key, value)?;
        table.insert(key, value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.table.write().remove(key);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.table.read().keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_set_and_get() {
        let store = MemoryStore::new();

        store.set("poke_history", "[]").unwrap();
        assert_eq!(store.get("poke_history").as_deref(), Some("[]"));
        assert!(store.contains("poke_history"));
        assert_eq!(store.get("missing"), None);
    }

    #[test]
    fn test_overwrite_keeps_single_entry() {
        let store = MemoryStore::new();

        store.set("k", "one").unwrap();
        store.set("k", "two").unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("k").as_deref(), Some("two"));
        assert_eq!(store.usage(), 4);
    }

    #[test]
    fn test_quota_rejects_without_mutation() {
        let store = MemoryStore::with_capacity(16);
        store.set("a", "0123456789").unwrap(); // 11 bytes

        let result = store.set("b", "0123456789");
        assert!(matches!(result, Err(Error::QuotaExceeded { .. })));
        assert_eq!(store.get("b"), None);
        assert_eq!(store.usage(), 11);

        // Freeing space lets the write through
        store.remove("a").unwrap();
        store.set("b", "0123456789").unwrap();
        assert_eq!(store.get("b").as_deref(), Some("0123456789"));
    }

    #[test]
    fn test_keys_with_prefix() {
        let store = MemoryStore::new();
        store.set("poke_cache_pk_1", "{}").unwrap();
        store.set("poke_cache_pk_2", "{}").unwrap();
        store.set("poke_favs", "[]").unwrap();

        let mut keys = store.keys_with_prefix("poke_cache_");
        keys.sort();
        assert_eq!(keys, vec!["poke_cache_pk_1", "poke_cache_pk_2"]);
    }

    #[test]
    fn test_remove_absent_is_ok() {
        let store = MemoryStore::new();
        assert!(store.remove("nothing").is_ok());
        assert!(store.is_empty());
    }
}
