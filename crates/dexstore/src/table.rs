//! In-memory table with byte-quota accounting
//!
//! Usage is the sum of key and value lengths in bytes. The table itself is
//! not synchronized; backends wrap it in a lock.

use std::collections::HashMap;
use ahash::RandomState;

use crate::error::{Error, Result};

/// Map of live entries plus the bytes they occupy
pub(crate) struct Table {
    entries: HashMap<String, String, RandomState>,
    used: usize,
    capacity: Option<usize>,
}

impl Table {
    pub(crate) fn new(capacity: Option<usize>) -> Self {
        Self {
            entries: HashMap::with_hasher(RandomState::new()),
            used: 0,
            capacity,
        }
    }

    pub(crate) fn get(&self, key: &str) -> Option<&String> {
        self.entries.get(key)
    }

    /// Reject keys and values the log format cannot represent
    pub(crate) fn validate(key: &str, value: &str) -> Result<()> {
        if key.contains(['\t', '\n']) {
            return Err(Error::InvalidKey(key.to_string()));
        }
        if value.contains('\n') {
            return Err(Error::InvalidValue(key.to_string()));
        }
        Ok(())
    }

    /// Check that replacing `key` with `value` stays within capacity
    pub(crate) fn check_capacity(&self, key: &str, value: &str) -> Result<()> {
        let Some(capacity) = self.capacity else {
            return Ok(());
        };

        let requested = key.len() + value.len();
        let released = self
            .entries
            .get(key)
            .map(|old| key.len() + old.len())
            .unwrap_or(0);
        let available = capacity.saturating_sub(self.used - released);

        if requested > available {
            return Err(Error::QuotaExceeded {
                requested,
                available,
            });
        }
        Ok(())
    }

    /// Insert without a capacity check (used by checked writes and log replay)
    pub(crate) fn insert(&mut self, key: &str, value: &str) {
        let added = key.len() + value.len();
        match self.entries.insert(key.to_string(), value.to_string()) {
            Some(old) => self.used = self.used - (key.len() + old.len()) + added,
            None => self.used += added,
        }
    }

    /// Remove `key`, returning whether it was present
    pub(crate) fn remove(&mut self, key: &str) -> bool {
        match self.entries.remove(key) {
            Some(old) => {
                self.used -= key.len() + old.len();
                true
            }
            None => false,
        }
    }

    pub(crate) fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.entries.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn used(&self) -> usize {
        self.used
    }

    pub(crate) fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.used = 0;
    }
}
