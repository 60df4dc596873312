//! Memory Store Module
//!
//! Default in-process backing store: a HashMap of byte entries with
//! per-entry expiration.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use crate::store::{ExpirationPolicy, KeyValueStore, StoreEntry, StoreStats};

// == Memory Store ==
/// In-memory byte store with lazy and sweep-based expiration.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, StoreEntry>,
    stats: StoreStats,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Stats ==
    /// Returns current store statistics.
    pub fn stats(&self) -> StoreStats {
        let inner = self.inner.read();
        let mut stats = inner.stats.clone();
        stats.set_total_entries(inner.entries.len());
        stats
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&self) -> usize {
        let mut guard = self.inner.write();
        let inner = &mut *guard;
        let before = inner.entries.len();
        inner.entries.retain(|_, entry| !entry.is_expired());

        let removed = before - inner.entries.len();
        inner.stats.record_expirations(removed);
        inner.stats.set_total_entries(inner.entries.len());
        removed
    }

    // == Length ==
    /// Returns the current number of entries, expired ones included until swept.
    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.inner.read().entries.is_empty()
    }

    // == Time To Live ==
    /// Remaining lifetime of `key` in milliseconds.
    ///
    /// `None` when the key is absent or never expires. Does not count as a
    /// read in the statistics.
    pub fn ttl_remaining_ms(&self, key: &str) -> Option<u64> {
        self.inner
            .read()
            .entries
            .get(key)
            .and_then(|entry| entry.ttl_remaining_ms())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        // Write lock: expired entries are dropped and stats updated on read
        let mut guard = self.inner.write();
        let inner = &mut *guard;

        match inner.entries.get(key) {
            Some(entry) if !entry.is_expired() => {
                inner.stats.record_hit();
                return Some(entry.bytes.clone());
            }
            Some(_) => {
                debug!(key, "Store entry expired");
                inner.entries.remove(key);
                inner.stats.record_expirations(1);
                inner.stats.set_total_entries(inner.entries.len());
            }
            None => {}
        }

        inner.stats.record_miss();
        None
    }

    fn set(&self, key: &str, value: Vec<u8>, policy: &ExpirationPolicy) {
        let mut guard = self.inner.write();
        let inner = &mut *guard;
        inner
            .entries
            .insert(key.to_string(), StoreEntry::new(value, policy));
        inner.stats.set_total_entries(inner.entries.len());
    }

    fn remove(&self, key: &str) {
        let mut guard = self.inner.write();
        let inner = &mut *guard;
        if inner.entries.remove(key).is_some() {
            inner.stats.set_total_entries(inner.entries.len());
        }
    }
}
