//! Store Module
//!
//! The key-value contract the cache manager writes through, and its default
//! in-process implementation.

mod entry;
mod memory;
mod stats;

pub use entry::{current_timestamp_ms, ExpirationPolicy, StoreEntry};
pub use memory::MemoryStore;
pub use stats::StoreStats;

// == Key-Value Store ==
/// Minimal byte store behind the cache manager.
///
/// Implementations never fail: a missing key and an expired key both read as
/// `None`, and removing an absent key is a no-op. There is no enumeration and
/// no compare-and-swap; callers that need atomic read-modify-write must lock
/// around it themselves.
pub trait KeyValueStore: Send + Sync {
    /// Returns the bytes stored under `key`, if any.
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Stores `value` under `key`, replacing anything already there.
    fn set(&self, key: &str, value: Vec<u8>, policy: &ExpirationPolicy);

    /// Removes `key` from the store.
    fn remove(&self, key: &str);
}
