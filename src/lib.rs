//! Migration Cache - memoizing lookup cache for site migration tooling
//!
//! Fronts expensive remote lookups (site versions, users, terms, resource
//! strings, field plans, mapping files) with typed, first-write-wins logical
//! caches over a pluggable key-value store.

pub mod api;
pub mod cache;
pub mod codec;
pub mod config;
pub mod error;
pub mod mapping;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheManager, CacheOptions, LogicalCache, Lookup};
pub use config::Config;
pub use error::{CacheError, Result};
pub use store::{ExpirationPolicy, KeyValueStore, MemoryStore};
pub use tasks::spawn_cleanup_task;
