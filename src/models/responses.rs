//! Response DTOs for the admin API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::store::StoreStats;

/// One logical cache as listed by GET /caches
#[derive(Debug, Clone, Serialize)]
pub struct CacheSummary {
    /// Logical cache name
    pub name: String,
    /// Store key the logical cache lives under
    pub key: String,
    /// Whether the store currently holds data for it
    pub populated: bool,
    /// Milliseconds until the stored data expires; None if it never does
    pub expires_in_ms: Option<u64>,
}

/// Response body for GET /caches/:name
#[derive(Debug, Clone, Serialize)]
pub struct CacheContentResponse {
    pub name: String,
    pub key: String,
    /// Stored dictionary, as JSON
    pub value: serde_json::Value,
}

/// Response body for DELETE /caches and DELETE /caches/:name
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Success message
    pub message: String,
    /// Names of the logical caches that were cleared
    pub cleared: Vec<String>,
}

impl ClearResponse {
    /// Creates a new ClearResponse
    pub fn new(cleared: Vec<String>) -> Self {
        let message = match cleared.as_slice() {
            [single] => format!("Logical cache '{}' cleared", single),
            all => format!("{} logical caches cleared", all.len()),
        };
        Self { message, cleared }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of store reads that found data
    pub hits: u64,
    /// Number of store reads that found nothing
    pub misses: u64,
    /// Number of entries dropped after expiring
    pub expirations: u64,
    /// Current number of entries in the store
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<StoreStats> for StatsResponse {
    fn from(stats: StoreStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
