//! API Handlers
//!
//! HTTP request handlers for the admin endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::{CacheManager, CacheOptions, LogicalCache};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    CacheContentResponse, CacheSummary, ClearResponse, HealthResponse, StatsResponse,
};
use crate::store::MemoryStore;

/// Application state shared across all handlers.
///
/// The manager writes through `store`; the concrete store is kept alongside
/// for statistics and the expiration sweep.
#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<CacheManager>,
    pub store: Arc<MemoryStore>,
}

impl AppState {
    /// Creates a new AppState with a manager over the given store.
    pub fn new(store: Arc<MemoryStore>, options: CacheOptions) -> Self {
        let manager = CacheManager::new(store.clone(), options);
        Self {
            manager: Arc::new(manager),
            store,
        }
    }

    /// Creates a new AppState over a fresh store from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(MemoryStore::new()), config.cache_options())
    }
}

/// Handler for GET /caches
///
/// Lists every logical cache with its store key.
pub async fn list_caches_handler(State(state): State<AppState>) -> Json<Vec<CacheSummary>> {
    let summaries = LogicalCache::ALL
        .iter()
        .map(|cache| {
            let key = state.manager.key_for(*cache);
            CacheSummary {
                name: cache.name().to_string(),
                expires_in_ms: state.store.ttl_remaining_ms(&key),
                populated: state.manager.is_populated(*cache),
                key,
            }
        })
        .collect();

    Json(summaries)
}

/// Handler for GET /caches/:name
///
/// Returns the stored dictionary of one logical cache.
pub async fn get_cache_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<CacheContentResponse>> {
    let cache: LogicalCache = name.parse()?;
    let value = state
        .manager
        .raw_entry(cache)?
        .ok_or_else(|| CacheError::NotFound(cache.name().to_string()))?;

    Ok(Json(CacheContentResponse {
        name: cache.name().to_string(),
        key: state.manager.key_for(cache),
        value,
    }))
}

/// Handler for DELETE /caches/:name
///
/// Clears one logical cache.
pub async fn clear_cache_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ClearResponse>> {
    let cache: LogicalCache = name.parse()?;
    state.manager.clear(cache);

    Ok(Json(ClearResponse::new(vec![cache.name().to_string()])))
}

/// Handler for DELETE /caches
///
/// Clears every logical cache.
pub async fn clear_all_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    state.manager.clear_all();

    Json(ClearResponse::new(
        LogicalCache::ALL
            .iter()
            .map(|cache| cache.name().to_string())
            .collect(),
    ))
}

/// Handler for GET /stats
///
/// Returns current store statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.store.stats()))
}

/// Handler for GET /health
///
/// Returns health status of the host.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ExpirationPolicy;
    use uuid::Uuid;

    fn test_state() -> AppState {
        AppState::new(Arc::new(MemoryStore::new()), CacheOptions::default())
    }

    #[tokio::test]
    async fn test_get_cache_handler_populated() {
        let state = test_state();
        let id = Uuid::new_v4();
        state
            .manager
            .set_tenant_id("https://a.example/", id)
            .unwrap();

        let response = get_cache_handler(State(state), Path("TenantIds".to_string()))
            .await
            .unwrap();

        assert_eq!(response.name, "TenantIds");
        assert_eq!(response.value["https://a.example"], id.to_string());
    }

    #[tokio::test]
    async fn test_get_cache_handler_empty() {
        let state = test_state();

        let result = get_cache_handler(State(state), Path("TenantIds".to_string())).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_cache_handler_unknown_name() {
        let state = test_state();

        let result = get_cache_handler(State(state), Path("Bogus".to_string())).await;
        assert!(matches!(result, Err(CacheError::UnknownCache(_))));
    }

    #[tokio::test]
    async fn test_clear_cache_handler() {
        let state = test_state();
        state.manager.set_blog_list_name(1033, "Posts").unwrap();

        let response = clear_cache_handler(State(state.clone()), Path("bloglistnames".to_string()))
            .await
            .unwrap();

        assert_eq!(response.cleared, vec!["BlogListNames".to_string()]);
        assert_eq!(state.manager.blog_list_name(1033).unwrap(), "");
    }

    #[tokio::test]
    async fn test_clear_all_handler() {
        let state = test_state();
        state.manager.set_blog_list_name(1033, "Posts").unwrap();
        state.manager.set_exact_version("https://a.example", "16.0.1").unwrap();

        let response = clear_all_handler(State(state.clone())).await;

        assert_eq!(response.cleared.len(), LogicalCache::COUNT);
        assert!(state.store.is_empty());
    }

    #[tokio::test]
    async fn test_list_caches_handler() {
        let state = test_state();
        state.manager.set_blog_list_name(1033, "Posts").unwrap();

        let response = list_caches_handler(State(state)).await;

        assert_eq!(response.len(), LogicalCache::COUNT);
        let blog = response.iter().find(|c| c.name == "BlogListNames").unwrap();
        assert!(blog.populated);
        let tenants = response.iter().find(|c| c.name == "TenantIds").unwrap();
        assert!(!tenants.populated);
        assert!(blog.expires_in_ms.is_none());
    }

    #[tokio::test]
    async fn test_list_caches_handler_reports_expiry() {
        let options = CacheOptions::new(None, ExpirationPolicy::AfterSeconds(300));
        let state = AppState::new(Arc::new(MemoryStore::new()), options);
        state.manager.set_blog_list_name(1033, "Posts").unwrap();

        let response = list_caches_handler(State(state)).await;

        let blog = response.iter().find(|c| c.name == "BlogListNames").unwrap();
        let remaining = blog.expires_in_ms.unwrap();
        assert!(remaining > 290_000 && remaining <= 300_000);
        let tenants = response.iter().find(|c| c.name == "TenantIds").unwrap();
        assert!(tenants.expires_in_ms.is_none());
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
