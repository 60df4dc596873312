//! API Routes
//!
//! Configures the Axum router with all admin endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_all_handler, clear_cache_handler, get_cache_handler, health_handler,
    list_caches_handler, stats_handler, AppState,
};

/// Creates the admin router.
///
/// # Endpoints
/// - `GET /caches` - List logical caches
/// - `DELETE /caches` - Clear every logical cache
/// - `GET /caches/:name` - Show one logical cache
/// - `DELETE /caches/:name` - Clear one logical cache
/// - `GET /stats` - Store statistics
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/caches", get(list_caches_handler).delete(clear_all_handler))
        .route(
            "/caches/:name",
            get(get_cache_handler).delete(clear_cache_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
