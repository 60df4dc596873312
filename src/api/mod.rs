//! API Module
//!
//! HTTP handlers and routing for the cache admin API.
//!
//! # Endpoints
//! - `GET /caches` - List logical caches
//! - `DELETE /caches` - Clear every logical cache
//! - `GET /caches/:name` - Show one logical cache
//! - `DELETE /caches/:name` - Clear one logical cache
//! - `GET /stats` - Store statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
