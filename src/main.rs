//! Migration Cache host
//!
//! Owns the process-wide cache, preloads configured mapping files and serves
//! the admin API.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use migration_cache::{api::create_router, spawn_cleanup_task, AppState, Config};

/// Main entry point for the cache host.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the store and cache manager
/// 4. Preload configured mapping files
/// 5. Start background expiration sweep
/// 6. Serve the admin API until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "migration_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Migration Cache host");

    let config = Config::from_env();
    info!(
        "Configuration loaded: key_prefix={:?}, default_ttl={}s, port={}, cleanup_interval={}s",
        config.key_prefix, config.default_ttl, config.server_port, config.cleanup_interval
    );

    let state = AppState::from_config(&config);
    info!("Cache manager initialized");

    preload_mappings(&state, &config);

    let cleanup_handle = spawn_cleanup_task(state.store.clone(), config.cleanup_interval);
    info!("Background expiration sweep started");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Admin API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("admin API server failed")?;

    info!("Shutdown complete");
    Ok(())
}

/// Loads the mapping files named in the configuration so the first
/// transformation does not pay for the disk read. Failures are logged; the
/// loaders run again on first use.
fn preload_mappings(state: &AppState, config: &Config) {
    if let Some(path) = &config.url_mapping_file {
        match state.manager.url_mappings(path) {
            Ok(mappings) => info!("Preloaded {} URL mappings", mappings.len()),
            Err(e) => warn!("URL mapping preload failed: {}", e),
        }
    }
    if let Some(path) = &config.user_mapping_file {
        match state.manager.user_mappings(path) {
            Ok(mappings) => info!("Preloaded {} user mappings", mappings.len()),
            Err(e) => warn!("User mapping preload failed: {}", e),
        }
    }
    if let Some(path) = &config.term_mapping_file {
        match state.manager.term_mappings(path) {
            Ok(mappings) => info!("Preloaded {} term mappings", mappings.len()),
            Err(e) => warn!("Term mapping preload failed: {}", e),
        }
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops the sweep.
async fn shutdown_signal(cleanup_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    cleanup_handle.abort();
    warn!("Expiration sweep aborted");
}
