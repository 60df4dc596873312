//! Configuration Module
//!
//! Handles loading host configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::cache::CacheOptions;
use crate::store::ExpirationPolicy;

/// Host configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace prefix for every store key
    pub key_prefix: Option<String>,
    /// Default TTL in seconds for stored logical caches (0 = never expire)
    pub default_ttl: u64,
    /// HTTP port of the admin API
    pub server_port: u16,
    /// Background expiration sweep interval in seconds
    pub cleanup_interval: u64,
    /// URL mapping file loaded at startup
    pub url_mapping_file: Option<PathBuf>,
    /// User mapping file loaded at startup
    pub user_mapping_file: Option<PathBuf>,
    /// Term mapping file loaded at startup
    pub term_mapping_file: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_KEY_PREFIX` - Store key prefix (default: none)
    /// - `CACHE_DEFAULT_TTL` - TTL in seconds, 0 for never (default: 0)
    /// - `SERVER_PORT` - Admin API port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 60)
    /// - `URL_MAPPING_FILE`, `USER_MAPPING_FILE`, `TERM_MAPPING_FILE` - optional preloads
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            key_prefix: non_empty_var("CACHE_KEY_PREFIX"),
            default_ttl: parsed_var("CACHE_DEFAULT_TTL").unwrap_or(defaults.default_ttl),
            server_port: parsed_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cleanup_interval: parsed_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            url_mapping_file: non_empty_var("URL_MAPPING_FILE").map(PathBuf::from),
            user_mapping_file: non_empty_var("USER_MAPPING_FILE").map(PathBuf::from),
            term_mapping_file: non_empty_var("TERM_MAPPING_FILE").map(PathBuf::from),
        }
    }

    /// Cache options derived from this configuration.
    pub fn cache_options(&self) -> CacheOptions {
        CacheOptions::new(
            self.key_prefix.clone(),
            ExpirationPolicy::from_ttl_seconds(self.default_ttl),
        )
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parsed_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            key_prefix: None,
            default_ttl: 0,
            server_port: 3000,
            cleanup_interval: 60,
            url_mapping_file: None,
            user_mapping_file: None,
            term_mapping_file: None,
        }
    }
}
