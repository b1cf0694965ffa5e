//! Configuration Module
//!
//! Handles loading and managing Pokedex configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::cache::CacheConfig;

/// Root of the public PokeAPI.
pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Pokedex configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Seconds a cached response stays fresh
    pub cache_ttl: u64,
    /// Seconds between reaper sweeps
    pub sweep_interval: u64,
    /// API root, without a trailing slash
    pub api_base_url: String,
    /// Per-request HTTP timeout in seconds
    pub http_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `POKEDEX_CACHE_TTL` - Cache freshness in seconds (default: 900)
    /// - `POKEDEX_SWEEP_INTERVAL` - Reaper period in seconds (default: the TTL)
    /// - `POKEDEX_API_BASE_URL` - API root (default: https://pokeapi.co/api/v2)
    /// - `POKEDEX_HTTP_TIMEOUT` - Request timeout in seconds (default: 10)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable source.
    ///
    /// Missing, unparseable or zero durations fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let seconds = |name: &str| {
            lookup(name)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|v| *v > 0)
        };

        let cache_ttl = seconds("POKEDEX_CACHE_TTL").unwrap_or(defaults.cache_ttl);

        Self {
            cache_ttl,
            sweep_interval: seconds("POKEDEX_SWEEP_INTERVAL").unwrap_or(cache_ttl),
            api_base_url: lookup("POKEDEX_API_BASE_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.api_base_url),
            http_timeout: seconds("POKEDEX_HTTP_TIMEOUT").unwrap_or(defaults.http_timeout),
        }
    }

    /// Cache timing derived from this configuration.
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::new(Duration::from_secs(self.cache_ttl))
            .with_sweep_interval(Duration::from_secs(self.sweep_interval))
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl: 900,
            sweep_interval: 900,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            http_timeout: 10,
        }
    }
}
