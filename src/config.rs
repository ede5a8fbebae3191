//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default time an employee record stays valid in the cache, in seconds.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 91;

/// Default location of the upstream employee record service.
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "http://localhost:8112/api/v1/employee";

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Seconds a cache entry stays valid after its last write
    pub cache_ttl: u64,
    /// Base URL of the upstream employee service
    pub upstream_base_url: String,
    /// Upstream request timeout in seconds
    pub upstream_timeout: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Background sweep interval in seconds, 0 disables the sweep
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL_SECS` - Cache entry TTL in seconds (default: 91)
    /// - `UPSTREAM_BASE_URL` - Upstream service URL (default: http://localhost:8112/api/v1/employee)
    /// - `UPSTREAM_TIMEOUT_SECS` - Upstream request timeout in seconds (default: 10)
    /// - `SERVER_PORT` - HTTP server port (default: 8111)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 30)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_ttl: env_or("CACHE_TTL_SECS", defaults.cache_ttl),
            upstream_base_url: env::var("UPSTREAM_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.upstream_base_url),
            upstream_timeout: env_or("UPSTREAM_TIMEOUT_SECS", defaults.upstream_timeout),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
        }
    }

    /// Cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    /// Upstream request timeout as a Duration.
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl: DEFAULT_CACHE_TTL_SECS,
            upstream_base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            upstream_timeout: 10,
            server_port: 8111,
            cleanup_interval: 30,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache_ttl, 91);
        assert_eq!(config.upstream_base_url, DEFAULT_UPSTREAM_BASE_URL);
        assert_eq!(config.upstream_timeout, 10);
        assert_eq!(config.server_port, 8111);
        assert_eq!(config.cleanup_interval, 30);
    }

    #[test]
    fn test_config_durations() {
        let config = Config::default();
        assert_eq!(config.cache_ttl(), Duration::from_secs(91));
        assert_eq!(config.upstream_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_config_from_env() {
        // Single test touches the environment so parallel tests don't race on it
        env::remove_var("CACHE_TTL_SECS");
        env::remove_var("UPSTREAM_BASE_URL");
        env::remove_var("UPSTREAM_TIMEOUT_SECS");
        env::remove_var("SERVER_PORT");
        env::remove_var("CLEANUP_INTERVAL");

        let config = Config::from_env();
        assert_eq!(config.cache_ttl, 91);
        assert_eq!(config.upstream_base_url, DEFAULT_UPSTREAM_BASE_URL);
        assert_eq!(config.server_port, 8111);

        env::set_var("CACHE_TTL_SECS", "5");
        env::set_var("SERVER_PORT", "not-a-port");
        env::set_var("UPSTREAM_BASE_URL", "http://upstream:9000/api");

        let config = Config::from_env();
        assert_eq!(config.cache_ttl, 5);
        assert_eq!(config.server_port, 8111);
        assert_eq!(config.upstream_base_url, "http://upstream:9000/api");

        env::remove_var("CACHE_TTL_SECS");
        env::remove_var("SERVER_PORT");
        env::remove_var("UPSTREAM_BASE_URL");
    }
}
