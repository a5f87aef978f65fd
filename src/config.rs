//! Configuration Module
//!
//! Selects and locates the key-value backend from environment variables.

use std::env;

/// Which backend the demo driver talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// A Redis server reachable at `Config::redis_url`
    Redis,
    /// The in-process map, useful without a running server
    Memory,
}

impl BackendKind {
    /// Parses a backend name; unknown names yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "redis" => Some(BackendKind::Redis),
            "memory" | "mem" => Some(BackendKind::Memory),
            _ => None,
        }
    }
}

/// Runtime configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend to construct
    pub backend: BackendKind,
    /// Redis connection URL
    pub redis_url: String,
}

const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_BACKEND` - `redis` or `memory` (default: redis)
    /// - `REDIS_URL` - Redis connection URL (default: redis://127.0.0.1:6379)
    pub fn from_env() -> Self {
        Self {
            backend: env::var("CACHE_BACKEND")
                .ok()
                .and_then(|v| BackendKind::parse(&v))
                .unwrap_or(BackendKind::Redis),
            redis_url: env::var("REDIS_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_REDIS_URL.to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendKind::Redis,
            redis_url: DEFAULT_REDIS_URL.to_string(),
        }
    }
}
