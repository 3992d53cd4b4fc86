//! Store client configuration.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, so a kiosk build can point at its branch backend without a
//! code change.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use thiserror::Error;

/// How reads back off on transient store failures.
///
/// Mutations (open/close) never use this; a blind retry could duplicate a
/// transition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts including the first (1 = no retry).
    pub max_attempts: u32,

    /// Delay before the first retry; doubles on each subsequent one.
    pub base_delay_ms: u64,
}

impl RetryPolicy {
    /// Delay before the given retry (0-based), exponential doubling.
    pub fn delay_before(&self, retry: u32) -> Duration {
        Duration::from_millis(self.base_delay_ms.saturating_mul(1u64 << retry.min(16)))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: 3,
            base_delay_ms: 200,
        }
    }
}

/// Store client configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the backing REST store, without a trailing slash.
    pub base_url: String,

    /// Per-request timeout.
    pub timeout: Duration,

    /// Bearer token for the store, injected by the auth layer.
    pub bearer_token: Option<String>,

    /// Retry policy for read operations.
    pub retry: RetryPolicy,
}

impl StoreConfig {
    /// Creates a config for a base URL with default timeout and retries.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        StoreConfig {
            base_url,
            timeout: Duration::from_secs(10),
            bearer_token: None,
            retry: RetryPolicy::default(),
        }
    }

    /// Sets the bearer token.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Load configuration from environment variables.
    ///
    /// ## Variables
    /// - `REGISTRA_STORE_URL` (default `http://localhost:8000/api`)
    /// - `REGISTRA_STORE_TIMEOUT_SECS` (default `10`)
    /// - `REGISTRA_STORE_TOKEN` (optional)
    /// - `REGISTRA_STORE_RETRIES` (default `3`, total read attempts)
    pub fn load() -> Result<Self, ConfigError> {
        let base_url =
            env::var("REGISTRA_STORE_URL").unwrap_or_else(|_| "http://localhost:8000/api".into());

        let timeout_secs: u64 = env::var("REGISTRA_STORE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("REGISTRA_STORE_TIMEOUT_SECS".to_string()))?;

        let max_attempts: u32 = env::var("REGISTRA_STORE_RETRIES")
            .unwrap_or_else(|_| "3".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("REGISTRA_STORE_RETRIES".to_string()))?;

        let mut config = StoreConfig::new(base_url);
        config.timeout = Duration::from_secs(timeout_secs);
        config.retry.max_attempts = max_attempts.max(1);
        config.bearer_token = env::var("REGISTRA_STORE_TOKEN").ok();

        Ok(config)
    }
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}
