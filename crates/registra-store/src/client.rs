//! # Store HTTP Client
//!
//! Thin wrapper over `reqwest` shared by the session store and the sales
//! feed.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        StoreClient Request Flow                         │
//! │                                                                         │
//! │  get_json / post_json                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  build request (base_url + path, bearer token, timeout)                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2xx ──► deserialize body ──► T                                         │
//! │  4xx/5xx ──► read `detail` ──► StoreError::from_status                  │
//! │  transport error ──► StoreError (timeout/connect = Transient)           │
//! │                                                                         │
//! │  get_json_retry: same, but Transient errors back off and retry.         │
//! │  Mutations go through post_json and are NEVER retried here.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use tracing::{debug, warn};

use crate::config::{RetryPolicy, StoreConfig};
use crate::error::{StoreError, StoreResult};

// =============================================================================
// Store Client
// =============================================================================

/// Shared HTTP client for the backing REST store.
#[derive(Debug, Clone)]
pub struct StoreClient {
    http: reqwest::Client,
    config: StoreConfig,
}

impl StoreClient {
    /// Creates a client from configuration.
    pub fn new(config: StoreConfig) -> StoreResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(StoreClient { http, config })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.base_url, path);
        let mut builder = self.http.request(method, url);
        if let Some(token) = &self.config.bearer_token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// GET returning a deserialized JSON body. No retry.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        context: &str,
    ) -> StoreResult<T> {
        debug!(path, context, "store GET");
        let response = self
            .request(Method::GET, path)
            .query(query)
            .send()
            .await?;
        decode_response(response, context).await
    }

    /// GET with transient-failure retry and exponential backoff.
    ///
    /// Reads are idempotent against the store, so retrying is safe. The
    /// final attempt's error is returned unchanged.
    pub(crate) async fn get_json_retry<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        context: &str,
    ) -> StoreResult<T> {
        with_read_retry(self.config.retry, context, || {
            self.get_json(path, query, context)
        })
        .await
    }

    /// POST with a JSON body, returning a deserialized JSON response.
    ///
    /// Never retried: open/close are conditional writes, and a blind retry
    /// after an ambiguous failure could attempt a duplicate transition.
    /// Callers re-check current state instead.
    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        context: &str,
    ) -> StoreResult<T> {
        debug!(path, context, "store POST");
        let response = self
            .request(Method::POST, path)
            .json(body)
            .send()
            .await?;
        decode_response(response, context).await
    }
}

// =============================================================================
// Read Retry
// =============================================================================

/// Runs a read operation, retrying transient failures with backoff.
///
/// The operation must be idempotent: this is only ever used for GETs.
/// Non-transient errors and the final transient attempt return unchanged.
pub(crate) async fn with_read_retry<T, Fut>(
    policy: RetryPolicy,
    context: &str,
    mut op: impl FnMut() -> Fut,
) -> StoreResult<T>
where
    Fut: Future<Output = StoreResult<T>>,
{
    let mut attempt: u32 = 0;
    loop {
        match op().await {
            Err(err) if err.is_transient() && attempt + 1 < policy.max_attempts => {
                let delay = policy.delay_before(attempt);
                warn!(
                    context,
                    attempt = attempt + 1,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "transient store failure, retrying read"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            other => return other,
        }
    }
}

// =============================================================================
// Response Decoding
// =============================================================================

async fn decode_response<T: DeserializeOwned>(
    response: Response,
    context: &str,
) -> StoreResult<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let body = response.text().await.unwrap_or_default();
    Err(StoreError::from_status(
        status.as_u16(),
        extract_detail(&body),
        context,
    ))
}

/// Pulls the store's `{"detail": "..."}` message out of an error body.
///
/// Falls back to the raw body so an unexpected error shape still surfaces
/// something readable in logs.
fn extract_detail(body: &str) -> Option<String> {
    if body.is_empty() {
        return None;
    }
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(detail) = value.get("detail").and_then(|d| d.as_str()) {
            return Some(detail.to_string());
        }
    }
    Some(body.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
