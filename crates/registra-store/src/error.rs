//! # Store Error Types
//!
//! Error types for REST store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Transport error (reqwest::Error)      HTTP status (400/404/409/5xx)   │
//! │       │                                     │                           │
//! │       ▼                                     ▼                           │
//! │  StoreError (this module) ← Categorized into the session taxonomy      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SessionError (registra-session) ← What the UI layer decides on        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Retry Semantics
//! Only [`StoreError::Transient`] is safe to retry, and only for reads.
//! Retrying a mutation blindly could duplicate a transition; callers must
//! re-check current state first.

use thiserror::Error;

// =============================================================================
// Store Error
// =============================================================================

/// REST store operation errors.
///
/// Mirrors the session core's error taxonomy so the service layer can pass
/// these through without re-classifying.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store rejected the request as malformed (HTTP 400/422).
    #[error("Store rejected request: {message}")]
    Validation { message: String },

    /// The conditional write lost (HTTP 409): an OPEN session already
    /// exists for the register, or the target session is no longer OPEN.
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Referenced entity does not exist (HTTP 404).
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Network or store unavailability (timeouts, connection refused, 5xx).
    /// Safe to retry with backoff for reads.
    #[error("Store unavailable: {message}")]
    Transient { message: String },

    /// Response body did not match the expected wire shape.
    #[error("Malformed store response: {message}")]
    Decode { message: String },

    /// Anything the taxonomy cannot place (unexpected status, auth drift).
    #[error("Store error: {message}")]
    Internal { message: String },
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a Decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        StoreError::Decode {
            message: message.into(),
        }
    }

    /// Whether a retry with backoff may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Transient { .. })
    }

    /// Maps an HTTP status plus the store's `detail` body field into the
    /// error taxonomy.
    ///
    /// ## Status Mapping
    /// ```text
    /// 400, 422      → Validation
    /// 404           → NotFound
    /// 409           → Conflict
    /// 5xx, 429      → Transient (retryable for reads)
    /// anything else → Internal
    /// ```
    pub fn from_status(status: u16, detail: Option<String>, context: &str) -> Self {
        let message = detail.unwrap_or_else(|| format!("{context} failed with status {status}"));
        match status {
            400 | 422 => StoreError::Validation { message },
            404 => StoreError::NotFound {
                entity: context.to_string(),
                id: message,
            },
            409 => StoreError::Conflict { message },
            429 | 500..=599 => StoreError::Transient { message },
            _ => StoreError::Internal {
                message: format!("{context}: unexpected status {status}: {message}"),
            },
        }
    }
}

/// Convert transport-level reqwest errors to StoreError.
///
/// Timeouts and connection failures are transient; everything else at the
/// transport level (body decode, redirect loops) is not retryable.
impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            StoreError::Transient {
                message: err.to_string(),
            }
        } else if err.is_decode() {
            StoreError::Decode {
                message: err.to_string(),
            }
        } else {
            StoreError::Internal {
                message: err.to_string(),
            }
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
