//! # Session Service Error Type
//!
//! Unified error surface for the UI/routing layer.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Error Flow to the Frontend                              │
//! │                                                                         │
//! │  registra-core          registra-store          registra-session       │
//! │  ─────────────          ──────────────          ─────────────────      │
//! │  ValidationError ──┐                                                    │
//! │  CoreError ────────┼──► SessionError ◄──────── StoreError              │
//! │                    │         │                                          │
//! │                    │         ▼                                          │
//! │                    │    Frontend decides per variant:                   │
//! │                    │    Validation → field-level message, no retry      │
//! │                    │    Conflict   → re-fetch state, re-render          │
//! │                    │    NotFound   → back to safe default view          │
//! │                    │    Transient  → retry banner (reads only)          │
//! │                    └──► Internal   → generic failure toast             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No variant is ever swallowed on the way up: a transition either fully
//! committed at the store or surfaced one of these.

use thiserror::Error;

use registra_core::error::{CoreError, ValidationError};
use registra_store::StoreError;

// =============================================================================
// Session Error
// =============================================================================

/// Service-boundary error, the taxonomy the UI layer decides on.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Malformed input. Surfaced to the operator as a field-level message.
    #[error("{message}")]
    Validation { message: String },

    /// The transition lost to current state: an OPEN session already exists,
    /// or the target session is no longer OPEN. Re-fetch and re-render.
    #[error("{message}")]
    Conflict { message: String },

    /// Referenced session or register does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Network or store unavailability.
    #[error("{message}")]
    Transient { message: String },

    /// Anything that should not happen with a well-behaved store.
    #[error("{message}")]
    Internal { message: String },
}

impl SessionError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        SessionError::Validation {
            message: message.into(),
        }
    }

    /// Creates a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        SessionError::Conflict {
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        SessionError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// Converts validation failures from core checks.
impl From<ValidationError> for SessionError {
    fn from(err: ValidationError) -> Self {
        SessionError::validation(err.to_string())
    }
}

/// Converts business rule violations from core logic.
impl From<CoreError> for SessionError {
    fn from(err: CoreError) -> Self {
        match err {
            // An unresolvable or non-active register is operator input that
            // failed validation, not a missing session resource
            CoreError::RegisterNotFound(_) | CoreError::RegisterNotOperable { .. } => {
                SessionError::validation(err.to_string())
            }
            CoreError::SessionNotFound(id) => SessionError::not_found("Session", id),
            CoreError::SessionNotOpen { .. } => SessionError::conflict(err.to_string()),
            CoreError::Validation(e) => e.into(),
        }
    }
}

/// Converts store failures, preserving the taxonomy one-to-one.
impl From<StoreError> for SessionError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation { message } => SessionError::Validation { message },
            StoreError::Conflict { message } => SessionError::Conflict { message },
            StoreError::NotFound { entity, id } => SessionError::NotFound { entity, id },
            StoreError::Transient { message } => SessionError::Transient { message },
            StoreError::Decode { message } | StoreError::Internal { message } => {
                SessionError::Internal { message }
            }
        }
    }
}

/// Result type for service operations.
pub type SessionResult<T> = Result<T, SessionError>;

// =============================================================================
// Unit Tests
// =============================================================================
