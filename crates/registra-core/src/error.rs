//! # Error Types
//!
//! Domain-specific error types for registra-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  registra-core errors (this file)                                      │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  registra-store errors (separate crate)                                │
//! │  └── StoreError       - REST store failures (Conflict, Transient, …)   │
//! │                                                                         │
//! │  registra-session errors (service boundary)                            │
//! │  └── SessionError     - What the UI layer sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → SessionError → Frontend           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (register id, session id, state)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::types::SessionState;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations in the session
/// lifecycle. They should be caught and translated to user-friendly
/// messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Register id does not resolve within the actor's scope.
    #[error("Register not found: {0}")]
    RegisterNotFound(String),

    /// Register exists but is not ACTIVE, so no session may be opened on it.
    #[error("Register {register_id} is {status}, sessions can only open on an active register")]
    RegisterNotOperable {
        register_id: String,
        status: String,
    },

    /// Session id does not exist.
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// Session is not in the state the requested transition needs.
    ///
    /// ## When This Occurs
    /// - Closing a session that already closed (double submission)
    /// - Closing a session an administrator voided
    #[error("Session {session_id} is {current_state:?}, cannot perform operation")]
    SessionNotOpen {
        session_id: String,
        current_state: SessionState,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when operator input doesn't meet requirements.
/// Used for early validation before any store round-trip.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// A monetary amount is negative where only zero or more is legal.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., unparseable amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// An irreversible transition was attempted without explicit
    /// confirmation from the operator.
    #[error("{action} requires explicit confirmation")]
    ConfirmationRequired { action: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
