//! # registra-core: Pure Business Logic for the Registra Session Core
//!
//! This crate is the **heart** of the cash-register session lifecycle. It
//! contains all business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Registra Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (React)                             │   │
//! │  │    Open Cash UI ──► Sale Point UI ──► Close Cash UI            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 registra-session (Service Layer)                │   │
//! │  │    open_session, close_session, can_enter, preview             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ registra-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ reconcile │  │   guard   │  │   │
//! │  │   │  Session  │  │   Money   │  │ Variance  │  │ Decisions │  │   │
//! │  │   │  Register │  │  (cents)  │  │  Outcome  │  │ Redirects │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO CLOCK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 registra-store (REST Client)                    │   │
//! │  │          Session store, sales feed, retry policy               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CashRegister, CashSession, SalesSummary, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`reconcile`] - Expected/variance math for session close
//! - [`guard`] - Pure access-guard decisions for sale workflows
//! - [`roles`] - Role priority, effective role, register scope
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation for open/close amounts
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network, file system, and clock access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use registra_core::money::Money;
//! use registra_core::reconcile::{reconcile, ReconcileOutcome};
//!
//! // Opened with S/ 100.00, sold S/ 250.50, drawer counted S/ 350.50
//! let result = reconcile(
//!     Money::from_cents(10_000),
//!     Money::from_cents(25_050),
//!     Money::from_cents(35_050),
//! );
//!
//! assert_eq!(result.expected.cents(), 35_050);
//! assert!(result.variance.is_zero());
//! assert_eq!(result.outcome, ReconcileOutcome::Balanced);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod guard;
pub mod money;
pub mod reconcile;
pub mod roles;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use registra_core::Money` instead of
// `use registra_core::money::Money`

pub use error::{CoreError, ValidationError};
pub use guard::{GuardDecision, RedirectTarget, WorkflowRequirement};
pub use money::Money;
pub use reconcile::{reconcile, Reconciliation, ReconcileOutcome};
pub use roles::{Actor, RegisterScope, Role, RolePriorityTable, SessionScope};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of the free-text closing notes on a session.
///
/// Matches the column limit of the backing store so validation fails here
/// instead of surfacing as a store error after the round-trip.
pub const MAX_CLOSING_NOTES_LEN: usize = 500;
