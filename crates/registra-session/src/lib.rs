//! # registra-session: Session Lifecycle Service and Access Guard
//!
//! The orchestration layer the UI talks to. It wires the pure core logic
//! to the REST store and exposes the four operations the surrounding
//! workflow layer needs.
//!
//! ## Exposed Surface
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    What the UI Layer Calls                              │
//! │                                                                         │
//! │  AccessGuard::can_enter(requirement)      → GuardDecision               │
//! │  SessionService::open_session(reg, amt)   → CashSession | SessionError  │
//! │  SessionService::close_session(id, …)     → CashSession | SessionError  │
//! │  SessionService::current_session()        → Option<CashSession>         │
//! │  SessionService::reconciliation_preview() → ReconciliationPreview       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wiring Example
//!
//! ```rust,no_run
//! use registra_core::roles::{Actor, Role};
//! use registra_session::{AccessGuard, SessionService, StaticActorProvider};
//! use registra_store::{HttpSalesFeed, HttpSessionStore, StoreClient, StoreConfig};
//!
//! # fn main() -> Result<(), registra_store::StoreError> {
//! let client = StoreClient::new(StoreConfig::load().expect("store config"))?;
//! let actors = StaticActorProvider::signed_in(Actor {
//!     id: "op-7".to_string(),
//!     branch_id: Some("br-1".to_string()),
//!     roles: vec![Role::Cashier],
//! });
//!
//! let service = SessionService::new(
//!     HttpSessionStore::new(client.clone()),
//!     HttpSalesFeed::new(client.clone()),
//!     actors.clone(),
//! );
//! let guard = AccessGuard::new(HttpSessionStore::new(client), actors);
//! # let _ = (service, guard);
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod actor;
pub mod error;
pub mod guard;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use actor::{ActorProvider, StaticActorProvider};
pub use error::{SessionError, SessionResult};
pub use guard::AccessGuard;
pub use service::{CloseConfirmation, ReconciliationPreview, SessionService};
