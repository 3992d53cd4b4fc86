//! # registra-store: REST Store Access for the Registra Session Core
//!
//! This crate provides access to the backing store for the session core.
//! The store is an external REST service and the source of truth; nothing
//! is persisted locally.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Registra Data Flow                               │
//! │                                                                         │
//! │  registra-session (open_session, close_session, can_enter)             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   registra-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  StoreClient  │    │   Contracts   │    │     Wire     │  │   │
//! │  │   │  (client.rs)  │    │ SessionStore  │    │  (wire.rs)   │  │   │
//! │  │   │               │    │ SalesFeed     │    │              │  │   │
//! │  │   │ reqwest, auth │◄───│ Http impls    │    │ decimal ↔    │  │   │
//! │  │   │ retry/backoff │    │               │    │ Money        │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Backing REST store                             │   │
//! │  │   registers, sessions (conditional writes), sales summaries    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`client`] - Shared HTTP client (auth, timeout, read retry)
//! - [`config`] - Env-loaded store configuration
//! - [`error`] - Store error taxonomy
//! - [`sessions`] - `SessionStore` contract and HTTP implementation
//! - [`sales`] - `SalesFeed` contract and HTTP implementation
//! - [`wire`] - Wire DTOs and decimal↔Money conversion
//!
//! ## Usage
//!
//! ```rust,no_run
//! use registra_store::{HttpSalesFeed, HttpSessionStore, StoreClient, StoreConfig};
//!
//! # fn main() -> Result<(), registra_store::StoreError> {
//! let config = StoreConfig::new("http://localhost:8000/api")
//!     .with_bearer_token("token-from-auth-layer");
//! let client = StoreClient::new(config)?;
//!
//! let sessions = HttpSessionStore::new(client.clone());
//! let sales = HttpSalesFeed::new(client);
//! # let _ = (sessions, sales);
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod config;
pub mod error;
pub mod sales;
pub mod sessions;
pub mod wire;

// =============================================================================
// Re-exports
// =============================================================================

pub use client::StoreClient;
pub use config::{ConfigError, RetryPolicy, StoreConfig};
pub use error::{StoreError, StoreResult};
pub use sales::{HttpSalesFeed, SalesFeed};
pub use sessions::{HttpSessionStore, NewSession, SessionClosing, SessionStore};
