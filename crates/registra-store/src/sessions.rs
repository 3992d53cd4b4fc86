//! # Session Store Contract
//!
//! The `SessionStore` trait is the workspace's only door to persisted
//! registers and sessions, plus its HTTP implementation.
//!
//! ## Conditional-Write Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Store-Enforced Session Invariants                       │
//! │                                                                         │
//! │  create_session                    close_session                        │
//! │  ──────────────                    ─────────────                        │
//! │  INSERT ... WHERE no OPEN          UPDATE ... WHERE state = OPEN        │
//! │  session exists for register       (compare-and-swap)                   │
//! │       │                                 │                               │
//! │       ├─ won  → OPEN session            ├─ won  → CLOSED session        │
//! │       └─ lost → 409 Conflict            └─ lost → 409 Conflict          │
//! │                                                                         │
//! │  Two operators racing to open the same register, or a double-submitted  │
//! │  close, are decided by the store. No client-side locking exists.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use registra_core::money::Money;
use registra_core::roles::SessionScope;
use registra_core::types::{CashRegister, CashSession};

use crate::client::StoreClient;
use crate::error::StoreResult;
use crate::wire::{CloseSessionBody, OpenSessionBody, RegisterRecord, SessionRecord};

// =============================================================================
// Mutation Inputs
// =============================================================================

/// Input for creating an OPEN session.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub register_id: String,
    pub operator_id: String,
    pub opening: Money,
}

/// The full closing record committed on OPEN→CLOSED.
///
/// All fields land in one conditional update; the store never persists a
/// partially closed session.
#[derive(Debug, Clone)]
pub struct SessionClosing {
    pub closed_at: DateTime<Utc>,
    pub counted: Money,
    pub expected: Money,
    pub variance: Money,
    pub notes: Option<String>,
}

// =============================================================================
// Session Store Trait
// =============================================================================

/// Create/read/close operations against the persisted session collection.
///
/// The store is the source of truth; every result reflects its state at the
/// time of the round-trip and is stale the moment it returns.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Lists the registers a scope may operate.
    async fn registers_for(&self, scope: &SessionScope) -> StoreResult<Vec<CashRegister>>;

    /// Fetches one register by id, `None` when it does not exist.
    async fn register(&self, register_id: &str) -> StoreResult<Option<CashRegister>>;

    /// Conditionally creates an OPEN session.
    ///
    /// Fails with `StoreError::Conflict` when the register already has one.
    async fn create_session(&self, new: &NewSession) -> StoreResult<CashSession>;

    /// Fetches the current OPEN session for a scope.
    ///
    /// `None` is an expected state, not a failure.
    async fn open_session_for(&self, scope: &SessionScope) -> StoreResult<Option<CashSession>>;

    /// Fetches one session by id, `None` when it does not exist.
    async fn session(&self, session_id: &str) -> StoreResult<Option<CashSession>>;

    /// Conditionally closes an OPEN session (compare-and-swap on state).
    ///
    /// Fails with `StoreError::Conflict` when the session is no longer
    /// OPEN, leaving the persisted record untouched.
    async fn close_session(
        &self,
        session_id: &str,
        closing: &SessionClosing,
    ) -> StoreResult<CashSession>;
}

// =============================================================================
// HTTP Implementation
// =============================================================================

/// `SessionStore` over the backing REST service.
#[derive(Debug, Clone)]
pub struct HttpSessionStore {
    client: StoreClient,
}

impl HttpSessionStore {
    pub fn new(client: StoreClient) -> Self {
        HttpSessionStore { client }
    }
}

/// Query parameters selecting a scope's rows.
fn scope_query(scope: &SessionScope) -> [(&'static str, &str); 1] {
    match scope {
        SessionScope::Operator { operator_id } => [("operatorId", operator_id.as_str())],
        SessionScope::Branch { branch_id } => [("branchId", branch_id.as_str())],
    }
}

#[async_trait]
impl SessionStore for HttpSessionStore {
    async fn registers_for(&self, scope: &SessionScope) -> StoreResult<Vec<CashRegister>> {
        let records: Vec<RegisterRecord> = self
            .client
            .get_json_retry("/registers", &scope_query(scope), "list registers")
            .await?;
        Ok(records.into_iter().map(CashRegister::from).collect())
    }

    async fn register(&self, register_id: &str) -> StoreResult<Option<CashRegister>> {
        let record: Option<RegisterRecord> = self
            .client
            .get_json_retry(
                &format!("/registers/{register_id}"),
                &[],
                "fetch register",
            )
            .await?;
        Ok(record.map(CashRegister::from))
    }

    async fn create_session(&self, new: &NewSession) -> StoreResult<CashSession> {
        info!(
            register_id = %new.register_id,
            operator_id = %new.operator_id,
            opening = %new.opening,
            "creating session"
        );
        let record: SessionRecord = self
            .client
            .post_json("/sessions", &OpenSessionBody::from_domain(new), "open session")
            .await?;
        CashSession::try_from(record)
    }

    async fn open_session_for(&self, scope: &SessionScope) -> StoreResult<Option<CashSession>> {
        // The store answers 200 with a null body when no session is open
        let record: Option<SessionRecord> = self
            .client
            .get_json_retry("/sessions/open", &scope_query(scope), "fetch open session")
            .await?;
        record.map(CashSession::try_from).transpose()
    }

    async fn session(&self, session_id: &str) -> StoreResult<Option<CashSession>> {
        let record: Option<SessionRecord> = self
            .client
            .get_json_retry(&format!("/sessions/{session_id}"), &[], "fetch session")
            .await?;
        record.map(CashSession::try_from).transpose()
    }

    async fn close_session(
        &self,
        session_id: &str,
        closing: &SessionClosing,
    ) -> StoreResult<CashSession> {
        info!(
            session_id,
            counted = %closing.counted,
            expected = %closing.expected,
            variance = %closing.variance,
            "closing session"
        );
        let record: SessionRecord = self
            .client
            .post_json(
                &format!("/sessions/{session_id}/close"),
                &CloseSessionBody::from_domain(closing),
                "close session",
            )
            .await?;
        CashSession::try_from(record)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
