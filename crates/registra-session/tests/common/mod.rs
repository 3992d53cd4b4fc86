//! Shared test doubles and fixtures for the service/guard integration
//! tests.
//!
//! `MemorySessionStore` mirrors the backing store's conditional-write
//! semantics: one OPEN session per register on insert, compare-and-swap on
//! state for close. That is exactly the contract the real store exposes
//! over HTTP, so the service logic under test cannot tell the difference.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use registra_core::money::Money;
use registra_core::roles::{Actor, Role, SessionScope};
use registra_core::types::{
    CashRegister, CashSession, PaymentMethod, RegisterStatus, SalesSummary, SessionState,
};
use registra_session::{SessionService, StaticActorProvider};
use registra_store::{
    NewSession, SalesFeed, SessionClosing, SessionStore, StoreError, StoreResult,
};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

// =============================================================================
// In-Memory Session Store
// =============================================================================

#[derive(Debug, Default)]
struct StoreState {
    registers: Vec<CashRegister>,
    sessions: HashMap<String, CashSession>,
}

#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    state: Arc<Mutex<StoreState>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        MemorySessionStore::default()
    }

    pub fn add_register(&self, register: CashRegister) {
        self.state.lock().unwrap().registers.push(register);
    }

    /// Raw snapshot of a persisted session, for "record unchanged" checks.
    pub fn session_snapshot(&self, session_id: &str) -> Option<CashSession> {
        self.state.lock().unwrap().sessions.get(session_id).cloned()
    }

    pub fn session_count(&self) -> usize {
        self.state.lock().unwrap().sessions.len()
    }

    pub fn open_session_count(&self, register_id: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .sessions
            .values()
            .filter(|s| s.register_id == register_id && s.is_open())
            .count()
    }

    fn branch_of(state: &StoreState, register_id: &str) -> Option<String> {
        state
            .registers
            .iter()
            .find(|r| r.id == register_id)
            .map(|r| r.branch_id.clone())
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn registers_for(&self, scope: &SessionScope) -> StoreResult<Vec<CashRegister>> {
        let state = self.state.lock().unwrap();
        let registers = state
            .registers
            .iter()
            .filter(|r| match scope {
                SessionScope::Operator { operator_id } => {
                    r.operator_id.as_deref() == Some(operator_id.as_str())
                }
                SessionScope::Branch { branch_id } => &r.branch_id == branch_id,
            })
            .cloned()
            .collect();
        Ok(registers)
    }

    async fn register(&self, register_id: &str) -> StoreResult<Option<CashRegister>> {
        let state = self.state.lock().unwrap();
        Ok(state.registers.iter().find(|r| r.id == register_id).cloned())
    }

    async fn create_session(&self, new: &NewSession) -> StoreResult<CashSession> {
        let mut state = self.state.lock().unwrap();

        // Conditional insert: the uniqueness constraint the real store has
        if state
            .sessions
            .values()
            .any(|s| s.register_id == new.register_id && s.is_open())
        {
            return Err(StoreError::Conflict {
                message: format!("register {} already has an open session", new.register_id),
            });
        }

        let session = CashSession {
            id: Uuid::new_v4().to_string(),
            register_id: new.register_id.clone(),
            operator_id: new.operator_id.clone(),
            opened_at: Utc::now(),
            opening_cents: new.opening.cents(),
            closed_at: None,
            counted_cents: None,
            expected_cents: None,
            variance_cents: None,
            notes: None,
            state: SessionState::Open,
        };
        state.sessions.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    async fn open_session_for(&self, scope: &SessionScope) -> StoreResult<Option<CashSession>> {
        let state = self.state.lock().unwrap();
        let found = state
            .sessions
            .values()
            .filter(|s| s.is_open())
            .find(|s| match scope {
                SessionScope::Operator { operator_id } => &s.operator_id == operator_id,
                SessionScope::Branch { branch_id } => {
                    MemorySessionStore::branch_of(&state, &s.register_id).as_ref()
                        == Some(branch_id)
                }
            })
            .cloned();
        Ok(found)
    }

    async fn session(&self, session_id: &str) -> StoreResult<Option<CashSession>> {
        let state = self.state.lock().unwrap();
        Ok(state.sessions.get(session_id).cloned())
    }

    async fn close_session(
        &self,
        session_id: &str,
        closing: &SessionClosing,
    ) -> StoreResult<CashSession> {
        let mut state = self.state.lock().unwrap();
        let session = state
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| StoreError::not_found("Session", session_id))?;

        // Compare-and-swap: only an OPEN session closes, the record is
        // untouched otherwise
        if session.state != SessionState::Open {
            return Err(StoreError::Conflict {
                message: format!("session {session_id} is no longer open"),
            });
        }

        session.closed_at = Some(closing.closed_at);
        session.counted_cents = Some(closing.counted.cents());
        session.expected_cents = Some(closing.expected.cents());
        session.variance_cents = Some(closing.variance.cents());
        session.notes = closing.notes.clone();
        session.state = SessionState::Closed;
        Ok(session.clone())
    }
}

// =============================================================================
// In-Memory Sales Feed
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct MemorySalesFeed {
    summaries: Arc<Mutex<HashMap<String, SalesSummary>>>,
}

impl MemorySalesFeed {
    pub fn new() -> Self {
        MemorySalesFeed::default()
    }

    /// Attributes sales to a session, replacing any previous summary.
    pub fn set_sales(&self, session_id: &str, by_method: &[(PaymentMethod, i64)]) {
        let mut summary = SalesSummary::empty(session_id);
        for (method, cents) in by_method {
            *summary.by_method_cents.entry(*method).or_insert(0) += cents;
            summary.total_cents += cents;
            summary.sale_count += 1;
        }
        self.summaries
            .lock()
            .unwrap()
            .insert(session_id.to_string(), summary);
    }
}

#[async_trait]
impl SalesFeed for MemorySalesFeed {
    async fn session_sales(&self, session_id: &str) -> StoreResult<SalesSummary> {
        let summaries = self.summaries.lock().unwrap();
        Ok(summaries
            .get(session_id)
            .cloned()
            .unwrap_or_else(|| SalesSummary::empty(session_id)))
    }
}

// =============================================================================
// Fixtures
// =============================================================================

pub const BRANCH: &str = "br-1";
pub const OTHER_BRANCH: &str = "br-2";

pub fn cashier(id: &str) -> Actor {
    Actor {
        id: id.to_string(),
        branch_id: Some(BRANCH.to_string()),
        roles: vec![Role::Cashier],
    }
}

pub fn supervisor(id: &str) -> Actor {
    Actor {
        id: id.to_string(),
        branch_id: Some(BRANCH.to_string()),
        roles: vec![Role::Supervisor],
    }
}

pub fn register(id: &str, operator_id: Option<&str>, status: RegisterStatus) -> CashRegister {
    CashRegister {
        id: id.to_string(),
        branch_id: BRANCH.to_string(),
        operator_id: operator_id.map(str::to_string),
        name: format!("Caja {id}"),
        description: None,
        status,
    }
}

pub type TestService = SessionService<MemorySessionStore, MemorySalesFeed, StaticActorProvider>;

/// A service wired to shared store/feed doubles for the given actor.
pub fn service_for(
    store: &MemorySessionStore,
    sales: &MemorySalesFeed,
    actor: Actor,
) -> TestService {
    SessionService::new(
        store.clone(),
        sales.clone(),
        StaticActorProvider::signed_in(actor),
    )
}

pub fn soles(cents: i64) -> Money {
    Money::from_cents(cents)
}
