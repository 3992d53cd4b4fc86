//! # Session Lifecycle Service
//!
//! The state machine around a register's open→close cycle.
//!
//! ## Transition Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Session Lifecycle                                  │
//! │                                                                         │
//! │  1. OPEN                                                                │
//! │     └── open_session(register, amount)                                  │
//! │         ├── validate amount ≥ 0, register ACTIVE and in scope           │
//! │         └── store conditional insert → OPEN session (409 = busy)        │
//! │                                                                         │
//! │  2. OPERATE                                                             │
//! │     └── current_session() / reconciliation_preview()                    │
//! │         └── reads only; sales accumulate via the aggregator             │
//! │                                                                         │
//! │  3. CLOSE                                                               │
//! │     └── close_session(id, counted, notes, Confirmed)                    │
//! │         ├── validate confirmation, counted ≥ 0, ownership               │
//! │         ├── pull sales summary → reconcile (pure)                       │
//! │         └── store compare-and-swap update → CLOSED (409 = lost race)    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation round-trips the store; the returned state is already
//! stale when the caller sees it, and the store alone arbitrates races.

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use registra_core::error::{CoreError, ValidationError};
use registra_core::money::Money;
use registra_core::reconcile::{reconcile, ReconcileOutcome};
use registra_core::roles::{Actor, RolePriorityTable, SessionScope};
use registra_core::types::{CashRegister, CashSession};
use registra_core::validation::{
    validate_closing_notes, validate_counted_amount, validate_opening_amount,
};

use registra_store::{NewSession, SalesFeed, SessionClosing, SessionStore};

use crate::actor::ActorProvider;
use crate::error::{SessionError, SessionResult};

// =============================================================================
// Close Confirmation
// =============================================================================

/// Explicit operator confirmation for the irreversible close transition.
///
/// The UI's confirm dialog result travels into the call as a typed
/// precondition instead of being checked ad hoc somewhere in a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseConfirmation {
    /// Operator confirmed the close dialog.
    Confirmed,
    /// Dialog dismissed or never shown.
    Unconfirmed,
}

// =============================================================================
// Reconciliation Preview
// =============================================================================

/// What the close screen shows before (and after) the transition.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationPreview {
    pub session_id: String,

    /// For an OPEN session: opening + sales so far. For a CLOSED one: the
    /// frozen figure from the record.
    pub expected_cents: i64,

    /// Counted amount, once closed.
    pub counted_cents: Option<i64>,

    /// Variance, once closed.
    pub variance_cents: Option<i64>,

    /// Advisory classification, once closed.
    pub outcome: Option<ReconcileOutcome>,
}

// =============================================================================
// Session Service
// =============================================================================

/// Orchestrates session transitions against the store and sales feed.
#[derive(Debug, Clone)]
pub struct SessionService<S, F, P> {
    store: S,
    sales: F,
    actors: P,
    priorities: RolePriorityTable,
}

impl<S, F, P> SessionService<S, F, P>
where
    S: SessionStore,
    F: SalesFeed,
    P: ActorProvider,
{
    /// Creates a service with the v1 role priority table.
    pub fn new(store: S, sales: F, actors: P) -> Self {
        SessionService {
            store,
            sales,
            actors,
            priorities: RolePriorityTable::default(),
        }
    }

    /// Creates a service with a deployment-specific priority table.
    pub fn with_priorities(store: S, sales: F, actors: P, priorities: RolePriorityTable) -> Self {
        SessionService {
            store,
            sales,
            actors,
            priorities,
        }
    }

    fn current_actor(&self) -> SessionResult<Actor> {
        self.actors
            .current()
            .ok_or_else(|| SessionError::validation("no authenticated actor"))
    }

    fn scope_of(&self, actor: &Actor) -> Option<SessionScope> {
        actor.session_scope(&self.priorities)
    }

    // -------------------------------------------------------------------------
    // Open
    // -------------------------------------------------------------------------

    /// Opens a session on a register with a starting amount.
    ///
    /// ## Failure Modes
    /// - `Validation` — negative amount, register unknown/not ACTIVE, or the
    ///   register is outside the actor's scope
    /// - `Conflict` — the register already has an OPEN session (the store's
    ///   conditional insert decides, not this client)
    pub async fn open_session(
        &self,
        register_id: &str,
        opening: Money,
    ) -> SessionResult<CashSession> {
        let actor = self.current_actor()?;
        validate_opening_amount(opening)?;

        let scope = self
            .scope_of(&actor)
            .ok_or_else(|| SessionError::validation("no role grants access to a register"))?;

        let register = self
            .store
            .register(register_id)
            .await?
            .ok_or_else(|| CoreError::RegisterNotFound(register_id.to_string()))
            .map_err(SessionError::from)?;

        ensure_register_in_scope(&scope, &register)?;

        if !register.status.is_operable() {
            return Err(CoreError::RegisterNotOperable {
                register_id: register.id.clone(),
                status: format!("{:?}", register.status),
            }
            .into());
        }

        let created = self
            .store
            .create_session(&NewSession {
                register_id: register.id.clone(),
                operator_id: actor.id.clone(),
                opening,
            })
            .await?;

        info!(
            session_id = %created.id,
            register_id = %created.register_id,
            opening = %created.opening(),
            "session opened"
        );
        Ok(created)
    }

    // -------------------------------------------------------------------------
    // Read
    // -------------------------------------------------------------------------

    /// The current OPEN session for the actor's scope, if any.
    ///
    /// "No session" is an expected state, not a failure.
    pub async fn current_session(&self) -> SessionResult<Option<CashSession>> {
        let actor = self.current_actor()?;
        let Some(scope) = self.scope_of(&actor) else {
            return Ok(None);
        };
        Ok(self.store.open_session_for(&scope).await?)
    }

    /// Expected/counted/variance figures for the close screen.
    pub async fn reconciliation_preview(
        &self,
        session_id: &str,
    ) -> SessionResult<ReconciliationPreview> {
        let session = self
            .store
            .session(session_id)
            .await?
            .ok_or_else(|| SessionError::not_found("Session", session_id))?;

        if session.is_open() {
            let summary = self.sales.session_sales(&session.id).await?;
            let expected = session.opening() + summary.total();
            debug!(session_id, expected = %expected, "reconciliation preview (open)");
            return Ok(ReconciliationPreview {
                session_id: session.id,
                expected_cents: expected.cents(),
                counted_cents: None,
                variance_cents: None,
                outcome: None,
            });
        }

        // Closed (or voided) sessions carry frozen figures
        let (expected, counted, variance) = match (
            session.expected_cents,
            session.counted_cents,
            session.variance_cents,
        ) {
            (Some(e), Some(c), Some(v)) => (e, c, v),
            _ => {
                return Err(SessionError::Internal {
                    message: format!("session {} is closed but missing closing fields", session.id),
                })
            }
        };

        Ok(ReconciliationPreview {
            session_id: session.id,
            expected_cents: expected,
            counted_cents: Some(counted),
            variance_cents: Some(variance),
            outcome: Some(ReconcileOutcome::of(Money::from_cents(variance))),
        })
    }

    // -------------------------------------------------------------------------
    // Close
    // -------------------------------------------------------------------------

    /// Closes an OPEN session against a physically counted drawer amount.
    ///
    /// Pulls the session's sales summary, reconciles, and asks the store to
    /// commit every closing field in one conditional update. If a concurrent
    /// close got there first the store answers `Conflict` and the persisted
    /// record is untouched.
    ///
    /// ## Failure Modes
    /// - `Validation` — unconfirmed, negative counted amount, notes too
    ///   long, or the session belongs to someone outside the actor's scope
    /// - `NotFound` — unknown session id
    /// - `Conflict` — session is no longer OPEN (double submission)
    pub async fn close_session(
        &self,
        session_id: &str,
        counted: Money,
        notes: Option<String>,
        confirmation: CloseConfirmation,
    ) -> SessionResult<CashSession> {
        let actor = self.current_actor()?;

        if confirmation != CloseConfirmation::Confirmed {
            return Err(ValidationError::ConfirmationRequired {
                action: "closing the session".to_string(),
            }
            .into());
        }

        validate_counted_amount(counted)?;
        if let Some(notes) = notes.as_deref() {
            validate_closing_notes(notes)?;
        }

        let session = self
            .store
            .session(session_id)
            .await?
            .ok_or_else(|| CoreError::SessionNotFound(session_id.to_string()))
            .map_err(SessionError::from)?;

        self.ensure_may_close(&actor, &session).await?;

        if !session.is_open() {
            return Err(CoreError::SessionNotOpen {
                session_id: session.id.clone(),
                current_state: session.state,
            }
            .into());
        }

        let summary = self.sales.session_sales(&session.id).await?;
        let result = reconcile(session.opening(), summary.total(), counted);

        let closed = self
            .store
            .close_session(
                &session.id,
                &SessionClosing {
                    closed_at: Utc::now(),
                    counted: result.counted,
                    expected: result.expected,
                    variance: result.variance,
                    notes,
                },
            )
            .await?;

        info!(
            session_id = %closed.id,
            expected = %result.expected,
            counted = %result.counted,
            variance = %result.variance,
            outcome = ?result.outcome,
            "session closed"
        );
        Ok(closed)
    }

    /// An operator-scoped actor may only close their own session; a
    /// branch-scoped actor may close any session on their branch's
    /// registers.
    async fn ensure_may_close(&self, actor: &Actor, session: &CashSession) -> SessionResult<()> {
        let scope = self
            .scope_of(actor)
            .ok_or_else(|| SessionError::validation("no role grants access to a register"))?;

        match scope {
            SessionScope::Operator { operator_id } => {
                if session.operator_id != operator_id {
                    return Err(SessionError::validation(
                        "cannot close a session opened by another operator",
                    ));
                }
            }
            SessionScope::Branch { branch_id } => {
                let register = self
                    .store
                    .register(&session.register_id)
                    .await?
                    .ok_or_else(|| {
                        SessionError::not_found("Register", session.register_id.clone())
                    })?;
                if register.branch_id != branch_id {
                    return Err(SessionError::validation(
                        "cannot close a session outside your branch",
                    ));
                }
            }
        }
        Ok(())
    }
}

// =============================================================================
// Scope Checks
// =============================================================================

fn ensure_register_in_scope(scope: &SessionScope, register: &CashRegister) -> SessionResult<()> {
    match scope {
        SessionScope::Operator { operator_id } => {
            if register.operator_id.as_deref() != Some(operator_id.as_str()) {
                return Err(SessionError::validation(
                    "cannot open a register that is not assigned to you",
                ));
            }
        }
        SessionScope::Branch { branch_id } => {
            if &register.branch_id != branch_id {
                return Err(SessionError::validation(
                    "cannot open a register outside your branch",
                ));
            }
        }
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
