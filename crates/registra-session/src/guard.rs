//! # Access Guard Orchestration
//!
//! Fetches the facts (actor, registers, open session) and hands them to the
//! pure decision in `registra_core::guard`.
//!
//! The routing layer calls [`AccessGuard::can_enter`] before rendering any
//! sale-related view. Nothing is cached between calls: another operator may
//! open or close the shared branch-level session at any moment, so every
//! navigation attempt re-reads the store.

use tracing::debug;

use registra_core::guard::{evaluate, GuardDecision, RedirectTarget, WorkflowRequirement};
use registra_core::roles::RolePriorityTable;

use registra_store::SessionStore;

use crate::actor::ActorProvider;
use crate::error::SessionResult;

// =============================================================================
// Access Guard
// =============================================================================

/// Decides whether the current actor may enter a sale workflow.
#[derive(Debug, Clone)]
pub struct AccessGuard<S, P> {
    store: S,
    actors: P,
    priorities: RolePriorityTable,
}

impl<S, P> AccessGuard<S, P>
where
    S: SessionStore,
    P: ActorProvider,
{
    /// Creates a guard with the v1 role priority table.
    pub fn new(store: S, actors: P) -> Self {
        AccessGuard {
            store,
            actors,
            priorities: RolePriorityTable::default(),
        }
    }

    /// Creates a guard with a deployment-specific priority table.
    pub fn with_priorities(store: S, actors: P, priorities: RolePriorityTable) -> Self {
        AccessGuard {
            store,
            actors,
            priorities,
        }
    }

    /// Evaluates entry into a workflow.
    ///
    /// Always fetched fresh; a `Transient` error means the routing layer
    /// should show a retry state rather than assume either answer.
    ///
    /// ## Decision Summary
    /// ```text
    /// no actor / no scope / no registers → deny, redirect to landing
    /// RequireOpen without OPEN session   → redirect to open-session flow
    /// RequireClosed with OPEN session    → redirect to sale point
    /// otherwise                          → allow
    /// ```
    pub async fn can_enter(&self, requirement: WorkflowRequirement) -> SessionResult<GuardDecision> {
        let Some(actor) = self.actors.current() else {
            debug!("guard: no authenticated actor");
            return Ok(GuardDecision::deny(RedirectTarget::Landing));
        };

        let Some(scope) = actor.session_scope(&self.priorities) else {
            debug!(actor_id = %actor.id, "guard: no role grants a register scope");
            return Ok(GuardDecision::deny(RedirectTarget::Landing));
        };

        let registers = self.store.registers_for(&scope).await?;
        if registers.is_empty() {
            debug!(actor_id = %actor.id, "guard: no registers in scope");
            return Ok(GuardDecision::deny(RedirectTarget::Landing));
        }

        let open = self.store.open_session_for(&scope).await?;
        let decision = evaluate(requirement, registers.len(), open.is_some());
        debug!(
            actor_id = %actor.id,
            ?requirement,
            session_open = open.is_some(),
            allowed = decision.allowed,
            "guard decision"
        );
        Ok(decision)
    }
}
