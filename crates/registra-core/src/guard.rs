//! # Access Guard Decisions
//!
//! The pure routing decision taken before a sale-related workflow renders.
//!
//! ## Decision Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Guard Evaluation (per navigation)                     │
//! │                                                                         │
//! │   operable registers == 0 ────────────────► DENY → neutral landing      │
//! │            │                                                            │
//! │            ▼                                                            │
//! │   workflow needs OPEN, none open ─────────► REDIRECT → open-session     │
//! │            │                                                            │
//! │            ▼                                                            │
//! │   workflow needs no session, one open ────► REDIRECT → sale point       │
//! │            │                                                            │
//! │            ▼                                                            │
//! │   ALLOW                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This module only decides; fetching registers and the current session is
//! the session crate's job. The decision must be re-evaluated on every
//! navigation attempt — another actor may open or close the shared
//! branch-level session concurrently, so nothing here is cacheable.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Workflow Requirement
// =============================================================================

/// The session state a sale workflow needs before it may render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkflowRequirement {
    /// Workflow operates against an OPEN session (sale point, close-cash).
    RequireOpen,
    /// Workflow must start without an OPEN session (open-cash form).
    RequireClosed,
}

// =============================================================================
// Guard Decision
// =============================================================================

/// Where the routing layer should send the actor instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RedirectTarget {
    /// Neutral landing screen for actors with no register at all.
    Landing,
    /// The open-session workflow.
    OpenSession,
    /// The default sale workflow.
    SalePoint,
}

/// Outcome of a guard evaluation, consumed by the routing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GuardDecision {
    /// Whether the workflow may render.
    pub allowed: bool,

    /// Redirect target when not allowed.
    pub redirect: Option<RedirectTarget>,
}

impl GuardDecision {
    /// Entry is permitted.
    pub const fn allow() -> Self {
        GuardDecision {
            allowed: true,
            redirect: None,
        }
    }

    /// Entry is refused and routed elsewhere.
    pub const fn deny(target: RedirectTarget) -> Self {
        GuardDecision {
            allowed: false,
            redirect: Some(target),
        }
    }
}

// =============================================================================
// Evaluation
// =============================================================================

/// Decides whether a sale workflow may be entered.
///
/// `operable_registers` is the number of registers the actor's effective
/// role lets them operate; `session_open` is whether their scope currently
/// has an OPEN session.
///
/// ## Example
/// ```rust
/// use registra_core::guard::{evaluate, RedirectTarget, WorkflowRequirement};
///
/// // Cashier navigates to the sale point before opening their register
/// let decision = evaluate(WorkflowRequirement::RequireOpen, 1, false);
/// assert!(!decision.allowed);
/// assert_eq!(decision.redirect, Some(RedirectTarget::OpenSession));
/// ```
pub fn evaluate(
    requirement: WorkflowRequirement,
    operable_registers: usize,
    session_open: bool,
) -> GuardDecision {
    // An actor with no register can never reach the cash workflow,
    // whatever the workflow asks for.
    if operable_registers == 0 {
        return GuardDecision::deny(RedirectTarget::Landing);
    }

    match requirement {
        WorkflowRequirement::RequireOpen if !session_open => {
            GuardDecision::deny(RedirectTarget::OpenSession)
        }
        WorkflowRequirement::RequireClosed if session_open => {
            GuardDecision::deny(RedirectTarget::SalePoint)
        }
        _ => GuardDecision::allow(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
