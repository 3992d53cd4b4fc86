//! # Roles & Scope
//!
//! Role priority, effective-role resolution, and the register scope an
//! actor is entitled to operate.
//!
//! An actor may hold several roles; the highest-priority one governs. The
//! priority order is an explicit, versioned configuration table rather than
//! a list hardcoded at the call sites, so a deployment can reorder it
//! without touching guard logic.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Role
// =============================================================================

/// Roles known to the session core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Branch manager. Operates every register in the branch.
    Manager,
    /// Branch supervisor. Operates every register in the branch.
    Supervisor,
    /// Seller. Restricted to their assigned register.
    Seller,
    /// Cashier. Restricted to their assigned register.
    Cashier,
}

/// Which registers a role may operate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegisterScope {
    /// Every register in the actor's branch.
    Branch,
    /// Only the register assigned to the actor.
    OwnRegister,
}

impl Role {
    /// Register scope this role grants.
    pub const fn register_scope(&self) -> RegisterScope {
        match self {
            Role::Manager | Role::Supervisor => RegisterScope::Branch,
            Role::Seller | Role::Cashier => RegisterScope::OwnRegister,
        }
    }
}

// =============================================================================
// Role Priority Table
// =============================================================================

/// Versioned priority order among roles.
///
/// When an actor holds multiple roles, the first one in `order` that the
/// actor holds is their effective role. The version travels with the table
/// so a reordered deployment is distinguishable in logs and fixtures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RolePriorityTable {
    /// Table revision.
    pub version: u32,

    /// Roles from highest to lowest priority.
    pub order: Vec<Role>,
}

impl RolePriorityTable {
    /// Revision 1: MANAGER > SUPERVISOR > SELLER > CASHIER.
    pub fn v1() -> Self {
        RolePriorityTable {
            version: 1,
            order: vec![Role::Manager, Role::Supervisor, Role::Seller, Role::Cashier],
        }
    }

    /// Resolves the effective role for a set of held roles.
    ///
    /// Returns `None` when the actor holds no role the table knows about,
    /// which the guard treats as "no access".
    pub fn effective_role(&self, held: &[Role]) -> Option<Role> {
        self.order.iter().copied().find(|role| held.contains(role))
    }
}

impl Default for RolePriorityTable {
    fn default() -> Self {
        RolePriorityTable::v1()
    }
}

// =============================================================================
// Actor & Session Scope
// =============================================================================

/// The authenticated actor a request runs as.
///
/// Authentication itself (tokens, refresh, bootstrapping) lives outside
/// this core; callers inject the resolved actor instead of reading ambient
/// global state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    /// Operator id.
    pub id: String,

    /// Branch the actor is attached to, if any.
    pub branch_id: Option<String>,

    /// Roles the actor holds.
    pub roles: Vec<Role>,
}

/// The filter a session or register lookup runs under.
///
/// Scope never changes which sessions exist; it changes who is permitted
/// to query and close them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum SessionScope {
    /// Sessions opened by this operator on their assigned register.
    Operator { operator_id: String },
    /// All sessions across the registers of this branch.
    Branch { branch_id: String },
}

impl Actor {
    /// Resolves the lookup scope for this actor under a priority table.
    ///
    /// - No effective role → `None` (no access at all).
    /// - Branch-scoped role without a branch attachment → `None`; there is
    ///   nothing the actor could legally see.
    /// - Otherwise the operator or branch scope for the effective role.
    pub fn session_scope(&self, table: &RolePriorityTable) -> Option<SessionScope> {
        let role = table.effective_role(&self.roles)?;
        match role.register_scope() {
            RegisterScope::OwnRegister => Some(SessionScope::Operator {
                operator_id: self.id.clone(),
            }),
            RegisterScope::Branch => self.branch_id.as_ref().map(|branch_id| {
                SessionScope::Branch {
                    branch_id: branch_id.clone(),
                }
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
