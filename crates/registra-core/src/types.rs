//! # Domain Types
//!
//! Core domain types for the cash-register session lifecycle.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CashRegister   │   │   CashSession   │   │  SalesSummary   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  session_id     │       │
//! │  │  branch_id      │◄──│  register_id    │──►│  total_cents    │       │
//! │  │  operator_id    │   │  operator_id    │   │  sale_count     │       │
//! │  │  status         │   │  opening_cents  │   │  by_method      │       │
//! │  └─────────────────┘   │  state          │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ RegisterStatus  │   │  SessionState   │   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Active         │   │  Open           │   │  Cash, Card     │       │
//! │  │  Disabled       │   │  Closed         │   │  BankTransfer   │       │
//! │  │  Suspended      │   │  Void           │   │  Yape, Plin     │       │
//! │  └─────────────────┘   └─────────────────┘   │  Mixed          │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Closing-Field Invariant
//! `closed_at`, `counted_cents`, `expected_cents`, and `variance_cents` are
//! all `None` while a session is OPEN and all `Some` once it is CLOSED. They
//! are written together in a single store update and never altered afterward.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Register Status
// =============================================================================

/// Operational status of a cash register.
///
/// Registers are created and edited by administrative screens outside this
/// core; here the status only gates whether a session may be opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegisterStatus {
    /// Register may hold sessions.
    Active,
    /// Register retired by an administrator.
    Disabled,
    /// Register temporarily out of service.
    Suspended,
}

impl RegisterStatus {
    /// Only ACTIVE registers accept a new session.
    #[inline]
    pub const fn is_operable(&self) -> bool {
        matches!(self, RegisterStatus::Active)
    }
}

// =============================================================================
// Cash Register
// =============================================================================

/// A point-of-sale terminal capable of holding one OPEN session at a time.
///
/// Referenced, never mutated, by this core.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CashRegister {
    /// Unique identifier.
    pub id: String,

    /// Branch this register belongs to.
    pub branch_id: String,

    /// Operator the register is assigned to, if any.
    ///
    /// Cashiers and sellers may only operate their assigned register;
    /// supervisors and managers operate every register in their branch.
    pub operator_id: Option<String>,

    /// Display name shown on the sale point screen.
    pub name: String,

    /// Optional description.
    pub description: Option<String>,

    /// Operational status.
    pub status: RegisterStatus,
}

// =============================================================================
// Session State
// =============================================================================

/// Lifecycle state of a cash session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionState {
    /// Register is operating against this session.
    Open,
    /// Reconciled and finalized. Closing fields are frozen.
    Closed,
    /// Invalidated by an administrative override. Not reachable through
    /// normal operator action.
    Void,
}

// =============================================================================
// Cash Session
// =============================================================================

/// One open-to-close operating cycle of a register.
///
/// ## Lifecycle
/// ```text
/// (no session) ──open──► OPEN ──close──► CLOSED
///                          │
///                          └──admin override──► VOID
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CashSession {
    /// Unique identifier, assigned by the store on creation.
    pub id: String,

    /// Register this session belongs to.
    pub register_id: String,

    /// Operator who opened the session.
    pub operator_id: String,

    /// When the session was opened.
    #[ts(as = "String")]
    pub opened_at: DateTime<Utc>,

    /// Starting cash amount in cents. Never negative.
    pub opening_cents: i64,

    /// When the session was closed. `None` while OPEN.
    #[ts(as = "Option<String>")]
    pub closed_at: Option<DateTime<Utc>>,

    /// Physically counted drawer amount at close, in cents.
    pub counted_cents: Option<i64>,

    /// Computed expected amount at close: opening + session sales.
    pub expected_cents: Option<i64>,

    /// counted - expected. Zero balanced, positive surplus, negative shortage.
    pub variance_cents: Option<i64>,

    /// Free-text closing notes.
    pub notes: Option<String>,

    /// Lifecycle state.
    pub state: SessionState,
}

impl CashSession {
    /// Returns the opening amount as Money.
    #[inline]
    pub fn opening(&self) -> Money {
        Money::from_cents(self.opening_cents)
    }

    /// Returns the counted closing amount as Money, if closed.
    #[inline]
    pub fn counted(&self) -> Option<Money> {
        self.counted_cents.map(Money::from_cents)
    }

    /// Returns the expected closing amount as Money, if closed.
    #[inline]
    pub fn expected(&self) -> Option<Money> {
        self.expected_cents.map(Money::from_cents)
    }

    /// Returns the variance as Money, if closed.
    #[inline]
    pub fn variance(&self) -> Option<Money> {
        self.variance_cents.map(Money::from_cents)
    }

    /// Whether the session is still OPEN.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// Payment channels a sale can settle through.
///
/// A closed set: the sales feed groups session totals by exactly these
/// methods. `Mixed` covers split-tender sales the aggregator cannot
/// attribute to a single channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Physical cash.
    Cash,
    /// Card on an external terminal.
    Card,
    /// Direct bank transfer.
    BankTransfer,
    /// Yape mobile wallet.
    Yape,
    /// Plin mobile wallet.
    Plin,
    /// Split tender across more than one channel.
    Mixed,
}

impl PaymentMethod {
    /// Every method, in display order.
    pub const ALL: [PaymentMethod; 6] = [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::BankTransfer,
        PaymentMethod::Yape,
        PaymentMethod::Plin,
        PaymentMethod::Mixed,
    ];
}

// =============================================================================
// Sales Summary
// =============================================================================

/// Sales attributed to a single session, grouped by payment method.
///
/// Produced by the sales aggregator collaborator; this core only reads it.
/// Fetching it repeatedly for a still-open session never double counts, and
/// once the session is CLOSED the summary is frozen.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    /// Session the summary is scoped to.
    pub session_id: String,

    /// Sum of all sale totals in cents.
    pub total_cents: i64,

    /// Number of sales.
    pub sale_count: u64,

    /// Per-method totals in cents. Methods with no sales may be absent.
    pub by_method_cents: HashMap<PaymentMethod, i64>,
}

impl SalesSummary {
    /// An empty summary for a session with no sales yet.
    pub fn empty(session_id: impl Into<String>) -> Self {
        SalesSummary {
            session_id: session_id.into(),
            total_cents: 0,
            sale_count: 0,
            by_method_cents: HashMap::new(),
        }
    }

    /// Returns the total sales amount as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Returns the total for one payment method (zero when absent).
    pub fn method_total(&self, method: PaymentMethod) -> Money {
        Money::from_cents(self.by_method_cents.get(&method).copied().unwrap_or(0))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
