//! # Reconciliation Engine
//!
//! Computes the expected closing amount of a session and the variance
//! against the physically counted drawer.
//!
//! ## The Close-Out Math
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Session Close Reconciliation                        │
//! │                                                                         │
//! │   opening amount ────────┐                                              │
//! │                          ├──► expected = opening + sales total          │
//! │   session sales total ───┘              │                               │
//! │                                         ▼                               │
//! │   counted drawer ──────────► variance = counted - expected              │
//! │                                         │                               │
//! │                              ┌──────────┼──────────┐                    │
//! │                              ▼          ▼          ▼                    │
//! │                          Shortage   Balanced    Surplus                 │
//! │                          (< 0)      (== 0)      (> 0)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is a pure function of its inputs. Integer-cents
//! arithmetic means a balanced drawer reconciles to exactly zero, never an
//! epsilon. The outcome classification is advisory, for display and
//! reporting only.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Outcome Classification
// =============================================================================

/// Advisory classification of a reconciliation variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReconcileOutcome {
    /// Counted equals expected exactly.
    Balanced,
    /// Counted exceeds expected.
    Surplus,
    /// Counted falls short of expected.
    Shortage,
}

impl ReconcileOutcome {
    /// Classifies a variance.
    pub fn of(variance: Money) -> Self {
        if variance.is_zero() {
            ReconcileOutcome::Balanced
        } else if variance.is_positive() {
            ReconcileOutcome::Surplus
        } else {
            ReconcileOutcome::Shortage
        }
    }
}

// =============================================================================
// Reconciliation
// =============================================================================

/// The result of reconciling a session at close.
///
/// Carries its inputs alongside the computed figures so the closing record
/// can be persisted (and audited) as one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    /// Starting cash amount of the session.
    pub opening: Money,

    /// Sum of sale totals attributed to the session.
    pub sales_total: Money,

    /// Physically counted drawer amount.
    pub counted: Money,

    /// opening + sales_total. Computed, never user-entered.
    pub expected: Money,

    /// counted - expected.
    pub variance: Money,

    /// Advisory classification of the variance.
    pub outcome: ReconcileOutcome,
}

/// Reconciles a session's drawer against its expected closing amount.
///
/// Deterministic and side-effect-free.
///
/// ## Example
/// ```rust
/// use registra_core::money::Money;
/// use registra_core::reconcile::{reconcile, ReconcileOutcome};
///
/// let result = reconcile(
///     Money::from_cents(10_000), // opened with S/ 100.00
///     Money::from_cents(25_050), // sold S/ 250.50
///     Money::from_cents(30_000), // counted S/ 300.00
/// );
///
/// assert_eq!(result.expected.cents(), 35_050);
/// assert_eq!(result.variance.cents(), -5_050);
/// assert_eq!(result.outcome, ReconcileOutcome::Shortage);
/// ```
pub fn reconcile(opening: Money, sales_total: Money, counted: Money) -> Reconciliation {
    let expected = opening + sales_total;
    let variance = counted - expected;

    Reconciliation {
        opening,
        sales_total,
        counted,
        expected,
        variance,
        outcome: ReconcileOutcome::of(variance),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
