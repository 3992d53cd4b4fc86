//! # Wire DTOs
//!
//! Serde shapes for the backing store's REST payloads, and their
//! conversions into domain types.
//!
//! ## Amounts on the Wire
//! The store serializes every monetary value as a decimal string with two
//! fraction digits (`"100.00"`). Conversion goes through
//! [`Money::parse_decimal`] so amounts never touch binary floating point;
//! an unparseable amount is a [`StoreError::Decode`], not a guess.
//!
//! ## Why Separate DTOs?
//! The wire shapes belong to the store's contract and the domain types to
//! this workspace. Keeping them apart means a store-side rename shows up
//! here, in one file, instead of leaking `Option<String>` amounts through
//! the core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use registra_core::money::Money;
use registra_core::types::{
    CashRegister, CashSession, PaymentMethod, RegisterStatus, SalesSummary, SessionState,
};

use crate::error::{StoreError, StoreResult};
use crate::sessions::{NewSession, SessionClosing};

// =============================================================================
// Amount Parsing Helpers
// =============================================================================

fn parse_amount(field: &str, raw: &str) -> StoreResult<Money> {
    Money::parse_decimal(raw)
        .map_err(|e| StoreError::decode(format!("{field}: {e}")))
}

fn parse_opt_amount(field: &str, raw: &Option<String>) -> StoreResult<Option<Money>> {
    raw.as_deref()
        .map(|value| parse_amount(field, value))
        .transpose()
}

// =============================================================================
// Register Record
// =============================================================================

/// A cash register as the store serializes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRecord {
    pub id: String,
    pub branch_id: String,
    #[serde(default)]
    pub operator_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: RegisterStatus,
}

impl From<RegisterRecord> for CashRegister {
    fn from(record: RegisterRecord) -> Self {
        CashRegister {
            id: record.id,
            branch_id: record.branch_id,
            operator_id: record.operator_id,
            name: record.name,
            description: record.description,
            status: record.status,
        }
    }
}

// =============================================================================
// Session Record
// =============================================================================

/// A cash session as the store serializes it.
///
/// Closing fields are all-or-nothing on the wire, same as in the domain:
/// the store writes them in one conditional update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: String,
    pub register_id: String,
    pub operator_id: String,
    pub opened_at: DateTime<Utc>,
    pub opening_amount: String,
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub counted_amount: Option<String>,
    #[serde(default)]
    pub expected_amount: Option<String>,
    #[serde(default)]
    pub variance: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub state: SessionState,
}

impl TryFrom<SessionRecord> for CashSession {
    type Error = StoreError;

    fn try_from(record: SessionRecord) -> StoreResult<Self> {
        Ok(CashSession {
            opening_cents: parse_amount("openingAmount", &record.opening_amount)?.cents(),
            counted_cents: parse_opt_amount("countedAmount", &record.counted_amount)?
                .map(|m| m.cents()),
            expected_cents: parse_opt_amount("expectedAmount", &record.expected_amount)?
                .map(|m| m.cents()),
            variance_cents: parse_opt_amount("variance", &record.variance)?.map(|m| m.cents()),
            id: record.id,
            register_id: record.register_id,
            operator_id: record.operator_id,
            opened_at: record.opened_at,
            closed_at: record.closed_at,
            notes: record.notes,
            state: record.state,
        })
    }
}

// =============================================================================
// Request Bodies
// =============================================================================

/// Body of `POST /sessions` (conditional insert).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenSessionBody {
    pub register_id: String,
    pub operator_id: String,
    pub opening_amount: String,
}

impl OpenSessionBody {
    pub fn from_domain(new: &NewSession) -> Self {
        OpenSessionBody {
            register_id: new.register_id.clone(),
            operator_id: new.operator_id.clone(),
            opening_amount: new.opening.to_decimal_string(),
        }
    }
}

/// Body of `POST /sessions/{id}/close` (conditional update).
///
/// Carries the full closing record: the state machine computed expected and
/// variance before asking the store to commit them atomically.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseSessionBody {
    pub closed_at: DateTime<Utc>,
    pub counted_amount: String,
    pub expected_amount: String,
    pub variance: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CloseSessionBody {
    pub fn from_domain(closing: &SessionClosing) -> Self {
        CloseSessionBody {
            closed_at: closing.closed_at,
            counted_amount: closing.counted.to_decimal_string(),
            expected_amount: closing.expected.to_decimal_string(),
            variance: closing.variance.to_decimal_string(),
            notes: closing.notes.clone(),
        }
    }
}

// =============================================================================
// Sales Summary Record
// =============================================================================

/// Per-session sales totals as the aggregator serializes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummaryRecord {
    pub session_id: String,
    pub total_sales: String,
    pub sale_count: u64,
    /// Method → amount. The aggregator omits methods with no sales.
    #[serde(default)]
    pub by_method: HashMap<PaymentMethod, String>,
}

impl TryFrom<SalesSummaryRecord> for SalesSummary {
    type Error = StoreError;

    fn try_from(record: SalesSummaryRecord) -> StoreResult<Self> {
        let mut by_method_cents = HashMap::with_capacity(record.by_method.len());
        for (method, raw) in &record.by_method {
            by_method_cents.insert(*method, parse_amount("byMethod", raw)?.cents());
        }

        Ok(SalesSummary {
            session_id: record.session_id,
            total_cents: parse_amount("totalSales", &record.total_sales)?.cents(),
            sale_count: record.sale_count,
            by_method_cents,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
