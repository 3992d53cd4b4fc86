//! # Sales Feed Contract
//!
//! Read-only access to the sales aggregator: the per-session totals the
//! reconciliation engine consumes at close.
//!
//! The aggregator is authoritative and idempotent. Fetching the summary
//! repeatedly for a still-open session never double counts, and once the
//! session is CLOSED the summary is frozen — no further sales may attribute
//! to it.

use async_trait::async_trait;
use tracing::debug;

use registra_core::types::SalesSummary;

use crate::client::StoreClient;
use crate::error::StoreResult;
use crate::wire::SalesSummaryRecord;

// =============================================================================
// Sales Feed Trait
// =============================================================================

/// The one read operation this core consumes from the sales aggregator.
#[async_trait]
pub trait SalesFeed: Send + Sync {
    /// Sales attributed to a session, grouped by payment method.
    async fn session_sales(&self, session_id: &str) -> StoreResult<SalesSummary>;
}

// =============================================================================
// HTTP Implementation
// =============================================================================

/// `SalesFeed` over the backing REST service.
#[derive(Debug, Clone)]
pub struct HttpSalesFeed {
    client: StoreClient,
}

impl HttpSalesFeed {
    pub fn new(client: StoreClient) -> Self {
        HttpSalesFeed { client }
    }
}

#[async_trait]
impl SalesFeed for HttpSalesFeed {
    async fn session_sales(&self, session_id: &str) -> StoreResult<SalesSummary> {
        debug!(session_id, "fetching session sales summary");
        let record: SalesSummaryRecord = self
            .client
            .get_json_retry(
                &format!("/sessions/{session_id}/sales"),
                &[],
                "fetch session sales",
            )
            .await?;
        SalesSummary::try_from(record)
    }
}
