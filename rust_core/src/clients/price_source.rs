//! Price Source Trait
//!
//! Defines the interface the ingest cycle uses to obtain a live price
//! snapshot. The Binance ticker client is the production implementation.

use crate::models::PriceSnapshot;
use async_trait::async_trait;

/// Source of full price snapshots.
///
/// Implementations must be Send + Sync for use across spawned cycle tasks.
/// `fetch` never fails outward: any upstream problem is logged by the
/// implementation and reported as an empty snapshot, which degrades the
/// cycle to "N/A" prices instead of aborting it.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Display name used in logs (e.g., "Binance")
    fn source_name(&self) -> &str;

    /// Fetch every currently quoted price in one call.
    async fn fetch(&self) -> PriceSnapshot;
}
