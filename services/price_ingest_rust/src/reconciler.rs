//! Reconciliation of reference pairs against a live price snapshot
//!
//! Every reference row becomes one enriched record: the snapshot price when
//! the trading pair is quoted, the "N/A" sentinel otherwise. Rows are
//! processed on a bounded group of tasks that is fully drained before
//! `reconcile` returns. A row that fails (or whose task panics) is logged
//! and left out; the rest of the batch is unaffected.

use chrono::Local;
use snapshot_rust_core::models::{EnrichedRecord, PriceSnapshot, ReferenceRow, PRICE_NOT_AVAILABLE};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error};

/// Concurrent row workers per cycle
pub const RECONCILE_WORKERS: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RowError {
    #[error("missing '{0}' field")]
    MissingField(&'static str),
}

/// Join one reference row with the snapshot.
///
/// `observed_at` is taken here, per row, in host local time, so records in a
/// batch carry their own capture time.
pub fn enrich_row(row: &ReferenceRow, snapshot: &PriceSnapshot) -> Result<EnrichedRecord, RowError> {
    let symbol = required(&row.trading_pair, "Trading Pair")?;
    let base_asset = required(&row.base_asset, "Base Asset")?;
    let quote_asset = required(&row.quote_asset, "Quote Asset")?;

    let price = snapshot.price(symbol).unwrap_or(PRICE_NOT_AVAILABLE);

    Ok(EnrichedRecord {
        name: format!("{}/{}", base_asset, quote_asset),
        symbol: symbol.to_string(),
        price: price.to_string(),
        observed_at: Local::now(),
    })
}

fn required<'a>(field: &'a Option<String>, name: &'static str) -> Result<&'a str, RowError> {
    field
        .as_deref()
        .filter(|value| !value.is_empty())
        .ok_or(RowError::MissingField(name))
}

type EnrichFn = dyn Fn(&ReferenceRow, &PriceSnapshot) -> Result<EnrichedRecord, RowError> + Send + Sync;

/// Bounded-parallel reconciler
#[derive(Clone)]
pub struct Reconciler {
    workers: usize,
    enrich: Arc<EnrichFn>,
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new()
    }
}

impl Reconciler {
    pub fn new() -> Self {
        Self::with_workers(RECONCILE_WORKERS)
    }

    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
            enrich: Arc::new(enrich_row),
        }
    }

    /// Replace the per-row join (used to exercise failure isolation)
    pub fn with_row_fn<F>(mut self, enrich: F) -> Self
    where
        F: Fn(&ReferenceRow, &PriceSnapshot) -> Result<EnrichedRecord, RowError> + Send + Sync + 'static,
    {
        let enrich: Arc<EnrichFn> = Arc::new(enrich);
        self.enrich = enrich;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Produce one record per successfully processed row, in completion order.
    pub async fn reconcile(
        &self,
        rows: Arc<[ReferenceRow]>,
        snapshot: Arc<PriceSnapshot>,
    ) -> Vec<EnrichedRecord> {
        let permits = Arc::new(Semaphore::new(self.workers));
        let mut tasks = JoinSet::new();

        for index in 0..rows.len() {
            let rows = rows.clone();
            let snapshot = snapshot.clone();
            let permits = permits.clone();
            let enrich = self.enrich.clone();

            tasks.spawn(async move {
                // semaphore is never closed
                let _permit = permits.acquire().await.ok();
                enrich(&rows[index], snapshot.as_ref()).map_err(|e| (index, e))
            });
        }

        let mut records = Vec::with_capacity(rows.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(record)) => records.push(record),
                Ok(Err((index, e))) => {
                    let pair = rows[index].trading_pair.as_deref().unwrap_or("<unknown>");
                    error!("Error processing row {} ({}): {}", index, pair, e);
                }
                Err(e) => error!("Error processing row: {}", e),
            }
        }

        debug!(
            "Reconciled {}/{} reference rows against {} prices",
            records.len(),
            rows.len(),
            snapshot.len()
        );

        records
    }
}
