//! CycleDriver: the fetch → reconcile → persist → summarize loop
//!
//! Each cycle runs as its own task. A panic anywhere inside a cycle is
//! caught at the join, logged, and the loop carries on after the usual
//! delay, so the process only stops when it is killed.

use crate::reconciler::Reconciler;
use crate::sink::{PersistOutcome, PriceSink};
use crate::summary::CycleSummary;
use snapshot_rust_core::clients::PriceSource;
use snapshot_rust_core::models::ReferenceRow;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

/// Fixed pause after every cycle
pub const CYCLE_DELAY: Duration = Duration::from_secs(10);

/// What one cycle produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub snapshot_size: usize,
    pub records: usize,
    pub persisted: PersistOutcome,
    pub summary: CycleSummary,
}

#[derive(Clone)]
pub struct CycleDriver {
    source: Arc<dyn PriceSource>,
    reconciler: Reconciler,
    sink: PriceSink,
    reference: Arc<[ReferenceRow]>,
}

impl CycleDriver {
    pub fn new(source: Arc<dyn PriceSource>, sink: PriceSink, reference: Vec<ReferenceRow>) -> Self {
        Self {
            source,
            reconciler: Reconciler::new(),
            sink,
            reference: reference.into(),
        }
    }

    /// Run a single cycle. Every step absorbs its own failures.
    pub async fn run_cycle(&self) -> CycleReport {
        let snapshot = Arc::new(self.source.fetch().await);
        let snapshot_size = snapshot.len();

        let records = self
            .reconciler
            .reconcile(self.reference.clone(), snapshot)
            .await;

        let persisted = self.sink.persist(&records).await;

        let summary = CycleSummary::from_records(&records);
        info!("{}", summary.log_line());

        CycleReport {
            snapshot_size,
            records: records.len(),
            persisted,
            summary,
        }
    }

    /// Run cycles forever with a fixed delay between them.
    pub async fn run(self) {
        info!(
            "Starting price ingest loop: source={}, reference rows={}, workers={}, delay={}s",
            self.source.source_name(),
            self.reference.len(),
            self.reconciler.workers(),
            CYCLE_DELAY.as_secs()
        );

        let mut cycle: u64 = 0;
        loop {
            cycle += 1;
            let driver = self.clone();

            match tokio::spawn(async move { driver.run_cycle().await }).await {
                Ok(report) => debug!(
                    "Cycle {} finished: {} prices fetched, {} records, {:?}",
                    cycle, report.snapshot_size, report.records, report.persisted
                ),
                Err(e) => error!("Cycle {} aborted: {}", cycle, e),
            }

            tokio::time::sleep(CYCLE_DELAY).await;
        }
    }
}
