//! price_ingest_rust - periodic Binance ticker snapshots into MySQL

pub mod config;
pub mod driver;
pub mod logging;
pub mod reconciler;
pub mod reference;
pub mod sink;
pub mod summary;

pub use config::IngestConfig;
pub use driver::{CycleDriver, CycleReport, CYCLE_DELAY};
pub use reconciler::{Reconciler, RowError, RECONCILE_WORKERS};
pub use sink::{MySqlPriceStore, PersistOutcome, PriceSink, PriceStore, StoreSession};
pub use summary::CycleSummary;
