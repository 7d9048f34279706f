//! Batch persistence of enriched records
//!
//! `PriceSink::persist` opens a storage session, makes sure the price table
//! exists, appends the whole batch and closes the session again, on every
//! path. Failures are logged and swallowed: a lost batch only affects the
//! current cycle.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use snapshot_rust_core::db::{self, prices, DbConfig};
use snapshot_rust_core::models::EnrichedRecord;
use sqlx::mysql::MySqlConnection;
use sqlx::Connection;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Storage backend that hands out one session per batch
#[async_trait]
pub trait PriceStore: Send + Sync {
    async fn open(&self) -> Result<Box<dyn StoreSession>>;
}

/// One open connection to the price store
#[async_trait]
pub trait StoreSession: Send {
    /// Create the destination table if absent
    async fn ensure_schema(&mut self) -> Result<()>;

    /// Append every record; returns rows written
    async fn append(&mut self, records: &[EnrichedRecord]) -> Result<u64>;

    /// Release the underlying connection
    async fn close(&mut self) -> Result<()>;
}

// ============================================================================
// MySQL
// ============================================================================

/// MySQL-backed store; connects fresh for every batch
#[derive(Debug, Clone)]
pub struct MySqlPriceStore {
    config: DbConfig,
}

impl MySqlPriceStore {
    pub fn new(config: DbConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl PriceStore for MySqlPriceStore {
    async fn open(&self) -> Result<Box<dyn StoreSession>> {
        let conn = db::connect(&self.config).await?;
        Ok(Box::new(MySqlSession { conn: Some(conn) }))
    }
}

struct MySqlSession {
    conn: Option<MySqlConnection>,
}

impl MySqlSession {
    fn conn(&mut self) -> Result<&mut MySqlConnection> {
        self.conn
            .as_mut()
            .ok_or_else(|| anyhow!("MySQL session already closed"))
    }
}

#[async_trait]
impl StoreSession for MySqlSession {
    async fn ensure_schema(&mut self) -> Result<()> {
        prices::ensure_price_table(self.conn()?).await
    }

    async fn append(&mut self, records: &[EnrichedRecord]) -> Result<u64> {
        prices::insert_price_batch(self.conn()?, records).await
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            conn.close()
                .await
                .context("Failed to close MySQL connection")?;
        }
        Ok(())
    }
}

// ============================================================================
// Sink
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    Stored(u64),
    Failed,
}

#[derive(Clone)]
pub struct PriceSink {
    store: Arc<dyn PriceStore>,
}

impl PriceSink {
    pub fn new(store: Arc<dyn PriceStore>) -> Self {
        Self { store }
    }

    pub fn mysql(config: DbConfig) -> Self {
        Self::new(Arc::new(MySqlPriceStore::new(config)))
    }

    /// Write one batch. Never returns an error; failures are logged.
    pub async fn persist(&self, records: &[EnrichedRecord]) -> PersistOutcome {
        let mut session = match self.store.open().await {
            Ok(session) => session,
            Err(e) => {
                error!("MySQL Error: {:#}", e);
                return PersistOutcome::Failed;
            }
        };

        let result = write_batch(session.as_mut(), records).await;

        if let Err(e) = session.close().await {
            warn!("{:#}", e);
        }

        match result {
            Ok(rows) => {
                info!("Data successfully stored in MySQL.");
                PersistOutcome::Stored(rows)
            }
            Err(e) => {
                error!("MySQL Error: {:#}", e);
                PersistOutcome::Failed
            }
        }
    }
}

async fn write_batch(session: &mut dyn StoreSession, records: &[EnrichedRecord]) -> Result<u64> {
    session.ensure_schema().await?;
    session.append(records).await
}
