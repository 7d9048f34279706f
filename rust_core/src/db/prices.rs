//! Crypto price table operations
//!
//! Creates the `crypto_prices` table on demand and appends enriched price
//! records to it. Rows are only ever inserted; nothing here updates or
//! deletes.

use crate::models::EnrichedRecord;
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use sqlx::mysql::{MySql, MySqlConnection};
use sqlx::{Connection, QueryBuilder};
use tracing::debug;

/// MySQL caps a prepared statement at 65 535 placeholders; each row binds 4.
const MAX_ROWS_PER_STATEMENT: usize = 65_535 / 4;

const CREATE_PRICE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS crypto_prices (
        id INT AUTO_INCREMENT PRIMARY KEY,
        name VARCHAR(255),
        symbol VARCHAR(255),
        price VARCHAR(50),
        timestamp DATETIME
    )
"#;

/// Create the price table if it does not exist. Safe to call repeatedly.
pub async fn ensure_price_table(conn: &mut MySqlConnection) -> Result<()> {
    sqlx::query(CREATE_PRICE_TABLE)
        .execute(&mut *conn)
        .await
        .context("Failed to create crypto_prices table")?;
    Ok(())
}

/// Insert a batch of records as multi-row INSERT statements in one transaction.
///
/// Batches larger than the placeholder limit are split across several
/// statements; the transaction still commits or fails as a whole.
/// Returns the number of rows inserted.
pub async fn insert_price_batch(
    conn: &mut MySqlConnection,
    records: &[EnrichedRecord],
) -> Result<u64> {
    if records.is_empty() {
        return Ok(0);
    }

    let mut tx = conn
        .begin()
        .await
        .context("Failed to begin price batch transaction")?;

    let mut inserted = 0;
    for chunk in records.chunks(MAX_ROWS_PER_STATEMENT) {
        let mut builder: QueryBuilder<MySql> =
            QueryBuilder::new("INSERT INTO crypto_prices (name, symbol, price, timestamp) ");
        builder.push_values(chunk, |mut row, record| {
            row.push_bind(record.name.as_str())
                .push_bind(record.symbol.as_str())
                .push_bind(record.price.as_str())
                .push_bind(stored_timestamp(record));
        });

        let result = builder
            .build()
            .execute(&mut *tx)
            .await
            .context("Failed to insert crypto prices")?;
        inserted += result.rows_affected();
    }

    tx.commit()
        .await
        .context("Failed to commit price batch")?;

    debug!("Inserted {} price rows", inserted);
    Ok(inserted)
}

/// Value written to the `timestamp` column: the host's local wall-clock time
pub fn stored_timestamp(record: &EnrichedRecord) -> NaiveDateTime {
    record.observed_at.naive_local()
}

/// Most recent stored row for a symbol
pub async fn get_latest_price(
    conn: &mut MySqlConnection,
    symbol: &str,
) -> Result<Option<StoredPrice>> {
    let record = sqlx::query_as::<_, StoredPrice>(
        r#"
        SELECT id, name, symbol, price, timestamp
        FROM crypto_prices
        WHERE symbol = ?
        ORDER BY id DESC
        LIMIT 1
        "#,
    )
    .bind(symbol)
    .fetch_optional(&mut *conn)
    .await
    .context("Failed to fetch latest crypto price")?;

    Ok(record)
}

/// Row as stored in `crypto_prices`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoredPrice {
    pub id: i32,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub price: Option<String>,
    pub timestamp: Option<NaiveDateTime>,
}
