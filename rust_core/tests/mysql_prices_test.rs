//! crypto_prices round trip against a live MySQL
//!
//! Uses the DB_HOST / DB_PORT / DB_USER / DB_PASS / DB settings.
//! Run with `cargo test -- --ignored` when a database is available.

use chrono::Local;
use snapshot_rust_core::db::prices::{ensure_price_table, get_latest_price, insert_price_batch};
use snapshot_rust_core::db::{connect, DbConfig};
use snapshot_rust_core::models::{EnrichedRecord, PRICE_NOT_AVAILABLE};
use sqlx::Connection;

#[tokio::test]
#[ignore] // Requires MySQL
async fn test_schema_creation_is_idempotent_and_rows_append() {
    let config = DbConfig::from_env().unwrap();
    let mut conn = connect(&config).await.unwrap();

    ensure_price_table(&mut conn).await.unwrap();
    let symbol = format!("TEST{}", Local::now().timestamp_micros());
    let records = vec![
        EnrichedRecord {
            name: "TEST/USDT".to_string(),
            symbol: symbol.clone(),
            price: "1.2345".to_string(),
            observed_at: Local::now(),
        },
        EnrichedRecord {
            name: "TEST/USDT".to_string(),
            symbol: symbol.clone(),
            price: PRICE_NOT_AVAILABLE.to_string(),
            observed_at: Local::now(),
        },
    ];
    let inserted = insert_price_batch(&mut conn, &records).await.unwrap();
    assert_eq!(inserted, 2);

    // Second create must not fail or touch existing rows
    ensure_price_table(&mut conn).await.unwrap();

    let latest = get_latest_price(&mut conn, &symbol).await.unwrap().unwrap();
    assert_eq!(latest.price.as_deref(), Some(PRICE_NOT_AVAILABLE));
    assert_eq!(latest.name.as_deref(), Some("TEST/USDT"));

    conn.close().await.unwrap();
}
