//! Configuration for price_ingest_rust

use anyhow::Result;
use snapshot_rust_core::clients::binance::TICKER_PRICE_URL;
use snapshot_rust_core::db::DbConfig;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_REFERENCE_CSV: &str = "All Coins - 2000+ results.csv";
pub const DEFAULT_LOG_FILE: &str = "log.txt";

#[derive(Debug, Clone)]
pub struct IngestConfig {
    // Reference pair list, read once at startup
    pub reference_csv: PathBuf,

    // Upstream
    pub ticker_url: String,

    // Database
    pub db: DbConfig,

    // Logging
    pub log_file: PathBuf,
}

impl IngestConfig {
    pub fn from_env() -> Result<Self> {
        let db = DbConfig::from_env()?;

        Ok(Self {
            reference_csv: env::var("REFERENCE_CSV")
                .unwrap_or_else(|_| DEFAULT_REFERENCE_CSV.to_string())
                .into(),

            ticker_url: env::var("TICKER_URL")
                .unwrap_or_else(|_| TICKER_PRICE_URL.to_string()),

            db,

            log_file: env::var("LOG_FILE")
                .unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string())
                .into(),
        })
    }
}
