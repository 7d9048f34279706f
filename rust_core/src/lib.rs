//! Snapshot Core - shared building blocks for the price snapshot ingester.
//!
//! This crate provides:
//! - Domain models (reference rows, price snapshots, enriched records)
//! - The `PriceSource` trait and the Binance bulk ticker client
//! - MySQL connection settings and `crypto_prices` table operations

pub mod clients;
pub mod db;
pub mod models;

pub use clients::{BinanceTickerClient, PriceSource};
pub use db::DbConfig;
pub use models::{EnrichedRecord, PriceSnapshot, ReferenceRow, PRICE_NOT_AVAILABLE};
