//! Binance API Client
//!
//! Fetches the bulk price ticker from the Binance public API.
//! No API key required for public endpoints.
//!
//! One request returns every listed symbol, so a single call per cycle is
//! well inside the 1200 requests/minute IP limit.

use super::price_source::PriceSource;
use crate::models::PriceSnapshot;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info, warn};

pub const TICKER_PRICE_URL: &str = "https://api.binance.com/api/v3/ticker/price";
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Binance bulk ticker client implementing PriceSource
pub struct BinanceTickerClient {
    client: Client,
    url: String,
}

impl BinanceTickerClient {
    /// Create a client for the public Binance ticker endpoint
    pub fn new() -> Result<Self> {
        Self::with_url(TICKER_PRICE_URL)
    }

    /// Create a client for a custom ticker endpoint (mirrors, test stubs)
    pub fn with_url(url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent("PriceIngest/1.0")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl PriceSource for BinanceTickerClient {
    fn source_name(&self) -> &str {
        "Binance"
    }

    async fn fetch(&self) -> PriceSnapshot {
        debug!("Fetching ticker prices from {}", self.url);

        let response = match self.client.get(&self.url).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Error fetching API data: {}", e);
                return PriceSnapshot::empty();
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            warn!("API Error: Status Code {}", status.as_u16());
            return PriceSnapshot::empty();
        }

        match response.json::<Vec<TickerPrice>>().await {
            Ok(tickers) => {
                info!("Successfully fetched API data.");
                snapshot_from_tickers(tickers)
            }
            Err(e) => {
                error!("Error fetching API data: {}", e);
                PriceSnapshot::empty()
            }
        }
    }
}

/// Binance `/ticker/price` entry
#[derive(Debug, Deserialize)]
pub struct TickerPrice {
    pub symbol: String,
    /// Decimal text, kept verbatim
    pub price: String,
}

/// Convert ticker entries to a snapshot; later duplicates overwrite earlier ones.
pub fn snapshot_from_tickers(tickers: Vec<TickerPrice>) -> PriceSnapshot {
    PriceSnapshot::from_entries(tickers.into_iter().map(|t| (t.symbol, t.price)))
}
