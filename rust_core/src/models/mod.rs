// Shared models for the snapshot ingester
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Price stored when a reference symbol is missing from the live snapshot.
pub const PRICE_NOT_AVAILABLE: &str = "N/A";

// ============================================================================
// Reference Data
// ============================================================================

/// One row of the reference pair list.
///
/// Fields are optional so that an incomplete row still loads and is rejected
/// on its own during reconciliation instead of failing the whole file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRow {
    #[serde(rename = "Trading Pair", default)]
    pub trading_pair: Option<String>,
    #[serde(rename = "Base Asset", default)]
    pub base_asset: Option<String>,
    #[serde(rename = "Quote Asset", default)]
    pub quote_asset: Option<String>,
}

impl ReferenceRow {
    pub fn new(trading_pair: &str, base_asset: &str, quote_asset: &str) -> Self {
        Self {
            trading_pair: Some(trading_pair.to_string()),
            base_asset: Some(base_asset.to_string()),
            quote_asset: Some(quote_asset.to_string()),
        }
    }
}

// ============================================================================
// Price Snapshot
// ============================================================================

/// Full set of upstream prices from a single fetch, keyed by symbol.
///
/// Prices are kept as the upstream decimal text and never parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceSnapshot {
    prices: HashMap<String, String>,
}

impl PriceSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a snapshot from `(symbol, price)` pairs in response order.
    /// A repeated symbol keeps the last price seen.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            prices: entries.into_iter().collect(),
        }
    }

    pub fn price(&self, symbol: &str) -> Option<&str> {
        self.prices.get(symbol).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

// ============================================================================
// Enriched Records
// ============================================================================

/// Reference row joined with its live price, ready for storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    /// Display name, `"{base}/{quote}"`
    pub name: String,
    pub symbol: String,
    /// Upstream price text or [`PRICE_NOT_AVAILABLE`]
    pub price: String,
    pub observed_at: DateTime<Local>,
}

impl EnrichedRecord {
    pub fn is_priced(&self) -> bool {
        self.price != PRICE_NOT_AVAILABLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_last_entry_wins() {
        let snapshot = PriceSnapshot::from_entries(vec![
            ("BTCUSDT".to_string(), "1.0".to_string()),
            ("ETHUSDT".to_string(), "2.0".to_string()),
            ("BTCUSDT".to_string(), "3.0".to_string()),
        ]);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.price("BTCUSDT"), Some("3.0"));
        assert_eq!(snapshot.price("ETHUSDT"), Some("2.0"));
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = PriceSnapshot::empty();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.price("BTCUSDT"), None);
    }

    #[test]
    fn test_record_is_priced() {
        let mut record = EnrichedRecord {
            name: "BTC/USDT".to_string(),
            symbol: "BTCUSDT".to_string(),
            price: "65000.12".to_string(),
            observed_at: Local::now(),
        };
        assert!(record.is_priced());

        record.price = PRICE_NOT_AVAILABLE.to_string();
        assert!(!record.is_priced());
    }
}
