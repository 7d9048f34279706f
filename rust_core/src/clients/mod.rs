pub mod binance;
pub mod price_source;

// Re-export commonly used types
pub use binance::BinanceTickerClient;
pub use price_source::PriceSource;
