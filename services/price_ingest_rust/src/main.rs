use anyhow::Result;
use dotenv::dotenv;
use price_ingest_rust::logging::init_logging;
use price_ingest_rust::reference::load_reference_rows;
use price_ingest_rust::{CycleDriver, IngestConfig, PriceSink};
use snapshot_rust_core::clients::BinanceTickerClient;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = IngestConfig::from_env()?;
    init_logging(&config.log_file);

    info!("Script execution started.");

    let reference = load_reference_rows(&config.reference_csv)?;
    info!(
        "Loaded input CSV file: {} rows from {}",
        reference.len(),
        config.reference_csv.display()
    );

    let source = Arc::new(BinanceTickerClient::with_url(config.ticker_url.clone())?);
    let sink = PriceSink::mysql(config.db.clone());

    CycleDriver::new(source, sink, reference).run().await;

    Ok(())
}
