//! Log setup: stdout plus an append-only log file, `YYYY-MM-DD HH:MM:SS` timestamps

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::warn;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const LOG_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Install the global subscriber. `RUST_LOG` overrides the `info` default.
///
/// If the log file cannot be opened, logging continues on stdout only.
pub fn init_logging(log_file: &Path) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stdout_layer = fmt::layer()
        .with_target(false)
        .with_timer(ChronoLocal::new(LOG_TIME_FORMAT.to_string()));

    let opened = OpenOptions::new().create(true).append(true).open(log_file);
    let (file_layer, open_error) = match opened {
        Ok(file) => (
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_timer(ChronoLocal::new(LOG_TIME_FORMAT.to_string()))
                    .with_writer(Mutex::new(file)),
            ),
            None,
        ),
        Err(e) => (None, Some(e)),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    if let Some(e) = open_error {
        warn!(
            "Could not open log file '{}': {}; logging to stdout only",
            log_file.display(),
            e
        );
    }
}
