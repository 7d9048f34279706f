//! Reference pair list loading
//!
//! The pair list is a CSV with at least `Trading Pair`, `Base Asset` and
//! `Quote Asset` columns. Extra columns are ignored. Rows with empty or
//! missing fields are kept so the reconciler can report them one by one.

use anyhow::{Context, Result};
use snapshot_rust_core::models::ReferenceRow;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::warn;

const REQUIRED_COLUMNS: [&str; 3] = ["Trading Pair", "Base Asset", "Quote Asset"];

/// Load the reference pair list from a CSV file.
pub fn load_reference_rows(path: &Path) -> Result<Vec<ReferenceRow>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open reference CSV '{}'", path.display()))?;
    read_reference_rows(file)
}

/// Parse reference rows from any CSV reader.
///
/// Records the CSV parser cannot decode are logged and skipped.
pub fn read_reference_rows<R: Read>(source: R) -> Result<Vec<ReferenceRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        // Values are taken verbatim; only header names are trimmed
        .trim(csv::Trim::Headers)
        .from_reader(source);

    let headers = reader
        .headers()
        .context("Failed to read reference CSV headers")?
        .clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            warn!("Reference CSV has no '{}' column; every row will be rejected", column);
        }
    }

    let mut rows = Vec::new();
    for (idx, result) in reader.deserialize::<ReferenceRow>().enumerate() {
        // +2: header is line 1
        let line = idx + 2;
        match result {
            Ok(row) => rows.push(row),
            Err(e) => warn!("Skipping reference CSV line {}: {}", line, e),
        }
    }

    Ok(rows)
}
