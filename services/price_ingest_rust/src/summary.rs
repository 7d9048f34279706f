//! Per-cycle found/not-found summary

use snapshot_rust_core::models::EnrichedRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleSummary {
    pub found: Vec<String>,
    pub not_found: Vec<String>,
}

impl CycleSummary {
    pub fn from_records(records: &[EnrichedRecord]) -> Self {
        let (found, not_found): (Vec<_>, Vec<_>) = records.iter().partition(|r| r.is_priced());
        Self {
            found: found.into_iter().map(|r| r.symbol.clone()).collect(),
            not_found: not_found.into_iter().map(|r| r.symbol.clone()).collect(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.not_found.is_empty()
    }

    /// The single log line emitted at the end of a cycle
    pub fn log_line(&self) -> String {
        if self.is_complete() {
            "Session done: Every price received.".to_string()
        } else {
            format!(
                "Session incomplete: Prices not found for trading pairs: {}. Prices found for: {}.",
                self.not_found.join(", "),
                self.found.join(", ")
            )
        }
    }
}
