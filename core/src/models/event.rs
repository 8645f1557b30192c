//! Round log
//!
//! Structured per-round record of what the auction engine did. This replaces
//! ad-hoc debug output: drivers that want to analyse convergence (trade
//! volume, price dispersion, how the target year moved) read the log after
//! the run instead of instrumenting the engine.

use serde::{Deserialize, Serialize};

use crate::models::household::Year;
use crate::models::transaction::Transaction;

/// What the engine observed and did in a single round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Round index (0-based)
    pub round: usize,

    /// Forced-plurality target year fed to the bid constructors
    pub target_year: Year,

    /// Number of pooled sell offers this round
    pub sell_bids: usize,

    /// Number of pooled buy offers this round
    pub buy_bids: usize,

    /// Trades cleared this round, in clearing order
    pub trades: Vec<Transaction>,
}

/// Append-only log of round records for one auction run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundLog {
    records: Vec<RoundRecord>,
}

impl RoundLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a round record
    pub fn log(&mut self, record: RoundRecord) {
        self.records.push(record);
    }

    /// Number of rounds recorded
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if no rounds have been recorded
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, in round order
    pub fn records(&self) -> &[RoundRecord] {
        &self.records
    }

    /// Total number of trades cleared across all rounds
    pub fn total_trades(&self) -> usize {
        self.records.iter().map(|r| r.trades.len()).sum()
    }

    /// Serialize the whole log to JSON for external analysis tooling
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.records)
    }
}
