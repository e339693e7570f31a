use serde::{Deserialize, Serialize};

use crate::config;

// ---------------------------------------------------------------------------
// AggregateRow: Average realized price for one dimension value
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AggregateRow {
    pub label: String,
    pub avg_price: f64,
}

impl AggregateRow {
    pub fn new(label: impl Into<String>, avg_price: f64) -> Self {
        Self {
            label: label.into(),
            avg_price: round_cents(avg_price),
        }
    }

    /// Row standing in for a dimension no record carries.
    pub fn placeholder() -> Self {
        Self::new(config::NO_DATA_LABEL, 0.0)
    }

    pub fn is_placeholder(&self) -> bool {
        self.label == config::NO_DATA_LABEL && self.avg_price == 0.0
    }
}

// ---------------------------------------------------------------------------
// SummaryStats: Header figures for the current selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SummaryStats {
    pub total_items: usize,
    pub avg_price: f64,
    pub max_price: f64,
    pub min_price: f64,
    pub max_lower_estimate: f64,
    pub max_higher_estimate: f64,
}

impl SummaryStats {
    /// Round every price to cents.
    pub fn rounded(self) -> Self {
        Self {
            total_items: self.total_items,
            avg_price: round_cents(self.avg_price),
            max_price: round_cents(self.max_price),
            min_price: round_cents(self.min_price),
            max_lower_estimate: round_cents(self.max_lower_estimate),
            max_higher_estimate: round_cents(self.max_higher_estimate),
        }
    }
}

/// Round a USD amount to two decimals.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
