//! The filter -> aggregate -> summarize -> rank pipeline.
//!
//! Everything here is pure: functions take an already-materialized record
//! slice and return plain data, so results are identical for identical
//! input and carry no rendering concerns.

pub mod aggregate;
pub mod distinct;
pub mod filter;
pub mod ranking;
pub mod summary;

pub use aggregate::aggregate;
pub use distinct::distinct_values;
pub use filter::{sort_for_display, FilterSpec};
pub use ranking::top_n;
pub use summary::summarize;

use crate::models::AuctionRecord;

/// Resolve request parameters into a [`FilterSpec`].
pub fn resolve(dimension: Option<&str>, value: Option<&str>) -> FilterSpec {
    FilterSpec::resolve(dimension, value)
}

/// Records matching `filter`, in display order.
pub fn apply_filter(records: &[AuctionRecord], filter: &FilterSpec) -> Vec<AuctionRecord> {
    let mut selected: Vec<AuctionRecord> = records
        .iter()
        .filter(|r| filter.matches(r))
        .cloned()
        .collect();
    if let Some(key) = filter.order_key() {
        sort_for_display(&mut selected, key);
    }
    selected
}
