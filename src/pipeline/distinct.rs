use std::collections::BTreeSet;

use crate::models::{AuctionRecord, Dimension};

/// Distinct values of `dimension`, ascending (years numerically).
///
/// With `with_sentinel`, the list starts with the "All ..." entry used by
/// filter dropdowns.
pub fn distinct_values(
    records: &[AuctionRecord],
    dimension: Dimension,
    with_sentinel: bool,
) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    if with_sentinel {
        values.push(dimension.all_sentinel());
    }

    match dimension {
        Dimension::Year => {
            let years: BTreeSet<i32> = records.iter().filter_map(|r| r.year).collect();
            values.extend(years.into_iter().map(|y| y.to_string()));
        }
        _ => {
            let labels: BTreeSet<&str> = records
                .iter()
                .filter_map(|r| r.text_value(dimension))
                .collect();
            values.extend(labels.into_iter().map(str::to_string));
        }
    }

    values
}
