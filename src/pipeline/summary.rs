use crate::models::{AuctionRecord, SummaryStats};

/// Header statistics over `records`.
///
/// An empty set yields all zeros. Records lacking an estimate only drop out
/// of that estimate's maximum; they still count.
pub fn summarize(records: &[AuctionRecord]) -> SummaryStats {
    if records.is_empty() {
        return SummaryStats::default();
    }

    let mut total = 0.0;
    let mut max_price = f64::NEG_INFINITY;
    let mut min_price = f64::INFINITY;
    let mut max_lower: Option<f64> = None;
    let mut max_higher: Option<f64> = None;

    for record in records {
        total += record.realized_price;
        max_price = max_price.max(record.realized_price);
        min_price = min_price.min(record.realized_price);
        max_lower = max_of(max_lower, record.lower_estimate);
        max_higher = max_of(max_higher, record.higher_estimate);
    }

    SummaryStats {
        total_items: records.len(),
        avg_price: total / records.len() as f64,
        max_price,
        min_price,
        max_lower_estimate: max_lower.unwrap_or(0.0),
        max_higher_estimate: max_higher.unwrap_or(0.0),
    }
    .rounded()
}

fn max_of(current: Option<f64>, candidate: Option<f64>) -> Option<f64> {
    match (current, candidate) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_all_zero() {
        assert_eq!(summarize(&[]), SummaryStats::default());
    }

    #[test]
    fn prices_and_count() {
        let records = vec![
            AuctionRecord::new("Hermès", 12000.0),
            AuctionRecord::new("Chanel", 8000.0),
            AuctionRecord::new("Hermès", 15000.0),
        ];
        let stats = summarize(&records);
        assert_eq!(stats.total_items, 3);
        assert_eq!(stats.avg_price, 11666.67);
        assert_eq!(stats.max_price, 15000.0);
        assert_eq!(stats.min_price, 8000.0);
        assert_eq!(stats.max_lower_estimate, 0.0);
        assert_eq!(stats.max_higher_estimate, 0.0);
    }

    #[test]
    fn partial_estimates_only_affect_their_maximum() {
        let records = vec![
            AuctionRecord {
                lower_estimate: Some(7000.0),
                higher_estimate: None,
                ..AuctionRecord::new("Hermès", 9000.0)
            },
            AuctionRecord {
                lower_estimate: None,
                higher_estimate: Some(11000.0),
                ..AuctionRecord::new("Chanel", 6000.0)
            },
            AuctionRecord::new("Dior", 3000.0),
        ];
        let stats = summarize(&records);
        assert_eq!(stats.total_items, 3);
        assert_eq!(stats.max_lower_estimate, 7000.0);
        assert_eq!(stats.max_higher_estimate, 11000.0);
        assert_eq!(stats.avg_price, 6000.0);
    }
}
