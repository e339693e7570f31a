use log::warn;
use std::collections::BTreeMap;

use crate::config;
use crate::models::{AggregateRow, AuctionRecord, Dimension};

/// Average realized price per value of `dimension`.
///
/// Brand, Color and Leather rows are ordered by descending average (ties by
/// label); Leather keeps only the top [`config::LEATHER_CHART_LIMIT`]. Year
/// rows are ordered by ascending year. Records without the dimension are
/// skipped; when none of a non-empty set carries it, a single placeholder
/// row is returned instead.
pub fn aggregate(records: &[AuctionRecord], dimension: Dimension) -> Vec<AggregateRow> {
    if records.is_empty() {
        return Vec::new();
    }

    let rows: Vec<AggregateRow> = match dimension {
        Dimension::Year => group_means(records, |r| r.year)
            .into_iter()
            .map(|(year, avg)| AggregateRow::new(year.to_string(), avg))
            .collect(),
        _ => {
            let mut means = group_means(records, |r| r.text_value(dimension));
            means.sort_by(|(la, a), (lb, b)| b.total_cmp(a).then_with(|| la.cmp(lb)));
            if dimension == Dimension::Leather {
                means.truncate(config::LEATHER_CHART_LIMIT);
            }
            means
                .into_iter()
                .map(|(label, avg)| AggregateRow::new(label, avg))
                .collect()
        }
    };

    if rows.is_empty() {
        warn!(
            "No record carries {}; returning placeholder row",
            dimension.label()
        );
        return vec![AggregateRow::placeholder()];
    }

    rows
}

/// Single pass over `records`, grouping by `key`. Output is ordered by key.
fn group_means<'a, K, F>(records: &'a [AuctionRecord], key: F) -> Vec<(K, f64)>
where
    K: Ord,
    F: Fn(&'a AuctionRecord) -> Option<K>,
{
    let mut groups: BTreeMap<K, (f64, usize)> = BTreeMap::new();
    for record in records {
        if let Some(k) = key(record) {
            let entry = groups.entry(k).or_insert((0.0, 0));
            entry.0 += record.realized_price;
            entry.1 += 1;
        }
    }
    groups
        .into_iter()
        .map(|(k, (sum, count))| (k, sum / count as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lot(brand: &str, price: f64) -> AuctionRecord {
        AuctionRecord::new(brand, price)
    }

    #[test]
    fn brand_means_descending() {
        let records = vec![lot("Hermès", 12000.0), lot("Chanel", 8000.0), lot("Hermès", 15000.0)];
        let rows = aggregate(&records, Dimension::Brand);
        assert_eq!(
            rows,
            vec![AggregateRow::new("Hermès", 13500.0), AggregateRow::new("Chanel", 8000.0)]
        );
    }

    #[test]
    fn ties_break_on_label() {
        let records = vec![lot("Prada", 500.0), lot("Dior", 500.0)];
        let labels: Vec<_> = aggregate(&records, Dimension::Brand)
            .into_iter()
            .map(|r| r.label)
            .collect();
        assert_eq!(labels, vec!["Dior", "Prada"]);
    }

    #[test]
    fn years_ascending_regardless_of_price() {
        let records = vec![
            AuctionRecord { year: Some(2021), ..lot("A", 100.0) },
            AuctionRecord { year: Some(2008), ..lot("B", 900.0) },
            AuctionRecord { year: Some(2015), ..lot("C", 500.0) },
            AuctionRecord { year: Some(2008), ..lot("D", 100.0) },
        ];
        let rows = aggregate(&records, Dimension::Year);
        assert_eq!(
            rows,
            vec![
                AggregateRow::new("2008", 500.0),
                AggregateRow::new("2015", 500.0),
                AggregateRow::new("2021", 100.0),
            ]
        );
    }

    #[test]
    fn leather_capped_at_ten() {
        let records: Vec<_> = (0..15)
            .map(|i| AuctionRecord {
                leather: Some(format!("Leather {:02}", i)),
                ..lot("Hermès", 1000.0 + i as f64)
            })
            .collect();
        let rows = aggregate(&records, Dimension::Leather);
        assert_eq!(rows.len(), config::LEATHER_CHART_LIMIT);
        assert_eq!(rows[0].label, "Leather 14");
        assert_eq!(rows[9].label, "Leather 05");
    }

    #[test]
    fn records_without_dimension_are_skipped() {
        let records = vec![
            AuctionRecord { color: Some("Noir".into()), ..lot("Chanel", 4000.0) },
            lot("Chanel", 99999.0),
        ];
        assert_eq!(
            aggregate(&records, Dimension::Color),
            vec![AggregateRow::new("Noir", 4000.0)]
        );
    }

    #[test]
    fn absent_dimension_yields_placeholder() {
        let records = vec![lot("Chanel", 4000.0), lot("Hermès", 9000.0)];
        let rows = aggregate(&records, Dimension::Year);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_placeholder());
    }

    #[test]
    fn empty_input_yields_no_rows() {
        for dimension in Dimension::ALL {
            assert!(aggregate(&[], dimension).is_empty());
        }
    }
}
