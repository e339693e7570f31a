//! One dashboard request: fetch once, then summarize, aggregate and rank.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::Result;
use crate::models::{AggregateRow, Dimension, SummaryStats, TopBag};
use crate::pipeline::{self, FilterSpec};
use crate::source::RecordSource;

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Everything the dashboard page shows for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Dashboard {
    pub stats: SummaryStats,
    pub brands: Vec<AggregateRow>,
    pub colors: Vec<AggregateRow>,
    pub leathers: Vec<AggregateRow>,
    pub years: Vec<AggregateRow>,
    pub top_bags: Vec<TopBag>,
}

impl Dashboard {
    /// Aggregate rows for `dimension`.
    pub fn aggregates(&self, dimension: Dimension) -> &[AggregateRow] {
        match dimension {
            Dimension::Brand => &self.brands,
            Dimension::Color => &self.colors,
            Dimension::Leather => &self.leathers,
            Dimension::Year => &self.years,
        }
    }
}

// ---------------------------------------------------------------------------
// DashboardQuery
// ---------------------------------------------------------------------------

/// Runs the pipeline over a borrowed record source.
pub struct DashboardQuery<'a, S: RecordSource + ?Sized> {
    source: &'a S,
    top_n: usize,
}

impl<'a, S: RecordSource + ?Sized> DashboardQuery<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            top_n: config::DEFAULT_TOP_N,
        }
    }

    /// Size of the top-bags listing (defaults to [`config::DEFAULT_TOP_N`]).
    pub fn top_n(mut self, n: usize) -> Self {
        self.top_n = n;
        self
    }

    /// Build the dashboard for `filter`.
    ///
    /// Only a failure of the record source is an error; empty selections
    /// and missing fields produce zeroed or placeholder output.
    pub fn build(&self, filter: &FilterSpec) -> Result<Dashboard> {
        let records = self.source.fetch(filter)?;
        debug!("Building dashboard over {} records ({})", records.len(), filter);

        Ok(Dashboard {
            stats: pipeline::summarize(&records),
            brands: pipeline::aggregate(&records, Dimension::Brand),
            colors: pipeline::aggregate(&records, Dimension::Color),
            leathers: pipeline::aggregate(&records, Dimension::Leather),
            years: pipeline::aggregate(&records, Dimension::Year),
            top_bags: pipeline::top_n(&records, self.top_n),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuctionError;
    use crate::models::AuctionRecord;

    struct Unreachable;

    impl RecordSource for Unreachable {
        fn fetch(&self, _filter: &FilterSpec) -> Result<Vec<AuctionRecord>> {
            Err(AuctionError::DataAccess("database is locked".into()))
        }
    }

    #[test]
    fn source_failure_propagates() {
        let err = DashboardQuery::new(&Unreachable)
            .build(&FilterSpec::All)
            .unwrap_err();
        assert!(err.is_data_access());
    }

    #[test]
    fn empty_source_yields_zeroed_dashboard() {
        let records: Vec<AuctionRecord> = Vec::new();
        let dashboard = DashboardQuery::new(records.as_slice())
            .build(&FilterSpec::All)
            .unwrap();
        assert_eq!(dashboard.stats, SummaryStats::default());
        for dimension in Dimension::ALL {
            assert!(dashboard.aggregates(dimension).is_empty());
        }
        assert!(dashboard.top_bags.is_empty());
    }

    #[test]
    fn filter_applies_before_aggregation() {
        let records = vec![
            AuctionRecord::new("Hermès", 12000.0),
            AuctionRecord::new("Chanel", 8000.0),
            AuctionRecord::new("Hermès", 15000.0),
        ];
        let dashboard = DashboardQuery::new(records.as_slice())
            .top_n(1)
            .build(&FilterSpec::eq(Dimension::Brand, "Hermès"))
            .unwrap();
        assert_eq!(dashboard.stats.total_items, 2);
        assert_eq!(dashboard.brands, vec![AggregateRow::new("Hermès", 13500.0)]);
        assert_eq!(dashboard.top_bags.len(), 1);
        assert_eq!(dashboard.top_bags[0].realized_price, 15000.0);
    }
}
