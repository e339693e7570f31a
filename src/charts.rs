//! Chart payloads for the dashboard front end.
//!
//! Converts pipeline output into plain, renderer-agnostic chart
//! descriptions. Nothing here knows about a particular charting library;
//! the front end maps `kind`, `labels` and `values` onto whatever it draws
//! with.

use serde::{Deserialize, Serialize};

use crate::config;
use crate::models::{AggregateRow, Dimension, SummaryStats, TopBag};
use crate::queries::Dashboard;

const PRICE_AXIS: &str = "Average Realized Price (USD)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Line,
}

/// One chart: parallel `labels` / `values` series plus display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ChartPayload {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    /// True when the series is the "no data" placeholder or empty.
    pub no_data: bool,
}

impl ChartPayload {
    /// Chart for one dimension's aggregate rows.
    ///
    /// Year renders as a line trend, every other dimension as bars.
    pub fn from_aggregates(dimension: Dimension, rows: &[AggregateRow]) -> Self {
        let (kind, title) = match dimension {
            Dimension::Year => (ChartKind::Line, "Average Price Trend by Year".to_string()),
            Dimension::Leather => (
                ChartKind::Bar,
                format!("Top {} Leathers by Average Price", config::LEATHER_CHART_LIMIT),
            ),
            _ => (ChartKind::Bar, format!("Average Price by {}", dimension.label())),
        };

        Self {
            kind,
            title,
            x_label: dimension.label().to_string(),
            y_label: PRICE_AXIS.to_string(),
            labels: rows.iter().map(|r| r.label.clone()).collect(),
            values: rows.iter().map(|r| r.avg_price).collect(),
            no_data: rows.is_empty() || rows.iter().all(AggregateRow::is_placeholder),
        }
    }
}

/// JSON body of the dashboard endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DashboardResponse {
    pub stats: SummaryStats,
    pub brand_chart: ChartPayload,
    pub color_chart: ChartPayload,
    pub leather_chart: ChartPayload,
    pub year_chart: ChartPayload,
    pub top_bags: Vec<TopBag>,
}

impl From<Dashboard> for DashboardResponse {
    fn from(dashboard: Dashboard) -> Self {
        Self {
            brand_chart: ChartPayload::from_aggregates(Dimension::Brand, &dashboard.brands),
            color_chart: ChartPayload::from_aggregates(Dimension::Color, &dashboard.colors),
            leather_chart: ChartPayload::from_aggregates(Dimension::Leather, &dashboard.leathers),
            year_chart: ChartPayload::from_aggregates(Dimension::Year, &dashboard.years),
            stats: dashboard.stats,
            top_bags: dashboard.top_bags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_is_a_line_chart() {
        let rows = vec![AggregateRow::new("2019", 9500.0), AggregateRow::new("2020", 8500.0)];
        let chart = ChartPayload::from_aggregates(Dimension::Year, &rows);
        assert_eq!(chart.kind, ChartKind::Line);
        assert_eq!(chart.labels, vec!["2019", "2020"]);
        assert_eq!(chart.values, vec![9500.0, 8500.0]);
        assert!(!chart.no_data);
    }

    #[test]
    fn placeholder_marks_no_data() {
        let chart = ChartPayload::from_aggregates(Dimension::Year, &[AggregateRow::placeholder()]);
        assert!(chart.no_data);
        assert_eq!(chart.labels, vec![config::NO_DATA_LABEL]);
        assert!(ChartPayload::from_aggregates(Dimension::Brand, &[]).no_data);
    }

    #[test]
    fn response_serializes_with_chart_keys() {
        let dashboard = Dashboard {
            stats: SummaryStats::default(),
            brands: vec![AggregateRow::new("Hermès", 13500.0)],
            colors: Vec::new(),
            leathers: Vec::new(),
            years: Vec::new(),
            top_bags: Vec::new(),
        };
        let json = serde_json::to_value(DashboardResponse::from(dashboard)).unwrap();
        for key in ["stats", "brand_chart", "color_chart", "leather_chart", "year_chart", "top_bags"] {
            assert!(json.get(key).is_some(), "missing key {}", key);
        }
        assert_eq!(json["brand_chart"]["kind"], "bar");
        assert_eq!(json["brand_chart"]["labels"][0], "Hermès");
        assert_eq!(json["stats"]["total_items"], 0);
    }
}
