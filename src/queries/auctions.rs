//! Auction record queries against the DuckDB-backed auction table.

use log::{debug, warn};
use serde_json::Value;
use std::collections::HashSet;

use crate::config;
use crate::connection::Connection;
use crate::error::{AuctionError, Result};
use crate::models::{AuctionRecord, Dimension, SummaryStats};
use crate::pipeline::FilterSpec;
use crate::source::RecordSource;
use crate::sql_builder::SqlBuilder;

/// Projected record columns, in [`AuctionRecord`] field order.
const RECORD_COLUMNS: [&str; 8] = [
    "brand",
    "description",
    "color",
    "leather",
    "year",
    "realized_price",
    "lower_estimate",
    "higher_estimate",
];

// ---------------------------------------------------------------------------
// AuctionQuery
// ---------------------------------------------------------------------------

/// Query interface over the auction table.
///
/// Every query reads through a typed projection of the source table: text
/// columns as VARCHAR, `Year` as INTEGER, prices as DOUBLE (with `$` and
/// thousands separators stripped). Optional columns the table lacks are
/// projected as NULL, so partial exports still load.
pub struct AuctionQuery<'a> {
    conn: &'a Connection,
}

impl<'a> AuctionQuery<'a> {
    /// Create a new `AuctionQuery` bound to the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Fetch records matching `filter`, ordered by the filtered dimension.
    pub fn fetch(&self, filter: &FilterSpec) -> Result<Vec<AuctionRecord>> {
        let mut qb = self.base_query()?;
        qb.select(&RECORD_COLUMNS);
        filter.apply(&mut qb);

        let (sql, params) = qb.build();
        let records: Vec<AuctionRecord> = self.conn.execute_into(&sql, &params)?;
        debug!("Fetched {} records for filter {}", records.len(), filter);
        Ok(records)
    }

    /// Number of records matching `filter`.
    pub fn count(&self, filter: &FilterSpec) -> Result<usize> {
        let mut qb = self.base_query()?;
        qb.select(&["COUNT(*) AS cnt"]);
        filter.apply_predicate(&mut qb);

        let (sql, params) = qb.build();
        let cnt = self
            .conn
            .execute_scalar(&sql, &params)?
            .and_then(|v| v.as_u64())
            .unwrap_or(0);
        Ok(cnt as usize)
    }

    /// Summary statistics computed in SQL.
    ///
    /// Agrees with [`crate::pipeline::summarize`] over the same records: all
    /// zeros for an empty selection, estimate maxima ignore missing values.
    pub fn summary_stats(&self, filter: &FilterSpec) -> Result<SummaryStats> {
        let mut qb = self.base_query()?;
        qb.select(&[
            "COUNT(*) AS total_items",
            "COALESCE(AVG(realized_price), 0) AS avg_price",
            "COALESCE(MAX(realized_price), 0) AS max_price",
            "COALESCE(MIN(realized_price), 0) AS min_price",
            "COALESCE(MAX(lower_estimate), 0) AS max_lower_estimate",
            "COALESCE(MAX(higher_estimate), 0) AS max_higher_estimate",
        ]);
        filter.apply_predicate(&mut qb);

        let (sql, params) = qb.build();
        let stats: Vec<SummaryStats> = self.conn.execute_into(&sql, &params)?;
        Ok(stats
            .into_iter()
            .next()
            .map(SummaryStats::rounded)
            .unwrap_or_default())
    }

    /// Distinct values of `dimension` present in the table, ascending.
    pub fn distinct(&self, dimension: Dimension) -> Result<Vec<String>> {
        let col = dimension.column();
        let value_col = format!("{} AS value", col);
        let mut qb = self.base_query()?;
        qb.select(&[value_col.as_str()])
            .distinct()
            .where_not_null(col)
            .order_by(&["value ASC"]);

        let (sql, params) = qb.build();
        let rows = self.conn.execute(&sql, &params)?;
        Ok(rows
            .into_iter()
            .filter_map(|mut row| match row.remove("value") {
                Some(Value::String(s)) => Some(s),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            })
            .collect())
    }

    /// Start a query over the typed projection, restricted to sold lots.
    fn base_query(&self) -> Result<SqlBuilder> {
        let columns = self.conn.table_columns()?;

        for required in config::REQUIRED_COLUMNS {
            if !columns.contains(required) {
                return Err(AuctionError::DataAccess(format!(
                    "table {} has no {:?} column",
                    self.conn.table(),
                    required
                )));
            }
        }

        let projection = [
            text_column(&columns, config::COL_BRAND, "brand"),
            format!(
                "COALESCE({}, '') AS description",
                text_expr(&columns, config::COL_DESCRIPTION)
            ),
            text_column(&columns, config::COL_COLOR, "color"),
            text_column(&columns, config::COL_LEATHER, "leather"),
            year_column(&columns),
            money_column(&columns, config::COL_REALIZED_PRICE, "realized_price"),
            money_column(&columns, config::COL_LOWER_ESTIMATE, "lower_estimate"),
            money_column(&columns, config::COL_HIGHER_ESTIMATE, "higher_estimate"),
        ]
        .join(", ");

        let mut qb = SqlBuilder::new(&format!(
            "(SELECT {} FROM {}) AS auctions",
            projection,
            self.conn.table()
        ));
        qb.where_not_null("brand").where_not_null("realized_price");
        Ok(qb)
    }
}

impl RecordSource for AuctionQuery<'_> {
    fn fetch(&self, filter: &FilterSpec) -> Result<Vec<AuctionRecord>> {
        AuctionQuery::fetch(self, filter)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn text_expr(columns: &HashSet<String>, source: &str) -> String {
    if columns.contains(source) {
        format!("CAST(\"{}\" AS VARCHAR)", source)
    } else {
        warn!("Column {:?} missing; projecting NULL", source);
        "CAST(NULL AS VARCHAR)".to_string()
    }
}

fn text_column(columns: &HashSet<String>, source: &str, alias: &str) -> String {
    format!("{} AS {}", text_expr(columns, source), alias)
}

fn year_column(columns: &HashSet<String>) -> String {
    if columns.contains(config::COL_YEAR) {
        format!("TRY_CAST(\"{}\" AS INTEGER) AS year", config::COL_YEAR)
    } else {
        warn!("Column {:?} missing; projecting NULL", config::COL_YEAR);
        "CAST(NULL AS INTEGER) AS year".to_string()
    }
}

fn money_column(columns: &HashSet<String>, source: &str, alias: &str) -> String {
    if columns.contains(source) {
        format!(
            "TRY_CAST(regexp_replace(CAST(\"{}\" AS VARCHAR), '[$,]', '', 'g') AS DOUBLE) AS {}",
            source, alias
        )
    } else {
        warn!("Column {:?} missing; projecting NULL", source);
        format!("CAST(NULL AS DOUBLE) AS {}", alias)
    }
}
