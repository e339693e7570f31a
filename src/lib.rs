//! Luxury handbag auction analytics for Rust.
//!
//! Reads a local database of auction results through DuckDB and turns it
//! into dashboard data: summary statistics, average-price aggregates by
//! brand, color, leather and year, and a top-N listing by realized price.
//!
//! # Quick start
//!
//! ```no_run
//! use handbag_auctions::{FilterSpec, HandbagAuctions};
//!
//! let auctions = HandbagAuctions::builder()
//!     .database_path("handbag_auctions.duckdb")
//!     .build()
//!     .unwrap();
//!
//! // Everything the dashboard shows for Hermès lots
//! let filter = FilterSpec::resolve(Some("Brand"), Some("Hermès"));
//! let dashboard = auctions.dashboard(&filter).unwrap();
//! println!("{} lots, avg ${}", dashboard.stats.total_items, dashboard.stats.avg_price);
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod charts;
pub mod config;
pub mod connection;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod queries;
pub mod source;
pub mod sql_builder;

#[cfg(feature = "async")]
pub use async_client::AsyncHandbagAuctions;
pub use charts::{ChartKind, ChartPayload, DashboardResponse};
pub use connection::{Connection, DataSource, Database};
pub use error::{AuctionError, Result};
pub use models::{AggregateRow, AuctionRecord, Dimension, SummaryStats, TopBag};
pub use pipeline::FilterSpec;
pub use queries::{AuctionQuery, Dashboard, DashboardQuery};
pub use source::RecordSource;
pub use sql_builder::SqlBuilder;

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

// ---------------------------------------------------------------------------
// HandbagAuctionsBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`HandbagAuctions`] instance.
///
/// Use [`HandbagAuctions::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](HandbagAuctionsBuilder::build).
pub struct HandbagAuctionsBuilder {
    source: Option<DataSource>,
    table: String,
    read_only: bool,
}

impl Default for HandbagAuctionsBuilder {
    fn default() -> Self {
        Self {
            source: None,
            table: config::DEFAULT_TABLE.to_string(),
            read_only: true,
        }
    }
}

impl HandbagAuctionsBuilder {
    /// Read from a DuckDB database file.
    ///
    /// If no source is set, [`config::default_db_path()`] is used.
    pub fn database_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source = Some(DataSource::DuckDb(path.as_ref().to_path_buf()));
        self
    }

    /// Read from a SQLite database file (always read-only).
    ///
    /// Uses DuckDB's `sqlite` extension, which is installed on first use.
    pub fn sqlite<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source = Some(DataSource::Sqlite(path.as_ref().to_path_buf()));
        self
    }

    /// Use an empty in-memory database; register the auction table afterwards
    /// through [`Connection::register_table_from_ndjson`] or
    /// [`Connection::register_table_from_csv`].
    pub fn in_memory(mut self) -> Self {
        self.source = Some(DataSource::InMemory);
        self
    }

    /// Name of the auction table. Defaults to [`config::DEFAULT_TABLE`].
    pub fn table(mut self, table: &str) -> Self {
        self.table = table.to_string();
        self
    }

    /// Open DuckDB files read-only. Defaults to `true`.
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Open the database.
    pub fn build(self) -> Result<HandbagAuctions> {
        let source = self
            .source
            .unwrap_or_else(|| DataSource::DuckDb(config::default_db_path()));
        let db = Database::open(source, &self.table, self.read_only)?;
        Ok(HandbagAuctions { db })
    }
}

// ---------------------------------------------------------------------------
// HandbagAuctions
// ---------------------------------------------------------------------------

/// Main entry point.
///
/// Owns the [`Database`]; every operation acquires its own [`Connection`],
/// runs, and releases it before returning.
pub struct HandbagAuctions {
    db: Database,
}

impl HandbagAuctions {
    /// Create a new builder.
    pub fn builder() -> HandbagAuctionsBuilder {
        HandbagAuctionsBuilder::default()
    }

    /// Acquire a connection. It is released when dropped.
    pub fn connect(&self) -> Result<Connection> {
        self.db.connect()
    }

    /// Run `f` with a freshly acquired connection.
    ///
    /// The connection is released on return, whether `f` succeeded or not.
    pub fn with_connection<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.connect()?;
        f(&conn)
    }

    // -- Pipeline operations -----------------------------------------------

    /// Records matching `filter`.
    pub fn records(&self, filter: &FilterSpec) -> Result<Vec<AuctionRecord>> {
        self.with_connection(|conn| AuctionQuery::new(conn).fetch(filter))
    }

    /// Stats, chart aggregates and top lots for `filter`.
    pub fn dashboard(&self, filter: &FilterSpec) -> Result<Dashboard> {
        self.with_connection(|conn| {
            let source = AuctionQuery::new(conn);
            DashboardQuery::new(&source).build(filter)
        })
    }

    /// The `n` most expensive lots across the whole dataset.
    pub fn top_bags(&self, n: usize) -> Result<Vec<TopBag>> {
        let records = self.records(&FilterSpec::All)?;
        Ok(pipeline::top_n(&records, n))
    }

    /// Summary statistics computed by the database.
    pub fn summary_stats(&self, filter: &FilterSpec) -> Result<SummaryStats> {
        self.with_connection(|conn| AuctionQuery::new(conn).summary_stats(filter))
    }

    /// Distinct values of `dimension`, ascending.
    pub fn distinct(&self, dimension: Dimension) -> Result<Vec<String>> {
        self.with_connection(|conn| AuctionQuery::new(conn).distinct(dimension))
    }

    /// Filter dropdown entries: the "All ..." sentinel followed by the
    /// distinct values of `dimension`.
    pub fn filter_options(&self, dimension: Dimension) -> Result<Vec<String>> {
        let mut options = vec![dimension.all_sentinel()];
        options.extend(self.distinct(dimension)?);
        Ok(options)
    }

    // -- Metadata and utility methods --------------------------------------

    /// Execute a raw, read-only SQL query.
    ///
    /// # Arguments
    ///
    /// * `query` - SQL string with `?` positional placeholders.
    /// * `params` - Parameter values corresponding to the placeholders.
    pub fn sql(&self, query: &str, params: &[String]) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        self.with_connection(|conn| conn.execute(query, params))
    }

    /// The underlying [`Database`].
    pub fn database(&self) -> &Database {
        &self.db
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for HandbagAuctions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HandbagAuctions(source={}, table={})",
            self.db.source().describe(),
            self.db.table()
        )
    }
}
