//! Async wrapper around [`HandbagAuctions`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//!
//! # Example
//!
//! ```no_run
//! use handbag_auctions::{AsyncHandbagAuctions, FilterSpec};
//!
//! #[tokio::main]
//! async fn main() {
//!     let auctions = AsyncHandbagAuctions::builder()
//!         .database_path("handbag_auctions.duckdb")
//!         .build()
//!         .await
//!         .unwrap();
//!
//!     let dashboard = auctions.dashboard(FilterSpec::All).await.unwrap();
//!     println!("{} lots", dashboard.stats.total_items);
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{AuctionError, Result};
use crate::models::{Dimension, SummaryStats, TopBag};
use crate::pipeline::FilterSpec;
use crate::queries::Dashboard;
use crate::HandbagAuctions;

// ---------------------------------------------------------------------------
// AsyncHandbagAuctionsBuilder
// ---------------------------------------------------------------------------

enum SourceChoice {
    Default,
    DuckDb(PathBuf),
    Sqlite(PathBuf),
    InMemory,
}

/// Builder for configuring and constructing an [`AsyncHandbagAuctions`] instance.
pub struct AsyncHandbagAuctionsBuilder {
    source: SourceChoice,
    table: Option<String>,
    read_only: bool,
}

impl Default for AsyncHandbagAuctionsBuilder {
    fn default() -> Self {
        Self {
            source: SourceChoice::Default,
            table: None,
            read_only: true,
        }
    }
}

impl AsyncHandbagAuctionsBuilder {
    /// Read from a DuckDB database file.
    pub fn database_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source = SourceChoice::DuckDb(path.as_ref().to_path_buf());
        self
    }

    /// Read from a SQLite database file.
    pub fn sqlite<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source = SourceChoice::Sqlite(path.as_ref().to_path_buf());
        self
    }

    /// Use an empty in-memory database.
    pub fn in_memory(mut self) -> Self {
        self.source = SourceChoice::InMemory;
        self
    }

    /// Name of the auction table.
    pub fn table(mut self, table: &str) -> Self {
        self.table = Some(table.to_string());
        self
    }

    /// Open DuckDB files read-only. Defaults to `true`.
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Open the database on the blocking thread pool.
    pub async fn build(self) -> Result<AsyncHandbagAuctions> {
        tokio::task::spawn_blocking(move || {
            let mut builder = HandbagAuctions::builder().read_only(self.read_only);
            builder = match self.source {
                SourceChoice::Default => builder,
                SourceChoice::DuckDb(path) => builder.database_path(path),
                SourceChoice::Sqlite(path) => builder.sqlite(path),
                SourceChoice::InMemory => builder.in_memory(),
            };
            if let Some(table) = self.table {
                builder = builder.table(&table);
            }
            let auctions = builder.build()?;
            Ok(AsyncHandbagAuctions {
                inner: Arc::new(Mutex::new(auctions)),
            })
        })
        .await
        .map_err(|e| AuctionError::DataAccess(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncHandbagAuctions
// ---------------------------------------------------------------------------

/// Async wrapper around [`HandbagAuctions`].
///
/// Operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. The inner instance sits behind a
/// [`Mutex`] since DuckDB handles are not `Sync`.
#[derive(Clone)]
pub struct AsyncHandbagAuctions {
    inner: Arc<Mutex<HandbagAuctions>>,
}

impl AsyncHandbagAuctions {
    /// Create a new builder.
    pub fn builder() -> AsyncHandbagAuctionsBuilder {
        AsyncHandbagAuctionsBuilder::default()
    }

    /// Wrap an already opened instance.
    pub fn from_sync(auctions: HandbagAuctions) -> Self {
        Self {
            inner: Arc::new(Mutex::new(auctions)),
        }
    }

    /// Run a sync operation on the blocking thread pool.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use handbag_auctions::{AsyncHandbagAuctions, Dimension};
    /// # async fn example() -> handbag_auctions::Result<()> {
    /// # let auctions = AsyncHandbagAuctions::builder().build().await?;
    /// let brands = auctions.run(|a| a.distinct(Dimension::Brand)).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&HandbagAuctions) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let inner = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = inner
                .lock()
                .map_err(|_| AuctionError::DataAccess("database lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| AuctionError::DataAccess(format!("Task join error: {e}")))?
    }

    /// See [`HandbagAuctions::dashboard`].
    pub async fn dashboard(&self, filter: FilterSpec) -> Result<Dashboard> {
        self.run(move |a| a.dashboard(&filter)).await
    }

    /// See [`HandbagAuctions::summary_stats`].
    pub async fn summary_stats(&self, filter: FilterSpec) -> Result<SummaryStats> {
        self.run(move |a| a.summary_stats(&filter)).await
    }

    /// See [`HandbagAuctions::top_bags`].
    pub async fn top_bags(&self, n: usize) -> Result<Vec<TopBag>> {
        self.run(move |a| a.top_bags(n)).await
    }

    /// See [`HandbagAuctions::distinct`].
    pub async fn distinct(&self, dimension: Dimension) -> Result<Vec<String>> {
        self.run(move |a| a.distinct(dimension)).await
    }

    /// See [`HandbagAuctions::filter_options`].
    pub async fn filter_options(&self, dimension: Dimension) -> Result<Vec<String>> {
        self.run(move |a| a.filter_options(dimension)).await
    }
}
