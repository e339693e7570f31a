use std::path::PathBuf;

/// Table holding one row per sold lot.
pub const DEFAULT_TABLE: &str = "auction_data";

/// File name of the default DuckDB database.
pub const DEFAULT_DB_FILE: &str = "handbag_auctions.duckdb";

/// File name the auction export uses when shipped as SQLite.
pub const DEFAULT_SQLITE_FILE: &str = "handbag_auctions.db";

// Source column names, as they appear in the auction export.
pub const COL_BRAND: &str = "Brand";
pub const COL_DESCRIPTION: &str = "Description";
pub const COL_COLOR: &str = "Color";
pub const COL_LEATHER: &str = "Leather";
pub const COL_YEAR: &str = "Year";
pub const COL_REALIZED_PRICE: &str = "Realized Price (USD)";
pub const COL_LOWER_ESTIMATE: &str = "Lower Estimate (USD)";
pub const COL_HIGHER_ESTIMATE: &str = "Higher Estimate (USD)";

/// Columns the record source cannot do without.
pub const REQUIRED_COLUMNS: [&str; 2] = [COL_BRAND, COL_REALIZED_PRICE];

/// Filter names that mean "no filter".
pub const NO_FILTER_SENTINELS: [&str; 2] = ["All", "General Stats"];

/// Label of the row emitted when a grouping dimension is absent from every record.
pub const NO_DATA_LABEL: &str = "No Data";

/// Leather charts only show this many materials.
pub const LEATHER_CHART_LIMIT: usize = 10;

/// Default size of the top-bags listing.
pub const DEFAULT_TOP_N: usize = 10;

pub fn default_db_path() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("handbag-auctions").join(DEFAULT_DB_FILE)
    } else {
        PathBuf::from(DEFAULT_DB_FILE)
    }
}
