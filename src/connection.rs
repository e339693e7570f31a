//! Scoped DuckDB handles over the auction database.
//!
//! A [`Database`] is opened once and owns the DuckDB instance. Every request
//! borrows its own [`Connection`] via [`Database::connect`]; the handle is
//! released when it is dropped, whichever way the request exits.

use crate::error::{AuctionError, Result};
use duckdb::{types::ValueRef, AccessMode, Config, Connection as DuckDbConnection};
use log::{debug, info};
use serde::de::DeserializeOwned;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Catalog alias used when a SQLite file is attached.
const SQLITE_ALIAS: &str = "sqlite_src";

/// Where the auction table lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// A DuckDB database file.
    DuckDb(PathBuf),
    /// A SQLite database file, attached through DuckDB's `sqlite` extension.
    Sqlite(PathBuf),
    /// A fresh in-memory database (tables are registered after opening).
    InMemory,
}

impl DataSource {
    /// Human-readable location for log lines and `Display`.
    pub fn describe(&self) -> String {
        match self {
            DataSource::DuckDb(p) => format!("duckdb:{}", p.display()),
            DataSource::Sqlite(p) => format!("sqlite:{}", p.display()),
            DataSource::InMemory => "memory".to_string(),
        }
    }
}

/// Owns the DuckDB instance backing the record source.
///
/// The base handle is never used for queries directly; it only hands out
/// per-request connections that share the same database.
pub struct Database {
    base: DuckDbConnection,
    source: DataSource,
    table: String,
}

impl Database {
    /// Open the database described by `source`.
    ///
    /// File-backed DuckDB databases honour `read_only`. SQLite files are
    /// always attached read-only. `table` must be a plain SQL identifier.
    pub fn open(source: DataSource, table: &str, read_only: bool) -> Result<Self> {
        validate_identifier(table)?;

        let (base, table_ref) = match &source {
            DataSource::DuckDb(path) => {
                let conn = if read_only {
                    let config = Config::default().access_mode(AccessMode::ReadOnly)?;
                    DuckDbConnection::open_with_flags(path, config)?
                } else {
                    if let Some(parent) = path.parent() {
                        if !parent.as_os_str().is_empty() {
                            std::fs::create_dir_all(parent)?;
                        }
                    }
                    DuckDbConnection::open(path)?
                };
                (conn, table.to_string())
            }
            DataSource::Sqlite(path) => {
                let conn = DuckDbConnection::open_in_memory()?;
                attach_sqlite(&conn, path)?;
                (conn, format!("{}.{}", SQLITE_ALIAS, table))
            }
            DataSource::InMemory => (DuckDbConnection::open_in_memory()?, table.to_string()),
        };

        info!("Opened auction database {} (table {})", source.describe(), table_ref);

        Ok(Self {
            base,
            source,
            table: table_ref,
        })
    }

    /// Acquire a connection for one unit of work.
    pub fn connect(&self) -> Result<Connection> {
        let conn = self.base.try_clone().map_err(|e| {
            AuctionError::DataAccess(format!(
                "cannot acquire connection to {}: {}",
                self.source.describe(),
                e
            ))
        })?;
        debug!("Acquired connection to {}", self.source.describe());
        Ok(Connection {
            conn,
            table: self.table.clone(),
        })
    }

    /// The data source this database was opened from.
    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Fully qualified name of the auction table.
    pub fn table(&self) -> &str {
        &self.table
    }
}

/// A per-request DuckDB handle.
///
/// Dropping the connection releases it.
pub struct Connection {
    conn: DuckDbConnection,
    table: String,
}

impl Connection {
    /// Fully qualified name of the auction table this connection reads.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Execute SQL and return results as a `Vec` of `HashMap`s.
    ///
    /// Each row is represented as a `HashMap<String, serde_json::Value>`.
    pub fn execute(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        debug!("Executing SQL: {} with params {:?}", sql.replace('\n', " "), params);
        let mut stmt = self.conn.prepare(sql)?;

        let param_values: Vec<&dyn duckdb::ToSql> = params
            .iter()
            .map(|p| p as &dyn duckdb::ToSql)
            .collect();

        let mut rows_result = stmt.query(param_values.as_slice())?;

        // Column metadata is only available once the statement has run.
        let statement = rows_result
            .as_ref()
            .ok_or_else(|| AuctionError::DataAccess("statement finalized early".to_string()))?;
        let column_names: Vec<String> = statement
            .column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect();

        let mut out: Vec<HashMap<String, serde_json::Value>> = Vec::new();

        while let Some(row) = rows_result.next()? {
            let mut map = HashMap::with_capacity(column_names.len());
            for (i, col_name) in column_names.iter().enumerate() {
                let value = convert_value_ref(row.get_ref(i)?);
                map.insert(col_name.clone(), value);
            }
            out.push(map);
        }

        Ok(out)
    }

    /// Execute SQL and deserialize each row into type `T`.
    pub fn execute_into<T: DeserializeOwned>(&self, sql: &str, params: &[String]) -> Result<Vec<T>> {
        let rows = self.execute(sql, params)?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let value = serde_json::Value::Object(row.into_iter().collect());
            results.push(serde_json::from_value(value)?);
        }
        Ok(results)
    }

    /// Execute SQL and return the first column of the first row.
    ///
    /// Returns `None` if the result set is empty.
    pub fn execute_scalar(&self, sql: &str, params: &[String]) -> Result<Option<serde_json::Value>> {
        let mut stmt = self.conn.prepare(sql)?;
        let param_values: Vec<&dyn duckdb::ToSql> = params
            .iter()
            .map(|p| p as &dyn duckdb::ToSql)
            .collect();

        let mut rows = stmt.query(param_values.as_slice())?;

        if let Some(row) = rows.next()? {
            Ok(Some(convert_value_ref(row.get_ref(0)?)))
        } else {
            Ok(None)
        }
    }

    /// Column names of the auction table, read from its schema only.
    pub fn table_columns(&self) -> Result<HashSet<String>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT column_name FROM (DESCRIBE SELECT * FROM {})",
            self.table
        ))?;

        let mut rows = stmt.query([])?;
        let mut columns = HashSet::new();
        while let Some(row) = rows.next()? {
            let name: String = row.get(0)?;
            columns.insert(name);
        }
        Ok(columns)
    }

    /// Create a DuckDB table from a newline-delimited JSON file.
    ///
    /// Requires a writable database (in-memory or opened with
    /// `read_only(false)`).
    pub fn register_table_from_ndjson(&self, table_name: &str, ndjson_path: &str) -> Result<()> {
        validate_identifier(table_name)?;
        let path_fwd = escape_path(ndjson_path);
        self.conn.execute_batch(&format!(
            "DROP TABLE IF EXISTS {}; \
             CREATE TABLE {} AS SELECT * FROM read_json_auto('{}', format='newline_delimited')",
            table_name, table_name, path_fwd
        ))?;
        info!("Registered table {} from {}", table_name, path_fwd);
        Ok(())
    }

    /// Create a DuckDB table from a CSV export with a header row.
    pub fn register_table_from_csv(&self, table_name: &str, csv_path: &str) -> Result<()> {
        validate_identifier(table_name)?;
        let path_fwd = escape_path(csv_path);
        self.conn.execute_batch(&format!(
            "DROP TABLE IF EXISTS {}; \
             CREATE TABLE {} AS SELECT * FROM read_csv_auto('{}', header=true)",
            table_name, table_name, path_fwd
        ))?;
        info!("Registered table {} from {}", table_name, path_fwd);
        Ok(())
    }

    /// Access the underlying DuckDB connection for advanced usage.
    pub fn raw(&self) -> &DuckDbConnection {
        &self.conn
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        debug!("Released connection (table {})", self.table);
    }
}

fn attach_sqlite(conn: &DuckDbConnection, path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(AuctionError::DataAccess(format!(
            "SQLite database not found: {}",
            path.display()
        )));
    }
    let path_fwd = escape_path(&path.to_string_lossy());
    conn.execute_batch(&format!(
        "INSTALL sqlite; LOAD sqlite; \
         ATTACH '{}' AS {} (TYPE SQLITE, READ_ONLY)",
        path_fwd, SQLITE_ALIAS
    ))?;
    Ok(())
}

/// Forward slashes for DuckDB, single quotes doubled for the string literal.
fn escape_path(path: &str) -> String {
    path.replace('\\', "/").replace('\'', "''")
}

/// Table names are interpolated into SQL, so only plain identifiers pass.
fn validate_identifier(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(AuctionError::InvalidArgument(format!(
            "invalid table name: {:?}",
            name
        )))
    }
}

/// Convert a DuckDB `ValueRef` to a `serde_json::Value`.
fn convert_value_ref(val: ValueRef<'_>) -> serde_json::Value {
    match val {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Boolean(b) => serde_json::Value::Bool(b),
        ValueRef::TinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::SmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::Int(n) => serde_json::Value::Number(n.into()),
        ValueRef::BigInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UTinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::USmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UBigInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::HugeInt(n) => {
            // HugeInt may not fit in i64; fall back to a string
            if let Ok(i) = i64::try_from(n) {
                serde_json::Value::Number(i.into())
            } else {
                serde_json::Value::String(n.to_string())
            }
        }
        ValueRef::Float(f) => serde_json::Number::from_f64(f as f64)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Double(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Text(bytes) => serde_json::Value::String(String::from_utf8_lossy(bytes).to_string()),
        // Auction queries only project scalar types.
        _ => serde_json::Value::Null,
    }
}
