#[derive(Debug, thiserror::Error)]
pub enum AuctionError {
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    #[error("Data access error: {0}")]
    DataAccess(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl AuctionError {
    /// Whether this error means the record source itself failed, as opposed
    /// to a caller mistake.
    pub fn is_data_access(&self) -> bool {
        matches!(
            self,
            AuctionError::DuckDb(_) | AuctionError::DataAccess(_) | AuctionError::Io(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, AuctionError>;
