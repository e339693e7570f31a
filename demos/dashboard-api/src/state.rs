/// Shared application state available to all route handlers via Axum's
/// `State` extractor.
pub struct AppState {
    /// Async handle to the auction database. Each call acquires and releases
    /// its own connection on the blocking thread pool.
    pub auctions: handbag_auctions::AsyncHandbagAuctions,
}
