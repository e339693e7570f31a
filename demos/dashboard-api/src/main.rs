mod error;
mod routes;
mod state;

use std::env;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use handbag_auctions::{config, AsyncHandbagAuctions};
use tower_http::cors::CorsLayer;

use state::AppState;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5001";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let auctions = open_auctions().await?;
    log::info!("Serving {}", auctions.run(|a| Ok(a.to_string())).await?);

    let state = Arc::new(AppState { auctions });

    let app = Router::new()
        .route("/", get(routes::meta::index))
        .route("/api/dashboard", get(routes::dashboard::get_dashboard))
        .route("/api/stats", get(routes::dashboard::get_stats))
        .route("/api/top-bags", get(routes::dashboard::get_top_bags))
        .route("/api/brands", get(routes::filters::list_brands))
        .route("/api/filters/{dimension}", get(routes::filters::list_filter_options))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    log::info!("Listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Open the database named by `HANDBAG_DB_PATH` / `HANDBAG_DB_KIND` /
/// `HANDBAG_TABLE`, falling back to the library defaults.
async fn open_auctions() -> handbag_auctions::Result<AsyncHandbagAuctions> {
    let mut builder = AsyncHandbagAuctions::builder();

    let path = env::var("HANDBAG_DB_PATH").ok();
    let kind = env::var("HANDBAG_DB_KIND").unwrap_or_else(|_| "duckdb".to_string());
    builder = match (kind.to_ascii_lowercase().as_str(), path) {
        ("sqlite", Some(path)) => builder.sqlite(path),
        ("sqlite", None) => builder.sqlite(config::DEFAULT_SQLITE_FILE),
        (_, Some(path)) => builder.database_path(path),
        (_, None) => builder,
    };
    if let Ok(table) = env::var("HANDBAG_TABLE") {
        builder = builder.table(&table);
    }
    builder.build().await
}
