use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Json;
use handbag_auctions::{config, DashboardResponse, FilterSpec};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct FilterParams {
    pub dimension: Option<String>,
    pub value: Option<String>,
}

impl FilterParams {
    fn filter(&self) -> FilterSpec {
        FilterSpec::resolve(self.dimension.as_deref(), self.value.as_deref())
    }
}

#[derive(Deserialize)]
pub struct TopBagsParams {
    pub limit: Option<usize>,
}

/// GET /api/dashboard?dimension=Brand&value=Hermès
///
/// Stats, the four chart payloads and the top lots for one filter. An
/// unknown dimension or an "All ..." value serves the unfiltered dashboard.
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> Result<Json<DashboardResponse>, AppError> {
    let filter = params.filter();
    log::debug!("dashboard for {filter}");
    let dashboard = state.auctions.dashboard(filter).await?;
    Ok(Json(DashboardResponse::from(dashboard)))
}

/// GET /api/stats?dimension=Color&value=Noir
///
/// Summary statistics computed in SQL.
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Value>, AppError> {
    let filter = params.filter();
    let label = filter.to_string();
    let stats = state.auctions.summary_stats(filter).await?;
    Ok(Json(json!({ "filter": label, "data": stats })))
}

/// GET /api/top-bags?limit=5
pub async fn get_top_bags(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TopBagsParams>,
) -> Result<Json<Value>, AppError> {
    let limit = params.limit.unwrap_or(config::DEFAULT_TOP_N);
    if limit == 0 {
        return Err(AppError::bad_request("limit must be at least 1"));
    }
    let bags = state.auctions.top_bags(limit).await?;
    let count = bags.len();
    Ok(Json(json!({ "data": bags, "count": count })))
}
