use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Json;
use handbag_auctions::Dimension;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/filters/:dimension
///
/// Dropdown entries for one dimension: the "All ..." sentinel followed by
/// every distinct value.
pub async fn list_filter_options(
    State(state): State<Arc<AppState>>,
    Path(dimension): Path<String>,
) -> Result<Json<Value>, AppError> {
    let dimension: Dimension = dimension
        .parse()
        .map_err(|_| AppError::not_found(format!("Unknown filter dimension: {dimension}")))?;
    let options = state.auctions.filter_options(dimension).await?;
    Ok(Json(json!({ "dimension": dimension, "data": options })))
}

/// GET /api/brands
pub async fn list_brands(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let brands = state.auctions.distinct(Dimension::Brand).await?;
    let count = brands.len();
    Ok(Json(json!({ "data": brands, "count": count })))
}
