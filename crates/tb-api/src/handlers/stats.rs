//! Statistics handlers

use axum::{extract::State, response::IntoResponse, Json};

use crate::error::ApiResult;
use crate::extractors::AppState;

/// GET /api/stats
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.api.fetch_stats().await?))
}

/// GET /api/stats/summary
pub async fn get_stats_summary(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.api.fetch_stats_summary().await?))
}
