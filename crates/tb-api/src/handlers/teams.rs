//! Team API handlers

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use tb_queries::{Board, TaskFilter};

use crate::error::ApiResult;
use crate::extractors::AppState;

/// GET /api/teams
pub async fn list_teams(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.api.fetch_teams().await?))
}

/// GET /api/teams/:slug
pub async fn get_team(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.api.fetch_team_by_slug(slug).await?))
}

/// GET /api/teams/:slug/board
///
/// The team's tasks grouped by status. Query parameters narrow the tasks
/// shown; `status` is ignored since every column is returned.
pub async fn get_team_board(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(filter): Query<TaskFilter>,
) -> ApiResult<impl IntoResponse> {
    let team = state.api.fetch_team_by_slug(slug).await?;
    let tasks = state.api.fetch_tasks(Some(team.id)).await?;
    Ok(Json(Board::from_tasks(&tasks, &filter)))
}
