//! Project API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tb_core::traits::Id;
use tb_models::{NewProject, ProjectPatch};

use crate::error::ApiResult;
use crate::extractors::{AppState, JsonInput};

/// GET /api/projects
pub async fn list_projects(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.api.fetch_projects().await?))
}

/// GET /api/projects/:id
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.api.fetch_project(id).await?))
}

/// GET /api/projects/:id/tasks
pub async fn list_project_tasks(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.api.fetch_tasks_by_project(id).await?))
}

/// POST /api/projects
pub async fn create_project(
    State(state): State<AppState>,
    JsonInput(input): JsonInput<NewProject>,
) -> ApiResult<impl IntoResponse> {
    let project = state.api.create_project(input).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// PATCH /api/projects/:id
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    JsonInput(patch): JsonInput<ProjectPatch>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.api.update_project(id, patch).await?))
}

/// DELETE /api/projects/:id
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    state.api.delete_project(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
