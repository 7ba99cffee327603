//! Task link API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tb_core::traits::Id;

use crate::error::ApiResult;
use crate::extractors::{AppState, JsonInput};

#[derive(Debug, Deserialize)]
pub struct CreateTaskLinkRequest {
    pub linked_task_id: Id,
}

/// GET /api/tasks/:id/links
///
/// Links touching the task, oriented so the task is the source.
pub async fn list_task_links(
    State(state): State<AppState>,
    Path(task_id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.api.fetch_task_links(task_id).await?))
}

/// GET /api/tasks/:id/linked
pub async fn list_linked_tasks(
    State(state): State<AppState>,
    Path(task_id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.api.fetch_linked_tasks(task_id).await?))
}

/// POST /api/tasks/:id/links
pub async fn create_task_link(
    State(state): State<AppState>,
    Path(task_id): Path<Id>,
    JsonInput(body): JsonInput<CreateTaskLinkRequest>,
) -> ApiResult<impl IntoResponse> {
    let link = state.api.create_task_link(task_id, body.linked_task_id).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

/// DELETE /api/task_links/:id
pub async fn delete_task_link(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    state.api.delete_task_link(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
