//! Task API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tb_core::traits::Id;
use tb_models::{NewTask, TaskPatch, TaskPriority, TaskStatus};
use tb_queries::{AssigneeFilter, TaskFilter};

use crate::error::ApiResult;
use crate::extractors::{AppState, JsonInput};

/// Query parameters for the task list
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TaskListParams {
    pub team_id: Option<Id>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub assignee: AssigneeFilter,
    pub min_hours: Option<f64>,
    pub max_hours: Option<f64>,
}

impl TaskListParams {
    fn filter(&self) -> TaskFilter {
        TaskFilter {
            status: self.status,
            priority: self.priority,
            assignee: self.assignee,
            min_hours: self.min_hours,
            max_hours: self.max_hours,
        }
    }
}

/// GET /api/tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(params): Query<TaskListParams>,
) -> ApiResult<impl IntoResponse> {
    let tasks = state.api.fetch_tasks(params.team_id).await?;
    Ok(Json(params.filter().apply(&tasks)))
}

/// GET /api/tasks/:id
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.api.fetch_task(id).await?))
}

/// POST /api/tasks
pub async fn create_task(
    State(state): State<AppState>,
    JsonInput(input): JsonInput<NewTask>,
) -> ApiResult<impl IntoResponse> {
    let task = state.api.create_task(input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// PATCH /api/tasks/:id
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    JsonInput(patch): JsonInput<TaskPatch>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.api.update_task(id, patch).await?))
}

/// DELETE /api/tasks/:id
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    state.api.delete_task(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
