//! User API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tb_core::traits::Id;
use tb_models::{NewUser, UserPatch};
use tb_queries::UserFilter;

use crate::error::ApiResult;
use crate::extractors::{AppState, JsonInput};

/// GET /api/users
///
/// Accepts `search` (name or email substring) and `team_id`.
pub async fn list_users(
    State(state): State<AppState>,
    Query(filter): Query<UserFilter>,
) -> ApiResult<impl IntoResponse> {
    let users = state.api.fetch_users().await?;
    Ok(Json(filter.apply(&users)))
}

/// GET /api/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.api.fetch_user(id).await?))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    JsonInput(input): JsonInput<NewUser>,
) -> ApiResult<impl IntoResponse> {
    let user = state.api.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// PATCH /api/users/:id
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    JsonInput(patch): JsonInput<UserPatch>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.api.update_user(id, patch).await?))
}

/// DELETE /api/users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    state.api.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
