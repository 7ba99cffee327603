//! Shared state and request extractors

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tb_core::error::TbError;
use tb_services::{MockApi, TaskBoardApi};

use crate::error::ApiError;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn TaskBoardApi>,
}

impl AppState {
    pub fn new(api: Arc<dyn TaskBoardApi>) -> Self {
        Self { api }
    }

    pub fn mock(api: MockApi) -> Self {
        Self::new(Arc::new(api))
    }
}

/// JSON body decoded through the schema layer.
///
/// Syntax errors are a 400; well-formed JSON with missing or mistyped
/// fields is a 422 naming the field.
pub struct JsonInput<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonInput<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

        tb_contracts::schema::decode(value)
            .map(JsonInput)
            .map_err(|errors| ApiError::from(TbError::Validation(errors)))
    }
}
