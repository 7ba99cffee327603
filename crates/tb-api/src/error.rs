//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tb_core::error::TbError;
use tracing::warn;

const URN_PREFIX: &str = "urn:taskboard:api:errors:";

#[derive(Debug)]
pub enum ApiError {
    Domain(TbError),
    BadRequest(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(err) => {
                StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn identifier(&self) -> &'static str {
        match self {
            ApiError::Domain(TbError::NotFound { .. }) => "NotFound",
            ApiError::Domain(TbError::Validation(_)) => "PropertyConstraintViolation",
            ApiError::Domain(TbError::Rule(_)) => "RuleViolation",
            ApiError::Domain(TbError::Internal(_)) => "InternalError",
            ApiError::BadRequest(_) => "InvalidRequestBody",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Domain(err) => err.error_code(),
            ApiError::BadRequest(_) => "bad_request",
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Domain(TbError::Validation(errors)) => errors.full_messages().join(", "),
            ApiError::Domain(err) => err.to_string(),
            ApiError::BadRequest(msg) => msg.clone(),
        }
    }
}

impl From<TbError> for ApiError {
    fn from(err: TbError) -> Self {
        ApiError::Domain(err)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    #[serde(rename = "_type")]
    type_name: &'static str,
    #[serde(rename = "errorIdentifier")]
    error_identifier: String,
    code: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            warn!(error = ?self, "Request failed");
        }
        let body = ErrorBody {
            type_name: "Error",
            error_identifier: format!("{}{}", URN_PREFIX, self.identifier()),
            code: self.code(),
            message: self.message(),
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
