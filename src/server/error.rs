use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use crate::engine::{ActionError, ErrorKind};
use crate::store::StoreError;

const LOG_TARGET: &str = "secret_societies::server::error";

#[derive(Debug)]
pub enum ApiError {
    Action(ActionError),
    SessionNotFound,
    Conflict(String),
    BadRequest(String),
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::Action(err) => match err.kind() {
                ErrorKind::Validation => StatusCode::BAD_REQUEST,
                ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
                ErrorKind::Forbidden => StatusCode::FORBIDDEN,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Conflict => StatusCode::CONFLICT,
                ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::SessionNotFound => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ActionError> for ApiError {
    fn from(err: ActionError) -> Self {
        ApiError::Action(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::SessionNotFound => ApiError::SessionNotFound,
            StoreError::VersionConflict => ApiError::Conflict(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::Action(err) => err.to_string(),
            ApiError::SessionNotFound => "game session not found".to_owned(),
            ApiError::Conflict(message)
            | ApiError::BadRequest(message)
            | ApiError::Internal(message) => message,
        };
        if status.is_server_error() {
            error!(target = LOG_TARGET, %message, "internal server error");
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}
