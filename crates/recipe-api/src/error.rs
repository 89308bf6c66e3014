use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use recipe_storage::RepoError;
use serde::Serialize;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound(_) => ApiError::NotFound("recipe not found".to_string()),
            RepoError::EmptyPatch => ApiError::BadRequest(e.to_string()),
            RepoError::Validation(err) => ApiError::BadRequest(err.to_string()),
            RepoError::Storage(err) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::BadRequest(format!("invalid JSON body: {e}"))
    }
}

impl From<recipe_kinds::ContentError> for ApiError {
    fn from(e: recipe_kinds::ContentError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}
