//! API error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fitlog_core::FitlogError;
use serde_json::json;

/// Error rendered at the request boundary as `{"error": message}`
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

impl From<FitlogError> for ApiError {
    fn from(e: FitlogError) -> Self {
        match e {
            FitlogError::Validation(message) => Self::bad_request(message),
            FitlogError::UserNotFound(_) => Self::not_found("User not found"),
            other => {
                tracing::error!("Request failed: {}", other);
                Self::internal("Internal server error")
            }
        }
    }
}
