use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

use crate::auth::{AuthError, PasswordError};
use crate::services::CatalogError;
use crate::storage::StorageError;

/// JSON body of every error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error_code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            error_code: code.to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    pub fn with_details(code: &str, message: &str, details: serde_json::Value) -> Self {
        Self {
            error_code: code.to_string(),
            message: message.to_string(),
            details: Some(details),
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::TooShort(_) | PasswordError::TooLong(_) => ApiError::BadRequest(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Auth(err) => return err.into_response(),
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::with_details(
                    "VALIDATION_ERROR",
                    "Invalid request data",
                    serde_json::json!({ "errors": errors.to_string() }),
                ),
            ),
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new("VALIDATION_ERROR", &message),
            ),
            ApiError::Storage(err @ StorageError::NotFound { .. }) => (
                StatusCode::NOT_FOUND,
                ErrorBody::new("NOT_FOUND", &err.to_string()),
            ),
            ApiError::Storage(StorageError::Duplicate(_)) => (
                StatusCode::CONFLICT,
                ErrorBody::new("CONFLICT", "Membership number already taken; resubmit to draw another"),
            ),
            ApiError::Storage(err) => {
                error!(error = %err, "storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new("INTERNAL_ERROR", "Internal server error"),
                )
            }
            ApiError::Catalog(err) => {
                error!(error = %err, "exercise catalog failure");
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorBody::new("UPSTREAM_ERROR", "Exercise catalog unavailable"),
                )
            }
            ApiError::Internal(message) => {
                error!(error = %message, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new("INTERNAL_ERROR", "Internal server error"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
