use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::api::error::ErrorBody;
use crate::auth::password::PasswordError;
use crate::storage::StorageError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token signing failed: {0}")]
    Signing(String),
    #[error("token signature or algorithm is invalid")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
    #[error("token is malformed")]
    Malformed,
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing x-jwt-token header")]
    MissingToken,
    #[error("Invalid token: {0}")]
    InvalidToken(#[from] TokenError),
    #[error("Invalid member id in path")]
    InvalidMemberId,
    #[error("Member {0} not found")]
    MemberNotFound(i32),
    #[error("Token subject {claimed} does not match membership number {actual}")]
    IdentityMismatch { claimed: i64, actual: i64 },
    #[error("Member lookup failed: {0}")]
    MemberLookup(#[source] StorageError),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Token issuance failed: {0}")]
    Issue(#[source] TokenError),
    #[error("Password processing error: {0}")]
    Password(#[from] PasswordError),
    #[error("Storage error: {0}")]
    Storage(#[source] StorageError),
    #[error("Password task failed: {0}")]
    Task(String),
}

impl AuthError {
    /// Whether this error is a rejection by the member guard, which must not
    /// tell the caller why it was rejected
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            AuthError::MissingToken
                | AuthError::InvalidToken(_)
                | AuthError::InvalidMemberId
                | AuthError::MemberNotFound(_)
                | AuthError::IdentityMismatch { .. }
                | AuthError::MemberLookup(_)
        )
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            err if err.is_rejection() => (
                StatusCode::FORBIDDEN,
                ErrorBody::new("FORBIDDEN", "invalid token"),
            ),
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorBody::new("INVALID_CREDENTIALS", "Invalid credentials"),
            ),
            _ => {
                error!(error = %self, "authentication failed internally");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new("INTERNAL_ERROR", "Internal server error"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
