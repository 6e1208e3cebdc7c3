use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::error;

/// Validation messages keyed by field name, in stable field order.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

pub const MSG_REQUIRED: &str = "This field is required.";
pub const MSG_BLANK: &str = "This field may not be blank.";
pub const MSG_BAD_CREDENTIALS: &str = "Unable to log in with provided credentials.";
pub const MSG_NO_CREDENTIALS: &str = "Authentication credentials were not provided.";
pub const MSG_INVALID_TOKEN: &str = "Invalid token.";
pub const MSG_INACTIVE: &str = "User inactive or deleted.";

/// Request-level failures, rendered as JSON bodies.
///
/// Credential mismatches collapse into the single `BadCredentials` variant on
/// purpose: the response must not reveal whether the account exists, is
/// inactive, or got the password wrong.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request validation failed")]
    Validation(FieldErrors),
    #[error("unable to log in with provided credentials")]
    BadCredentials,
    #[error("method not allowed")]
    MethodNotAllowed(String),
    #[error("authentication credentials were not provided")]
    NotAuthenticated,
    #[error("invalid token")]
    InvalidToken,
    #[error("user inactive or deleted")]
    InactiveUser,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(fields) => {
                (StatusCode::BAD_REQUEST, Json(fields)).into_response()
            }
            ApiError::BadCredentials => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "non_field_errors": [MSG_BAD_CREDENTIALS] })),
            )
                .into_response(),
            ApiError::MethodNotAllowed(method) => (
                StatusCode::METHOD_NOT_ALLOWED,
                Json(json!({ "detail": format!("Method \"{method}\" not allowed.") })),
            )
                .into_response(),
            ApiError::NotAuthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "detail": MSG_NO_CREDENTIALS })),
            )
                .into_response(),
            ApiError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "detail": MSG_INVALID_TOKEN })),
            )
                .into_response(),
            ApiError::InactiveUser => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "detail": MSG_INACTIVE })),
            )
                .into_response(),
            ApiError::Internal(e) => {
                error!(error = %e, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "Internal server error." })),
                )
                    .into_response()
            }
        }
    }
}
