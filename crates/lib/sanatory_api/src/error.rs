//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sanatory_core::auth::AuthError;
use sanatory_core::store::StoreError;
use thiserror::Error;
use tracing::{error, warn};

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// A write was refused by the store (e.g. duplicate email at signup).
    #[error("Failed: {0}")]
    Failed(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Authentication failure; the first field is the machine-readable code.
    #[error("Unauthorized: {1}")]
    Unauthorized(&'static str, String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        AppError::Unauthorized("unauthorized", message.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, "validation_error", m.as_str()),
            AppError::Failed(m) => (StatusCode::BAD_REQUEST, "failed", m.as_str()),
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, "not_found", m.as_str()),
            AppError::Unauthorized(code, m) => (StatusCode::UNAUTHORIZED, *code, m.as_str()),
            AppError::Forbidden(m) => (StatusCode::FORBIDDEN, "forbidden", m.as_str()),
            AppError::Internal(detail) => {
                error!(%detail, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error",
                )
            }
        };
        let body = Json(ErrorResponse {
            status: code.to_string(),
            message: message.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateEmail => AppError::Failed("Email already registered".into()),
            other => {
                warn!(error = %other, "store failure");
                AppError::Internal(other.to_string())
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials
            | AuthError::TokenExpired
            | AuthError::TokenInvalid
            | AuthError::UserNotFound => AppError::Unauthorized(e.code(), e.to_string()),
            AuthError::Forbidden => AppError::Forbidden("Forbidden".into()),
            AuthError::Validation(msg) => AppError::Validation(msg),
            AuthError::Store(e) => AppError::from(e),
            AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failures_map_to_401_with_their_code() {
        for (err, code) in [
            (AuthError::InvalidCredentials, "invalid_email_or_password"),
            (AuthError::TokenExpired, "token_expired"),
            (AuthError::TokenInvalid, "invalid_token"),
            (AuthError::UserNotFound, "user_not_found"),
        ] {
            let app = AppError::from(err);
            assert!(matches!(app, AppError::Unauthorized(c, _) if c == code));
            assert_eq!(app.into_response().status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn forbidden_maps_to_403() {
        let resp = AppError::from(AuthError::Forbidden).into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn duplicate_email_maps_to_400() {
        let resp = AppError::from(AuthError::Store(StoreError::DuplicateEmail)).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn internal_detail_is_hidden() {
        let resp = AppError::Internal("db password=hunter2".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "internal_error");
        assert!(!json["message"].as_str().unwrap().contains("hunter2"));
    }
}
