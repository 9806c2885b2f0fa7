//! Authentication and authorization logic.
//!
//! Password hashing, JWT encoding, signup validation and the
//! [`TokenService`] that ties them to a credential store.

pub mod config;
pub mod jwt;
pub mod password;
pub mod service;
pub mod validation;

use thiserror::Error;

use crate::store::StoreError;

pub use config::AuthConfig;
pub use service::TokenService;

/// Authentication errors.
///
/// The boundary layer maps these to transport status codes; nothing in
/// this crate decides how a failure is presented.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password. Deliberately indistinguishable.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    TokenInvalid,

    /// Token verified but its subject no longer exists.
    #[error("User not found")]
    UserNotFound,

    #[error("Forbidden")]
    Forbidden,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Stable machine-readable code for response bodies.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "invalid_email_or_password",
            AuthError::TokenExpired => "token_expired",
            AuthError::TokenInvalid => "invalid_token",
            AuthError::UserNotFound => "user_not_found",
            AuthError::Forbidden => "forbidden",
            AuthError::Validation(_) => "validation_error",
            AuthError::Store(_) => "failed",
            AuthError::Internal(_) => "internal_error",
        }
    }
}
