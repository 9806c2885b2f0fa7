//! Authentication middleware — Bearer token extraction, token validation
//! and the admin role gate.

use axum::http::header::AUTHORIZATION;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use sanatory_core::auth::TokenService;
use sanatory_core::models::auth::{Credential, Role};

use crate::AppState;
use crate::error::AppError;

/// The caller's credential as freshly loaded from the store.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Credential);

/// Pull the token out of `Authorization: Bearer <token>`.
pub fn bearer_token(request: &Request) -> Result<&str, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

    let token = header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::unauthorized("Invalid authorization scheme"))?;
    Ok(token)
}

/// Axum middleware: verifies the bearer access token, resolves its
/// subject, and injects [`CurrentUser`] into request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&request)?.to_string();
    let credential = state.tokens.authenticate(&token).await?;
    request.extensions_mut().insert(CurrentUser(credential));
    Ok(next.run(request).await)
}

/// Axum middleware: admits only ADMIN callers. Must run after [`require_auth`].
pub async fn require_admin(request: Request, next: Next) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(|| AppError::unauthorized("Not authenticated"))?;
    TokenService::authorize(&user.0, Role::Admin)?;
    Ok(next.run(request).await)
}
