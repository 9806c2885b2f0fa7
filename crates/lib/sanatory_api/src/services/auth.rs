//! Authentication service — signup/login/refresh flows delegating to
//! `sanatory_core::auth`.

use sanatory_core::auth::TokenService;
use sanatory_core::auth::validation::{validate_email, validate_password};
use sanatory_core::models::auth::{NewCredential, Role, TokenPair};
use sanatory_core::store::{AccountStore, StoreError};
use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::models::{ParentSignupRequest, StaffSignupRequest, StatusResponse};

/// Any store failure during signup surfaces as a 400 `failed`.
fn signup_failed(e: StoreError) -> AppError {
    match e {
        StoreError::DuplicateEmail => AppError::Failed("Email already registered".into()),
        other => {
            warn!(error = %other, "signup rejected by store");
            AppError::Failed("Could not create account".into())
        }
    }
}

fn new_credential(
    tokens: &TokenService,
    role: Role,
    email: &str,
    password: &str,
) -> AppResult<NewCredential> {
    validate_email(email)?;
    validate_password(password)?;
    Ok(NewCredential {
        role,
        email: email.to_string(),
        password_hash: tokens.hash_password(password)?,
    })
}

/// Register a guardian account and log it straight in.
pub async fn signup_parent(
    tokens: &TokenService,
    accounts: &dyn AccountStore,
    req: ParentSignupRequest,
) -> AppResult<TokenPair> {
    let credential = new_credential(tokens, Role::User, &req.email, &req.password)?;
    let (created, _parent) = accounts
        .create_parent_account(credential, req.parent)
        .await
        .map_err(signup_failed)?;
    info!(user_id = created.id, "parent account created");

    login(tokens, &req.email, &req.password).await
}

/// Register a staff (admin) account. No session is issued.
pub async fn signup_staff(
    tokens: &TokenService,
    accounts: &dyn AccountStore,
    req: StaffSignupRequest,
) -> AppResult<StatusResponse> {
    let credential = new_credential(tokens, Role::Admin, &req.email, &req.password)?;
    let (created, _staff) = accounts
        .create_staff_account(credential, req.staff)
        .await
        .map_err(signup_failed)?;
    info!(user_id = created.id, "staff account created");
    Ok(StatusResponse::success())
}

/// Authenticate with email + password.
pub async fn login(tokens: &TokenService, email: &str, password: &str) -> AppResult<TokenPair> {
    Ok(tokens.create_session(email, password).await?)
}

/// Exchange the refresh cookie for a new token pair.
pub async fn refresh(tokens: &TokenService, refresh_token: Option<&str>) -> AppResult<TokenPair> {
    let token = refresh_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::unauthorized("Missing refresh token"))?;
    Ok(tokens.refresh(token).await?)
}
