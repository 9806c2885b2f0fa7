//! Authentication request handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Form, Json};
use axum_extra::extract::cookie::CookieJar;
use tracing::info;

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::CurrentUser;
use crate::models::{
    LoginForm, ParentSignupRequest, StaffSignupRequest, StatusResponse, TokenResponse,
};
use crate::services::auth;
use crate::services::cookies::{
    LOGIN_COOKIE_MAX_AGE, REFRESH_COOKIE, REFRESH_COOKIE_MAX_AGE, clear_refresh_cookie,
    refresh_cookie,
};

/// `POST /api/auth/signup/parent` — create a guardian account and log in.
pub async fn signup_parent_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<ParentSignupRequest>,
) -> AppResult<(StatusCode, CookieJar, Json<TokenResponse>)> {
    let pair = auth::signup_parent(&state.tokens, state.accounts.as_ref(), body).await?;
    let cookie = refresh_cookie(
        &pair.refresh_token,
        LOGIN_COOKIE_MAX_AGE,
        state.config.secure_cookies,
    );
    Ok((
        StatusCode::CREATED,
        jar.add(cookie),
        Json(TokenResponse::from(&pair)),
    ))
}

/// `POST /api/auth/signup/staff` — create a staff account.
pub async fn signup_staff_handler(
    State(state): State<AppState>,
    Json(body): Json<StaffSignupRequest>,
) -> AppResult<(StatusCode, Json<StatusResponse>)> {
    let resp = auth::signup_staff(&state.tokens, state.accounts.as_ref(), body).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

/// `POST /api/auth/login` — authenticate with form fields `email`, `password`.
pub async fn login_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<(CookieJar, Json<TokenResponse>)> {
    let pair = auth::login(&state.tokens, &form.email, &form.password).await?;
    let cookie = refresh_cookie(
        &pair.refresh_token,
        LOGIN_COOKIE_MAX_AGE,
        state.config.secure_cookies,
    );
    Ok((jar.add(cookie), Json(TokenResponse::from(&pair))))
}

/// `GET /api/auth/refresh` — exchange the `update_token` cookie for a new pair.
pub async fn refresh_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<TokenResponse>)> {
    let presented = jar.get(REFRESH_COOKIE).map(|c| c.value().to_string());
    let pair = auth::refresh(&state.tokens, presented.as_deref()).await?;
    let cookie = refresh_cookie(
        &pair.refresh_token,
        REFRESH_COOKIE_MAX_AGE,
        state.config.secure_cookies,
    );
    Ok((jar.add(cookie), Json(TokenResponse::from(&pair))))
}

/// `GET /api/auth/logout` — clear the refresh cookie. Requires authentication.
pub async fn logout_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    jar: CookieJar,
) -> (CookieJar, Json<StatusResponse>) {
    info!(user_id = user.0.id, "logout");
    (
        jar.add(clear_refresh_cookie(state.config.secure_cookies)),
        Json(StatusResponse::success()),
    )
}
