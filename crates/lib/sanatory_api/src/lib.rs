//! # sanatory_api
//!
//! HTTP API library for Sanatory.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use sanatory_core::auth::{AuthConfig, TokenService};
use sanatory_core::store::AccountStore;
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::config::ApiConfig;
use crate::handlers::{auth, users};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Token issuance and verification.
    pub tokens: Arc<TokenService>,
    /// Credential and profile persistence.
    pub accounts: Arc<dyn AccountStore>,
    /// API configuration.
    pub config: ApiConfig,
}

impl AppState {
    /// Wire a token service and the account store over the same backend.
    pub fn new<S>(config: ApiConfig, auth: AuthConfig, store: Arc<S>) -> Self
    where
        S: AccountStore + 'static,
    {
        let tokens = TokenService::new(auth, store.clone());
        Self {
            tokens: Arc::new(tokens),
            accounts: store,
            config,
        }
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    // Public routes (no auth required)
    let public = Router::new()
        .route(routes::POST_AUTH_SIGNUP_PARENT, post(auth::signup_parent_handler))
        .route(routes::POST_AUTH_SIGNUP_STAFF, post(auth::signup_staff_handler))
        .route(routes::POST_AUTH_LOGIN, post(auth::login_handler))
        .route(routes::GET_AUTH_REFRESH, get(auth::refresh_handler));

    // Admin-only routes
    let admin = Router::new()
        .route(routes::GET_USERS_STAFFS, get(users::list_staff_handler))
        .layer(axum::middleware::from_fn(middleware::auth::require_admin));

    // Protected routes (require auth)
    let protected = Router::new()
        .route(routes::GET_AUTH_LOGOUT, get(auth::logout_handler))
        .route(routes::GET_USERS_ME, get(users::me_handler))
        .merge(admin)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(cors)
        .with_state(state)
}
