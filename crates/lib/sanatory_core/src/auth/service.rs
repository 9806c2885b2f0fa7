//! Token service — the single authority for turning credentials into a
//! signed session and a presented token back into an identity.
//!
//! Sessions are stateless: an access token is valid as long as its
//! signature checks out and it has not expired. Refresh tokens are not
//! tracked server-side, so a still-valid refresh token can be exchanged
//! any number of times until it expires.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::AuthError;
use super::config::AuthConfig;
use super::jwt::{decode_token, encode_token, subject_id};
use super::password::{dummy_verify, hash_password, verify_password};
use crate::models::auth::{Credential, Role, TokenClaims, TokenKind, TokenPair};
use crate::store::CredentialStore;

/// Issues, verifies and rotates access/refresh tokens.
#[derive(Clone)]
pub struct TokenService {
    config: AuthConfig,
    store: Arc<dyn CredentialStore>,
}

impl TokenService {
    pub fn new(config: AuthConfig, store: Arc<dyn CredentialStore>) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Hash a new password with the configured scheme.
    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        hash_password(password, self.config.password_scheme())
    }

    /// Log in with email + password.
    ///
    /// Unknown email and wrong password both yield `InvalidCredentials`.
    pub async fn create_session(&self, email: &str, password: &str) -> Result<TokenPair, AuthError> {
        let Some(credential) = self.store.find_by_email(email).await? else {
            dummy_verify(password);
            debug!("login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password, &credential.password_hash) {
            debug!(user_id = credential.id, "login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let pair = self.issue_pair_at(&credential, Utc::now())?;
        info!(user_id = credential.id, role = %credential.role, "session created");
        Ok(pair)
    }

    /// Access token: `{sub, role, exp = now + access_ttl}`.
    pub fn issue_access_token(&self, credential: &Credential) -> Result<String, AuthError> {
        self.issue_access_token_at(credential, Utc::now())
    }

    pub fn issue_access_token_at(
        &self,
        credential: &Credential,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let claims = TokenClaims {
            sub: credential.id.to_string(),
            typ: TokenKind::Access,
            role: Some(credential.role),
            exp: (now + self.config.access_ttl()).timestamp(),
            iat: now.timestamp(),
        };
        encode_token(&claims, self.config.secret())
    }

    /// Refresh token: `{sub, exp = now + refresh_ttl}`, no role.
    pub fn issue_refresh_token(&self, credential: &Credential) -> Result<String, AuthError> {
        self.issue_refresh_token_at(credential, Utc::now())
    }

    pub fn issue_refresh_token_at(
        &self,
        credential: &Credential,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let claims = TokenClaims {
            sub: credential.id.to_string(),
            typ: TokenKind::Refresh,
            role: None,
            exp: (now + self.config.refresh_ttl()).timestamp(),
            iat: now.timestamp(),
        };
        encode_token(&claims, self.config.secret())
    }

    fn issue_pair_at(
        &self,
        credential: &Credential,
        now: DateTime<Utc>,
    ) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            access_token: self.issue_access_token_at(credential, now)?,
            refresh_token: self.issue_refresh_token_at(credential, now)?,
            expires_in: self.config.access_ttl().num_seconds(),
        })
    }

    /// Resolve an access token to the caller's *current* credential.
    ///
    /// The role carried in the token is ignored; callers authorize against
    /// the record returned here.
    pub async fn authenticate(&self, access_token: &str) -> Result<Credential, AuthError> {
        self.authenticate_at(access_token, Utc::now()).await
    }

    pub async fn authenticate_at(
        &self,
        access_token: &str,
        now: DateTime<Utc>,
    ) -> Result<Credential, AuthError> {
        self.resolve(access_token, TokenKind::Access, now).await
    }

    /// Exchange a refresh token for a brand-new pair.
    ///
    /// The presented token stays valid; there is no denylist.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        self.refresh_at(refresh_token, Utc::now()).await
    }

    pub async fn refresh_at(
        &self,
        refresh_token: &str,
        now: DateTime<Utc>,
    ) -> Result<TokenPair, AuthError> {
        let credential = self.resolve(refresh_token, TokenKind::Refresh, now).await?;
        let pair = self.issue_pair_at(&credential, now)?;
        info!(user_id = credential.id, "session refreshed");
        Ok(pair)
    }

    /// Role gate. The credential must come from [`Self::authenticate`].
    pub fn authorize(credential: &Credential, required: Role) -> Result<(), AuthError> {
        if credential.role == required {
            Ok(())
        } else {
            debug!(user_id = credential.id, role = %credential.role, required = %required, "forbidden");
            Err(AuthError::Forbidden)
        }
    }

    async fn resolve(
        &self,
        token: &str,
        kind: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<Credential, AuthError> {
        let claims = decode_token(token, kind, self.config.secret(), now.timestamp())?;
        let id = subject_id(&claims)?;
        self.store.find_by_id(id).await?.ok_or_else(|| {
            debug!(user_id = id, "token subject no longer exists");
            AuthError::UserNotFound
        })
    }
}
