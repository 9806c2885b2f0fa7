//! Token service configuration.

use std::fmt;

use chrono::Duration;

use super::AuthError;
use super::password::PasswordScheme;

/// Access token lifetime: 2 hours.
pub const ACCESS_TOKEN_TTL_SECS: i64 = 2 * 60 * 60;

/// Refresh token lifetime: 60 days.
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 60;

/// Immutable settings handed to [`super::TokenService::new`].
///
/// Built once at startup; the service never reads the environment itself.
#[derive(Clone)]
pub struct AuthConfig {
    secret: Vec<u8>,
    access_ttl: Duration,
    refresh_ttl: Duration,
    password_scheme: PasswordScheme,
}

impl AuthConfig {
    /// Config with the default lifetimes and hashing scheme.
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, AuthError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(AuthError::Validation("signing secret must not be empty".into()));
        }
        Ok(Self {
            secret,
            access_ttl: Duration::seconds(ACCESS_TOKEN_TTL_SECS),
            refresh_ttl: Duration::days(REFRESH_TOKEN_TTL_DAYS),
            password_scheme: PasswordScheme::default(),
        })
    }

    pub fn with_access_ttl(mut self, ttl: Duration) -> Self {
        self.access_ttl = ttl;
        self
    }

    pub fn with_refresh_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_ttl = ttl;
        self
    }

    pub fn with_password_scheme(mut self, scheme: PasswordScheme) -> Self {
        self.password_scheme = scheme;
        self
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    pub fn password_scheme(&self) -> PasswordScheme {
        self.password_scheme
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"<redacted>")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .field("password_scheme", &self.password_scheme)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_session_lifetimes() {
        let config = AuthConfig::new("k").unwrap();
        assert_eq!(config.access_ttl().num_seconds(), 7200);
        assert_eq!(config.refresh_ttl().num_days(), 60);
        assert_eq!(config.password_scheme(), PasswordScheme::Pbkdf2Sha256);
    }

    #[test]
    fn empty_secret_is_rejected() {
        assert!(matches!(
            AuthConfig::new(Vec::new()),
            Err(AuthError::Validation(_))
        ));
    }

    #[test]
    fn debug_redacts_secret() {
        let config = AuthConfig::new("super-secret").unwrap();
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
