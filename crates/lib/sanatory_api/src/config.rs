//! API server configuration.

use sanatory_core::auth::{AuthConfig, AuthError};
use thiserror::Error;

/// Default bind address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

/// Default PostgreSQL connection URL.
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/sanatory";

/// Default allowed browser origins.
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:3001";

/// Configuration errors raised at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no signing secret: set SECRET_KEY or JWT_SECRET")]
    MissingSecret,

    #[error("invalid auth config: {0}")]
    Auth(#[from] AuthError),
}

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:8000").
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// JWT signing secret.
    pub jwt_secret: String,
    /// Origins allowed to make credentialed cross-origin requests.
    pub cors_origins: Vec<String>,
    /// Mark the refresh cookie `Secure`.
    pub secure_cookies: bool,
}

impl ApiConfig {
    /// Reads configuration from environment variables.
    ///
    /// | Variable                   | Default                                         |
    /// |----------------------------|-------------------------------------------------|
    /// | `BIND_ADDR`                | `127.0.0.1:8000`                                |
    /// | `DATABASE_URL`             | `postgres://localhost:5432/sanatory`            |
    /// | `SECRET_KEY` / `JWT_SECRET`| required                                        |
    /// | `CORS_ORIGINS`             | `http://localhost:3000,http://localhost:3001`   |
    /// | `SECURE_COOKIES`           | `false` (`1`, `true`, `yes` enable it)          |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Same as [`Self::from_env`], reading variables through `var`.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let jwt_secret = ["SECRET_KEY", "JWT_SECRET"]
            .into_iter()
            .filter_map(&var)
            .find(|secret| !secret.is_empty())
            .ok_or(ConfigError::MissingSecret)?;
        Ok(Self {
            bind_addr: var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            database_url: var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            jwt_secret,
            cors_origins: parse_origins(
                &var("CORS_ORIGINS").unwrap_or_else(|| DEFAULT_CORS_ORIGINS.into()),
            ),
            secure_cookies: var("SECURE_COOKIES").is_some_and(|v| parse_flag(&v)),
        })
    }

    /// Build the token service configuration from the signing secret.
    pub fn auth_config(&self) -> Result<AuthConfig, ConfigError> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        Ok(AuthConfig::new(self.jwt_secret.as_bytes())?)
    }
}

/// `1`, `true` and `yes` (any case) switch a flag on.
pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

/// Split a comma-separated origin list, dropping blanks.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> ApiConfig {
        ApiConfig {
            bind_addr: DEFAULT_BIND_ADDR.into(),
            database_url: String::new(),
            jwt_secret: secret.into(),
            cors_origins: parse_origins(DEFAULT_CORS_ORIGINS),
            secure_cookies: false,
        }
    }

    #[test]
    fn parses_origin_list() {
        assert_eq!(
            parse_origins(" http://a:1 ,,http://b:2 "),
            vec!["http://a:1".to_string(), "http://b:2".to_string()]
        );
        assert!(parse_origins("").is_empty());
    }

    fn vars<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let config = ApiConfig::from_vars(vars(&[("SECRET_KEY", "s3cret")])).unwrap();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.jwt_secret, "s3cret");
        assert_eq!(config.cors_origins, parse_origins(DEFAULT_CORS_ORIGINS));
        assert!(!config.secure_cookies);
    }

    #[test]
    fn jwt_secret_is_the_fallback_name() {
        let config = ApiConfig::from_vars(vars(&[("SECRET_KEY", ""), ("JWT_SECRET", "fallback")]))
            .unwrap();
        assert_eq!(config.jwt_secret, "fallback");
        assert!(matches!(
            ApiConfig::from_vars(vars(&[])),
            Err(ConfigError::MissingSecret)
        ));
    }

    #[test]
    fn secure_cookies_accepts_documented_values() {
        for raw in ["1", "true", "yes", "TRUE", "Yes"] {
            let config =
                ApiConfig::from_vars(vars(&[("SECRET_KEY", "s"), ("SECURE_COOKIES", raw)]))
                    .unwrap();
            assert!(config.secure_cookies, "{raw}");
        }
        for raw in ["0", "false", "no", ""] {
            assert!(!parse_flag(raw), "{raw}");
        }
    }

    #[test]
    fn empty_secret_is_a_config_error() {
        assert!(matches!(
            config("").auth_config(),
            Err(ConfigError::MissingSecret)
        ));
        assert!(config("s3cret").auth_config().is_ok());
    }
}
