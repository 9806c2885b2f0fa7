//! Authentication domain models.
//!
//! These are internal domain models, distinct from the API request and
//! response shapes in `sanatory_api::models`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse authorization tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Staff / clinical operator.
    Admin,
    /// Parent or guardian.
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored role string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// A login identity as held by the credential store.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub id: i64,
    pub role: Role,
    pub email: String,
    /// Salted one-way hash; only ever checked through `auth::password::verify_password`.
    pub password_hash: String,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("id", &self.id)
            .field("role", &self.role)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// A credential that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewCredential {
    pub role: Role,
    pub email: String,
    pub password_hash: String,
}

/// Which of the two session tokens a JWT is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims shared by access and refresh tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: credential id (standard JWT `sub` claim, stringified).
    pub sub: String,
    /// Token kind, so a refresh token cannot stand in for an access token.
    pub typ: TokenKind,
    /// Role at issuance. Present on access tokens only; informational.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Expiry (unix timestamp).
    pub exp: i64,
    /// Issued at (unix timestamp).
    pub iat: i64,
}

/// A freshly minted access/refresh pair.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("ADMIN".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("user".parse::<Role>(), Ok(Role::User));
        let err = "doctor".parse::<Role>().unwrap_err();
        assert_eq!(err, UnknownRole("doctor".into()));
        assert_eq!(err.to_string(), "unknown role 'doctor'");
    }

    #[test]
    fn credential_debug_hides_hash() {
        let cred = Credential {
            id: 1,
            role: Role::User,
            email: "a@b.cd".into(),
            password_hash: "$pbkdf2-sha256$29000$abc$def".into(),
        };
        let out = format!("{cred:?}");
        assert!(!out.contains("pbkdf2"));
        assert!(out.contains("<redacted>"));
    }

    #[test]
    fn refresh_claims_omit_role() {
        let claims = TokenClaims {
            sub: "7".into(),
            typ: TokenKind::Refresh,
            role: None,
            exp: 10,
            iat: 0,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert!(json.get("role").is_none());
        assert_eq!(json["typ"], "refresh");
    }
}
