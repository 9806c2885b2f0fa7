//! JWT token encoding and verification (HS256).

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;

use super::AuthError;
use crate::models::auth::{TokenClaims, TokenKind};

/// Sign claims with the process-wide secret.
pub fn encode_token(claims: &TokenClaims, secret: &[u8]) -> Result<String, AuthError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AuthError::Internal(format!("jwt encode: {e}")))
}

/// Verify a token of the expected kind at time `now` (unix seconds).
///
/// Signature and shape are checked before expiry, so a forged token
/// reports `TokenInvalid` even when its `exp` is in the past. A token is
/// expired once `now >= exp`; there is no leeway.
pub fn decode_token(
    token: &str,
    expected: TokenKind,
    secret: &[u8],
    now: i64,
) -> Result<TokenClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let claims = decode::<TokenClaims>(token, &DecodingKey::from_secret(secret), &validation)
        .map_err(|e| {
            debug!(error = %e, "jwt rejected");
            AuthError::TokenInvalid
        })?
        .claims;

    if claims.typ != expected {
        debug!(expected = ?expected, got = ?claims.typ, "jwt kind mismatch");
        return Err(AuthError::TokenInvalid);
    }
    if expected == TokenKind::Access && claims.role.is_none() {
        return Err(AuthError::TokenInvalid);
    }
    if now >= claims.exp {
        return Err(AuthError::TokenExpired);
    }
    Ok(claims)
}

/// Parse the `sub` claim back into a credential id.
pub fn subject_id(claims: &TokenClaims) -> Result<i64, AuthError> {
    claims.sub.parse::<i64>().map_err(|_| AuthError::TokenInvalid)
}
