//! Password hashing.
//!
//! New hashes use the passlib `pbkdf2_sha256` modular-crypt format so rows
//! written by `pbkdf2_sha256.hash(...)` keep verifying:
//!
//! ```text
//! $pbkdf2-sha256$<rounds>$<ab64 salt>$<ab64 digest>
//! ```
//!
//! "ab64" is standard base64 without padding, with `+` written as `.`.
//! bcrypt hashes (`$2a$`, `$2b$`, `$2y$`) are verified as well.

use std::sync::LazyLock;

use base64::Engine;
use base64::engine::general_purpose::STANDARD_NO_PAD;
use rand::{Rng, rng};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::AuthError;

/// passlib's default round count for `pbkdf2_sha256`.
pub const PBKDF2_ROUNDS: u32 = 29_000;

/// bcrypt cost factor.
const BCRYPT_COST: u32 = 10;

const PBKDF2_PREFIX: &str = "$pbkdf2-sha256$";
const SALT_LEN: usize = 16;
const DIGEST_LEN: usize = 32;
const MAX_DIGEST_LEN: usize = 64;

/// Scheme used for newly created hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordScheme {
    #[default]
    Pbkdf2Sha256,
    Bcrypt,
}

/// Hashed once per process; verified against when the login email is unknown.
static DUMMY_HASH: LazyLock<String> =
    LazyLock::new(|| pbkdf2_hash("dummy-password-never-matches", PBKDF2_ROUNDS));

/// Hash a password with the given scheme.
pub fn hash_password(password: &str, scheme: PasswordScheme) -> Result<String, AuthError> {
    match scheme {
        PasswordScheme::Pbkdf2Sha256 => Ok(pbkdf2_hash(password, PBKDF2_ROUNDS)),
        PasswordScheme::Bcrypt => bcrypt::hash(password, BCRYPT_COST)
            .map_err(|e| AuthError::Internal(format!("bcrypt hash: {e}"))),
    }
}

/// Verify a password against a stored hash.
///
/// Unrecognised or malformed hashes never verify.
pub fn verify_password(password: &str, hash: &str) -> bool {
    if let Some(rest) = hash.strip_prefix(PBKDF2_PREFIX) {
        return pbkdf2_verify(password, rest);
    }
    if hash.starts_with("$2a$") || hash.starts_with("$2b$") || hash.starts_with("$2y$") {
        return bcrypt::verify(password, hash).unwrap_or(false);
    }
    false
}

/// Burn the same work as a real verify, for logins with an unknown email.
pub fn dummy_verify(password: &str) {
    let _ = verify_password(password, &DUMMY_HASH);
}

fn pbkdf2_hash(password: &str, rounds: u32) -> String {
    let mut salt = [0u8; SALT_LEN];
    rng().fill(&mut salt);
    let mut digest = [0u8; DIGEST_LEN];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, rounds, &mut digest);
    format!(
        "{PBKDF2_PREFIX}{rounds}${}${}",
        ab64_encode(&salt),
        ab64_encode(&digest)
    )
}

fn pbkdf2_verify(password: &str, encoded: &str) -> bool {
    let mut parts = encoded.split('$');
    let (Some(rounds), Some(salt), Some(digest), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    let Ok(rounds) = rounds.parse::<u32>() else {
        return false;
    };
    let (Some(salt), Some(expected)) = (ab64_decode(salt), ab64_decode(digest)) else {
        return false;
    };
    if rounds == 0 || expected.is_empty() || expected.len() > MAX_DIGEST_LEN {
        return false;
    }

    let mut derived = vec![0u8; expected.len()];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, rounds, &mut derived);
    derived.ct_eq(&expected).into()
}

fn ab64_encode(bytes: &[u8]) -> String {
    STANDARD_NO_PAD.encode(bytes).replace('+', ".")
}

fn ab64_decode(s: &str) -> Option<Vec<u8>> {
    STANDARD_NO_PAD.decode(s.replace('.', "+")).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Same encoding path as `pbkdf2_hash`, with a fixed salt.
    fn fixed_salt_hash(password: &str, rounds: u32) -> String {
        let salt = *b"0123456789abcdef";
        let mut digest = [0u8; DIGEST_LEN];
        pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, rounds, &mut digest);
        format!(
            "{PBKDF2_PREFIX}{rounds}${}${}",
            ab64_encode(&salt),
            ab64_encode(&digest)
        )
    }

    /// `pbkdf2_sha256` hash of "Secret123" with salt `0123456789abcdef`.
    const PASSLIB_SECRET123: &str =
        "$pbkdf2-sha256$29000$MDEyMzQ1Njc4OWFiY2RlZg$4IFE7ei2SLyZEoyaEhbaVf46ZZMtgHsu0glQc932FsE";

    #[test]
    fn verifies_passlib_hash() {
        assert!(verify_password("Secret123", PASSLIB_SECRET123));
        assert!(!verify_password("Secret321", PASSLIB_SECRET123));
    }

    #[test]
    fn pbkdf2_hash_has_passlib_layout() {
        let hash = hash_password("Secret123", PasswordScheme::Pbkdf2Sha256).unwrap();
        let parts: Vec<&str> = hash.split('$').collect();
        // ["", "pbkdf2-sha256", rounds, salt, digest]
        assert_eq!(parts.len(), 5);
        assert_eq!(parts[1], "pbkdf2-sha256");
        assert_eq!(parts[2], "29000");
        assert_eq!(parts[3].len(), 22);
        assert_eq!(parts[4].len(), 43);
        assert!(!hash.contains('+'));
        assert!(!hash.contains('='));
    }

    #[test]
    fn pbkdf2_verifies_correct_password_only() {
        let hash = hash_password("Secret123", PasswordScheme::Pbkdf2Sha256).unwrap();
        assert!(verify_password("Secret123", &hash));
        assert!(!verify_password("Secret124", &hash));
        assert!(!verify_password("", &hash));
    }

    #[test]
    fn salts_differ_between_hashes() {
        let a = hash_password("Secret123", PasswordScheme::Pbkdf2Sha256).unwrap();
        let b = hash_password("Secret123", PasswordScheme::Pbkdf2Sha256).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn fixed_salt_hash_verifies_with_other_round_counts() {
        let hash = fixed_salt_hash("Secret123", 1000);
        assert!(hash.starts_with("$pbkdf2-sha256$1000$MDEyMzQ1Njc4OWFiY2RlZg$"));
        assert!(verify_password("Secret123", &hash));
        assert!(!verify_password("secret123", &hash));
    }

    #[test]
    fn bcrypt_hashes_verify() {
        let hash = hash_password("Secret123", PasswordScheme::Bcrypt).unwrap();
        assert!(hash.starts_with("$2"));
        assert!(verify_password("Secret123", &hash));
        assert!(!verify_password("Secret124", &hash));
    }

    #[test]
    fn malformed_hashes_never_verify() {
        for hash in [
            "",
            "Secret123",
            "$pbkdf2-sha256$",
            "$pbkdf2-sha256$abc$salt$digest",
            "$pbkdf2-sha256$0$MDEyMzQ1Njc4OWFiY2RlZg$AAAA",
            "$pbkdf2-sha256$1000$!!!$AAAA",
            "$pbkdf2-sha256$1000$MDEyMzQ1Njc4OWFiY2RlZg$AAAA$extra",
            "$2b$10$short",
            "$argon2id$v=19$m=4096,t=3,p=1$abc$def",
        ] {
            assert!(!verify_password("Secret123", hash), "verified: {hash}");
        }
    }

    #[test]
    fn dummy_verify_does_not_panic() {
        dummy_verify("anything");
    }
}
