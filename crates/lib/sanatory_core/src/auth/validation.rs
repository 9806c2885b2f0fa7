//! Signup input checks.

use std::sync::LazyLock;

use regex::Regex;

use super::AuthError;

/// `local@domain.tld`: local and domain are word characters, `.` and `-`;
/// the top-level label is word characters only.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.-]+@[\w.-]+\.\w+$").expect("valid email regex"));

/// Eight or more ASCII letters and digits.
static PASSWORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{8,}$").expect("valid password regex"));

pub fn validate_email(email: &str) -> Result<(), AuthError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(AuthError::Validation("Invalid email address".into()))
    }
}

/// At least eight ASCII letters or digits, with at least one of each.
pub fn validate_password(password: &str) -> Result<(), AuthError> {
    // No lookahead in `regex`; the "one of each" part is checked by hand.
    let ok = PASSWORD_RE.is_match(password)
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit());
    if ok {
        Ok(())
    } else {
        Err(AuthError::Validation(
            "Password must be at least 8 letters and digits, with at least one of each".into(),
        ))
    }
}
