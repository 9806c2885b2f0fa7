//! Cookie service — set/clear the httpOnly refresh-token cookie.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

/// Cookie name for the refresh token.
pub const REFRESH_COOKIE: &str = "update_token";

/// Cookie lifetime set at login and signup: 7 days.
pub const LOGIN_COOKIE_MAX_AGE: Duration = Duration::days(7);

/// Cookie lifetime set by `/auth/refresh`: 60 days.
pub const REFRESH_COOKIE_MAX_AGE: Duration = Duration::days(60);

/// Build the httpOnly refresh-token cookie.
pub fn refresh_cookie(token: &str, max_age: Duration, secure: bool) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, token.to_string()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(max_age)
        .build()
}

/// Build an expired cookie to clear the refresh token.
pub fn clear_refresh_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, String::new()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::ZERO)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_cookie_is_http_only_for_seven_days() {
        let cookie = refresh_cookie("tok", LOGIN_COOKIE_MAX_AGE, false);
        assert_eq!(cookie.name(), "update_token");
        assert_eq!(cookie.value(), "tok");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(604_800)));
        assert!(cookie.to_string().contains("Max-Age=604800"));
    }

    #[test]
    fn refresh_cookie_lives_sixty_days() {
        let cookie = refresh_cookie("tok", REFRESH_COOKIE_MAX_AGE, true);
        assert_eq!(cookie.max_age(), Some(Duration::seconds(5_184_000)));
        assert_eq!(cookie.secure(), Some(true));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let cookie = clear_refresh_cookie(false);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    }
}
