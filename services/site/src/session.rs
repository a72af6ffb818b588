//! Session cookie handling
//!
//! The session token travels in a single HTTP-only cookie. This module
//! builds the cookie set on login, the cookie that clears it, and reads the
//! cookie back from a request.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

/// Name of the cookie holding the session token
pub const SESSION_COOKIE: &str = "token";

/// State of the session cookie on an incoming request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCookie<'a> {
    /// No session cookie was sent
    Missing,
    /// The cookie was sent with an empty value (a stale logout leftover)
    Empty,
    /// The cookie carries a token that still needs verifying
    Present(&'a str),
}

impl<'a> SessionCookie<'a> {
    /// Read the session cookie from a request's cookie jar
    pub fn read(jar: &'a CookieJar) -> Self {
        match jar.get(SESSION_COOKIE).map(|cookie| cookie.value()) {
            None => SessionCookie::Missing,
            Some("") => SessionCookie::Empty,
            Some(token) => SessionCookie::Present(token),
        }
    }

    /// The token, if a non-empty one was sent
    pub fn token(self) -> Option<&'a str> {
        match self {
            SessionCookie::Present(token) => Some(token),
            SessionCookie::Missing | SessionCookie::Empty => None,
        }
    }
}

/// Builder for session cookies with the deployment's attributes
#[derive(Debug, Clone, Copy)]
pub struct SessionCookies {
    secure: bool,
    max_age_seconds: u64,
}

impl SessionCookies {
    /// Create a cookie builder
    ///
    /// # Arguments
    /// * `secure` - whether to set the `Secure` attribute (production only)
    /// * `max_age_seconds` - cookie lifetime, matching the token lifetime
    pub fn new(secure: bool, max_age_seconds: u64) -> Self {
        Self {
            secure,
            max_age_seconds,
        }
    }

    /// Cookie carrying a freshly issued session token
    pub fn issue(&self, token: String) -> Cookie<'static> {
        let max_age = i64::try_from(self.max_age_seconds).unwrap_or(i64::MAX);

        Cookie::build((SESSION_COOKIE, token))
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .path("/")
            .max_age(time::Duration::seconds(max_age))
            .build()
    }

    /// Cookie that makes the browser drop the session cookie
    pub fn removal(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build((SESSION_COOKIE, ""))
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .path("/")
            .build();
        cookie.make_removal();
        cookie
    }
}
