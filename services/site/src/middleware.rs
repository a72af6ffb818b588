//! Route guard for pages and session extraction for the JSON API

use axum::{
    async_trait,
    body::Body,
    extract::{FromRequestParts, State},
    http::{Request, request::Parts},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::info;

use crate::{AppState, error::ApiError, session::SessionCookie};

/// Page that collects credentials
pub const LOGIN_PATH: &str = "/login";

/// Root of the pages that require a session
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Whether the request carries a usable session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// No cookie, or a cookie with an empty value
    Absent,
    /// A token that failed verification
    Invalid,
    /// A token that verified
    Valid,
}

/// What the guard does with a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    PassThrough,
    RedirectToLogin,
    RedirectToDashboard,
}

/// Whether a path requires a session
pub fn is_protected(path: &str) -> bool {
    path == DASHBOARD_PATH
        || path
            .strip_prefix(DASHBOARD_PATH)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Decide what to do with a request to `path`
pub fn evaluate(path: &str, session: SessionStatus) -> GuardDecision {
    if is_protected(path) && session != SessionStatus::Valid {
        return GuardDecision::RedirectToLogin;
    }

    if path == LOGIN_PATH && session == SessionStatus::Valid {
        return GuardDecision::RedirectToDashboard;
    }

    GuardDecision::PassThrough
}

/// Redirect page requests based on the session cookie
///
/// Layered onto `/login` and `/dashboard/*` only. An empty session cookie
/// counts as no session and is cleared on the way out.
pub async fn route_guard(
    State(state): State<AppState>,
    jar: CookieJar,
    req: Request<Body>,
    next: Next,
) -> Response {
    let cookie = SessionCookie::read(&jar);
    let stale_cookie = cookie == SessionCookie::Empty;
    let session = match cookie.token() {
        None => SessionStatus::Absent,
        Some(token) if state.jwt_service.verify_token(token).is_some() => SessionStatus::Valid,
        Some(_) => SessionStatus::Invalid,
    };

    let decision = evaluate(req.uri().path(), session);
    let response = match decision {
        GuardDecision::PassThrough => next.run(req).await,
        GuardDecision::RedirectToLogin => {
            info!("No valid session for {}, redirecting to login", req.uri().path());
            Redirect::temporary(LOGIN_PATH).into_response()
        }
        GuardDecision::RedirectToDashboard => Redirect::temporary(DASHBOARD_PATH).into_response(),
    };

    if stale_cookie {
        (jar.add(state.session_cookies.removal()), response).into_response()
    } else {
        response
    }
}

/// Authenticated user information
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: u64,
    pub email: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = SessionCookie::read(&jar)
            .token()
            .ok_or(ApiError::Unauthorized)?;

        let claims = state
            .jwt_service
            .verify_token(token)
            .ok_or(ApiError::Unauthorized)?;

        Ok(AuthUser {
            id: claims.id,
            email: claims.email,
        })
    }
}
