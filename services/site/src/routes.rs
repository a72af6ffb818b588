//! Site service routes

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, warn};

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    middleware::{AuthUser, route_guard},
    models::{
        ContactListResponse, ContactSubmission, ContactSubmittedResponse, LoginCredentials,
        LoginResponse, MessageResponse, UserSummary, VerifyResponse,
    },
    pages,
    validation::{validate_contact, validate_login},
};

const LOGIN_FAILED: &str = "Login failed. Please try again.";
const SEND_FAILED: &str = "Failed to send message";
const FETCH_FAILED: &str = "Failed to fetch messages";

/// Create the router for the site service
pub fn create_router(state: AppState) -> Router {
    let guarded_pages = Router::new()
        .route("/login", get(pages::login))
        .route("/dashboard", get(pages::dashboard))
        .route("/dashboard/", get(pages::dashboard))
        .route("/dashboard/*rest", get(pages::dashboard))
        .route_layer(middleware::from_fn_with_state(state.clone(), route_guard));

    Router::new()
        .route("/health", get(health_check))
        .route("/", get(pages::home))
        .route("/about", get(pages::about))
        .route("/services", get(pages::services))
        .route("/contact", get(pages::contact))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/verify", get(verify))
        .route("/api/contact", post(submit_contact).get(list_contacts))
        .merge(guarded_pages)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "site"
    }))
}

/// User login endpoint
///
/// Unknown emails and wrong passwords produce the same 401 response.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginCredentials>, JsonRejection>,
) -> ApiResult<(CookieJar, Json<LoginResponse>)> {
    let credentials = payload.map(|Json(body)| body).unwrap_or_else(|rejection| {
        warn!("Unreadable login body: {}", rejection.body_text());
        LoginCredentials::default()
    });
    let (email, password) = validate_login(credentials).map_err(ApiError::Validation)?;

    info!("Login attempt for: {}", email);

    let credential_store = state.credentials.clone();
    let user = tokio::task::spawn_blocking(move || credential_store.authenticate(&email, &password))
        .await
        .map_err(|e| ApiError::internal(LOGIN_FAILED, e))?
        .ok_or(ApiError::InvalidCredentials)?;

    let token = state
        .jwt_service
        .issue_token(user.id, &user.email)
        .map_err(|e| ApiError::internal(LOGIN_FAILED, e))?;

    info!("User {} logged in", user.id);

    let response = LoginResponse {
        message: "Login successful".to_string(),
        user: UserSummary { email: user.email },
    };

    Ok((jar.add(state.session_cookies.issue(token)), Json(response)))
}

/// Logout endpoint
///
/// Clears the session cookie. The token itself stays valid until it expires.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    info!("Logout request");

    (
        jar.add(state.session_cookies.removal()),
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    )
}

/// Session verification endpoint
pub async fn verify(user: AuthUser) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        user: UserSummary { email: user.email },
    })
}

/// Public contact form submission
pub async fn submit_contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactSubmission>, JsonRejection>,
) -> ApiResult<Json<ContactSubmittedResponse>> {
    let submission = payload.map(|Json(body)| body).unwrap_or_else(|rejection| {
        warn!("Unreadable contact body: {}", rejection.body_text());
        ContactSubmission::default()
    });
    let new_message = validate_contact(submission).map_err(ApiError::Validation)?;

    let message = state
        .contact_store
        .append(new_message)
        .await
        .map_err(|e| ApiError::internal(SEND_FAILED, e))?;

    Ok(Json(ContactSubmittedResponse {
        message: "Message sent successfully".to_string(),
        data: message,
    }))
}

/// List contact messages in submission order (requires a session)
pub async fn list_contacts(
    user: AuthUser,
    State(state): State<AppState>,
) -> ApiResult<Json<ContactListResponse>> {
    info!("User {} listing contact messages", user.id);

    let messages = state
        .contact_store
        .list()
        .await
        .map_err(|e| ApiError::internal(FETCH_FAILED, e))?;

    Ok(Json(ContactListResponse { messages }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{Body, to_bytes},
        http::{
            Request, StatusCode,
            header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
        },
        response::Response,
    };
    use common::InMemoryContactStore;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::{
        config::{Environment, SiteConfig},
        jwt::{Claims, unix_now},
    };

    const ADMIN_EMAIL: &str = "admin@example.com";
    const ADMIN_PASSWORD: &str = "admin123";

    fn test_config() -> SiteConfig {
        SiteConfig {
            bind_address: "127.0.0.1:0".to_string(),
            environment: Environment::Development,
            jwt_secret: "test-secret".to_string(),
            token_ttl_seconds: 604_800,
            admin_email: ADMIN_EMAIL.to_string(),
            admin_password_hash: None,
            admin_password: Some(ADMIN_PASSWORD.to_string()),
            contact_store_limit: 100,
        }
    }

    fn test_app() -> (Router, AppState) {
        let state = AppState::from_config(&test_config()).unwrap();
        (create_router(state.clone()), state)
    }

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(COOKIE, format!("token={token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    /// Full `Set-Cookie` header for the session cookie, if any
    fn session_set_cookie(response: &Response) -> Option<String> {
        response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find(|value| value.starts_with("token="))
            .map(str::to_string)
    }

    fn session_token(response: &Response) -> Option<String> {
        let header = session_set_cookie(response)?;
        let pair = header.split(';').next()?;
        pair.strip_prefix("token=").map(str::to_string)
    }

    async fn login_as_admin(app: &Router) -> String {
        let response = send(
            app,
            json_request(
                "POST",
                "/api/auth/login",
                json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD}),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        session_token(&response).expect("session cookie")
    }

    fn location(response: &Response) -> &str {
        response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_health_check() {
        let (app, _) = test_app();

        let response = send(&app, get_request("/health", None)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"status": "ok", "service": "site"})
        );
    }

    #[tokio::test]
    async fn test_login_sets_verifiable_session_cookie() {
        let (app, state) = test_app();

        let response = send(
            &app,
            json_request(
                "POST",
                "/api/auth/login",
                json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD}),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = session_set_cookie(&response).expect("session cookie");
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("SameSite=Lax"));
        assert!(set_cookie.contains("Path=/"));
        assert!(set_cookie.contains("Max-Age=604800"));
        assert!(!set_cookie.contains("Secure"));

        let token = session_token(&response).unwrap();
        let claims = state.jwt_service.verify_token(&token).unwrap();
        assert_eq!(claims.id, 1);
        assert_eq!(claims.email, ADMIN_EMAIL);

        assert_eq!(
            body_json(response).await,
            json!({"message": "Login successful", "user": {"email": ADMIN_EMAIL}})
        );
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let (app, _) = test_app();

        let wrong_password = send(
            &app,
            json_request(
                "POST",
                "/api/auth/login",
                json!({"email": ADMIN_EMAIL, "password": "admin124"}),
            ),
        )
        .await;
        let unknown_email = send(
            &app,
            json_request(
                "POST",
                "/api/auth/login",
                json!({"email": "nobody@example.com", "password": ADMIN_PASSWORD}),
            ),
        )
        .await;

        assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
        assert!(session_set_cookie(&wrong_password).is_none());
        assert!(session_set_cookie(&unknown_email).is_none());

        let wrong_password = body_bytes(wrong_password).await;
        let unknown_email = body_bytes(unknown_email).await;
        assert_eq!(wrong_password, unknown_email);
        assert_eq!(
            serde_json::from_slice::<Value>(&unknown_email).unwrap(),
            json!({"message": "Invalid credentials"})
        );
    }

    #[tokio::test]
    async fn test_login_email_match_is_case_sensitive() {
        let (app, _) = test_app();

        let response = send(
            &app,
            json_request(
                "POST",
                "/api/auth/login",
                json!({"email": "Admin@Example.com", "password": ADMIN_PASSWORD}),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_requires_both_fields() {
        let (app, _) = test_app();
        let expected = json!({"message": "Email and password are required"});

        for body in [
            json!({"email": ADMIN_EMAIL}),
            json!({"password": ADMIN_PASSWORD}),
            json!({"email": "", "password": ADMIN_PASSWORD}),
            json!({}),
        ] {
            let response = send(&app, json_request("POST", "/api/auth/login", body)).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(body_json(response).await, expected);
        }
    }

    #[tokio::test]
    async fn test_login_with_unreadable_body_is_bad_request() {
        let (app, _) = test_app();

        let malformed = Request::builder()
            .method("POST")
            .uri("/api/auth/login")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = send(&app, malformed).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let no_content_type = Request::builder()
            .method("POST")
            .uri("/api/auth/login")
            .body(Body::from(r#"{"email":"a@b.co","password":"x"}"#))
            .unwrap();
        let response = send(&app, no_content_type).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_verify_endpoint() {
        let (app, state) = test_app();
        let token = login_as_admin(&app).await;

        let response = send(&app, get_request("/api/auth/verify", Some(&token))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"user": {"email": ADMIN_EMAIL}})
        );

        let now = unix_now().unwrap();
        let expired = state
            .jwt_service
            .sign(&Claims {
                id: 1,
                email: ADMIN_EMAIL.to_string(),
                iat: now - 3600,
                exp: now - 60,
            })
            .unwrap();

        let mut bodies = Vec::new();
        for token in [None, Some(""), Some("garbage"), Some(expired.as_str())] {
            let response = send(&app, get_request("/api/auth/verify", token)).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            bodies.push(body_bytes(response).await);
        }
        assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[tokio::test]
    async fn test_logout_clears_cookie() {
        let (app, _) = test_app();
        let token = login_as_admin(&app).await;

        let request = Request::builder()
            .method("POST")
            .uri("/api/auth/logout")
            .header(COOKIE, format!("token={token}"))
            .body(Body::empty())
            .unwrap();
        let response = send(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = session_set_cookie(&response).expect("removal cookie");
        assert!(set_cookie.starts_with("token=;"));
        assert!(set_cookie.contains("Max-Age=0"));
        assert!(set_cookie.contains("Path=/"));
        assert_eq!(
            body_json(response).await,
            json!({"message": "Logged out successfully"})
        );
    }

    #[tokio::test]
    async fn test_logout_without_session_still_clears_cookie() {
        let (app, _) = test_app();

        let request = Request::builder()
            .method("POST")
            .uri("/api/auth/logout")
            .body(Body::empty())
            .unwrap();
        let response = send(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(session_set_cookie(&response).is_some());
    }

    #[tokio::test]
    async fn test_dashboard_without_cookie_redirects_to_login() {
        let (app, _) = test_app();

        for path in ["/dashboard", "/dashboard/", "/dashboard/messages"] {
            let response = send(&app, get_request(path, None)).await;
            assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
            assert_eq!(location(&response), "/login");
        }
    }

    #[tokio::test]
    async fn test_dashboard_trailing_slash_is_guarded() {
        let (app, _) = test_app();

        let response = send(&app, get_request("/dashboard/", Some("garbage"))).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&response), "/login");

        let token = login_as_admin(&app).await;
        let response = send(&app, get_request("/dashboard/", Some(&token))).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_dashboard_with_expired_token_redirects_to_login() {
        let (app, state) = test_app();
        let now = unix_now().unwrap();
        let expired = state
            .jwt_service
            .sign(&Claims {
                id: 1,
                email: ADMIN_EMAIL.to_string(),
                iat: now - 7200,
                exp: now - 1,
            })
            .unwrap();

        assert!(state.jwt_service.verify_token(&expired).is_none());

        let response = send(&app, get_request("/dashboard", Some(&expired))).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&response), "/login");
    }

    #[tokio::test]
    async fn test_dashboard_with_valid_cookie_is_served() {
        let (app, _) = test_app();
        let token = login_as_admin(&app).await;

        let response = send(&app, get_request("/dashboard", Some(&token))).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(html.contains("<title>Dashboard |"));
    }

    #[tokio::test]
    async fn test_login_page_redirects_when_signed_in() {
        let (app, _) = test_app();
        let token = login_as_admin(&app).await;

        let response = send(&app, get_request("/login", Some(&token))).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&response), "/dashboard");

        let response = send(&app, get_request("/login", None)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(&app, get_request("/login", Some("garbage"))).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_empty_cookie_is_treated_as_absent_and_cleared() {
        let (app, _) = test_app();

        let response = send(&app, get_request("/dashboard", Some(""))).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&response), "/login");
        let set_cookie = session_set_cookie(&response).expect("removal cookie");
        assert!(set_cookie.contains("Max-Age=0"));

        let response = send(&app, get_request("/login", Some(""))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(session_set_cookie(&response).is_some());
    }

    #[tokio::test]
    async fn test_unguarded_pages_ignore_session() {
        let (app, _) = test_app();

        for path in ["/", "/about", "/services", "/contact"] {
            let response = send(&app, get_request(path, None)).await;
            assert_eq!(response.status(), StatusCode::OK, "{path}");

            let response = send(&app, get_request(path, Some("garbage"))).await;
            assert_eq!(response.status(), StatusCode::OK, "{path}");
            assert!(session_set_cookie(&response).is_none());
        }
    }

    #[tokio::test]
    async fn test_contact_messages_listed_in_submission_order() {
        let (app, _) = test_app();

        for (name, text) in [("Ada", "first"), ("Grace", "second"), ("Linus", "third")] {
            let response = send(
                &app,
                json_request(
                    "POST",
                    "/api/contact",
                    json!({"name": name, "email": "visitor@example.com", "message": text}),
                ),
            )
            .await;
            assert_eq!(response.status(), StatusCode::OK);

            let body = body_json(response).await;
            assert_eq!(body["message"], "Message sent successfully");
            assert_eq!(body["data"]["name"], name);
            assert_eq!(body["data"]["read"], false);
        }

        let token = login_as_admin(&app).await;
        let response = send(&app, get_request("/api/contact", Some(&token))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let texts: Vec<&str> = body["messages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["message"].as_str().unwrap())
            .collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_contact_list_requires_session() {
        let (app, _) = test_app();

        for token in [None, Some(""), Some("garbage")] {
            let response = send(&app, get_request("/api/contact", token)).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(body_json(response).await, json!({"message": "Unauthorized"}));
        }
    }

    #[tokio::test]
    async fn test_contact_submission_validation() {
        let (app, _) = test_app();

        let response = send(
            &app,
            json_request("POST", "/api/contact", json!({"name": "Ada", "message": "hi"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"message": "All fields are required"})
        );

        let response = send(
            &app,
            json_request(
                "POST",
                "/api/contact",
                json!({"name": "Ada", "email": "not-an-email", "message": "hi"}),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"message": "Invalid email format"})
        );
    }

    #[tokio::test]
    async fn test_contact_store_failure_is_generic_500() {
        let store = Arc::new(InMemoryContactStore::new(1));
        let state = AppState::with_contact_store(&test_config(), store).unwrap();
        let app = create_router(state);
        let submission = json!({"name": "Ada", "email": "ada@example.com", "message": "hi"});

        let response = send(&app, json_request("POST", "/api/contact", submission.clone())).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(&app, json_request("POST", "/api/contact", submission)).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({"message": "Failed to send message"})
        );
    }

    #[tokio::test]
    async fn test_production_cookie_is_secure() {
        let mut config = test_config();
        config.environment = Environment::Production;
        let app = create_router(AppState::from_config(&config).unwrap());

        let response = send(
            &app,
            json_request(
                "POST",
                "/api/auth/login",
                json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD}),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(session_set_cookie(&response).unwrap().contains("Secure"));
    }
}
