use axum::Router;
use axum::body::Body;
use axum::http::{Request, header};
use protocol::{CHANGE_PASSWORD_PATH, LOGIN_PATH, LOGOUT_PATH, PROFILE_PATH, ROLE_ADMIN, STATUS_PATH, UserProfile};
use serde::de::DeserializeOwned;
use serde_json::json;
use tower::ServiceExt;

use super::*;
use crate::routes::api_routes;
use crate::state::test_helpers::{seed_staff, test_app_state};

// =============================================================================
// HELPERS
// =============================================================================

async fn send(app: &Router, method: &str, uri: &str, cookie: Option<&str>, body: Option<serde_json::Value>) -> Response {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        req = req.header(header::COOKIE, cookie);
    }
    let body = match body {
        Some(json) => {
            req = req.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.clone().oneshot(req.body(body).unwrap()).await.unwrap()
}

async fn body_json<T: DeserializeOwned>(resp: Response) -> T {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// `name=value` pair from the response's `Set-Cookie` header.
fn cookie_pair(resp: &Response) -> String {
    let raw = resp.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
    raw.split(';').next().unwrap().to_owned()
}

async fn app() -> (Router, AppState) {
    let state = test_app_state().await;
    (api_routes(state.clone()), state)
}

async fn login_as(app: &Router, username: &str, password: &str) -> String {
    let resp = send(app, "POST", LOGIN_PATH, None, Some(json!({"username": username, "password": password}))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    cookie_pair(&resp)
}

// =============================================================================
// login
// =============================================================================

#[tokio::test]
async fn login_sets_http_only_cookie_and_returns_user() {
    let (app, _) = app().await;
    let resp = send(&app, "POST", LOGIN_PATH, None, Some(json!({"username": "admin", "password": "admin123"}))).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let set_cookie = resp.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap().to_owned();
    assert!(set_cookie.starts_with("session_token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Path=/"));

    let body: AuthResult = body_json(resp).await;
    assert!(body.success);
    assert_eq!(body.message.as_deref(), Some("Login successful"));
    let user = body.user.unwrap();
    assert_eq!(user.username, "admin");
    assert_eq!(user.full_name, "System Administrator");
    assert_eq!(user.role, ROLE_ADMIN);
}

#[tokio::test]
async fn login_with_wrong_password_is_401() {
    let (app, _) = app().await;
    let resp = send(&app, "POST", LOGIN_PATH, None, Some(json!({"username": "admin", "password": "nope"}))).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().get(header::SET_COOKIE).is_none());

    let body: AuthResult = body_json(resp).await;
    assert!(!body.success);
    assert_eq!(body.message.as_deref(), Some("Invalid username or password"));
}

#[tokio::test]
async fn login_with_unknown_user_is_401() {
    let (app, _) = app().await;
    let resp = send(&app, "POST", LOGIN_PATH, None, Some(json!({"username": "ghost", "password": "admin123"}))).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_replaces_previous_session() {
    let (app, state) = app().await;
    let first = login_as(&app, "admin", "admin123").await;
    let second = {
        let resp = send(&app, "POST", LOGIN_PATH, Some(&first), Some(json!({"username": "admin", "password": "admin123"})))
            .await;
        cookie_pair(&resp)
    };
    assert_ne!(first, second);
    assert_eq!(state.sessions.len().await, 1);
}

// =============================================================================
// status / logout
// =============================================================================

#[tokio::test]
async fn status_without_cookie_is_unauthenticated_200() {
    let (app, _) = app().await;
    let resp = send(&app, "GET", STATUS_PATH, None, None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: StatusResponse = body_json(resp).await;
    assert!(!body.authenticated);
    assert!(body.user.is_none());
}

#[tokio::test]
async fn status_with_session_reports_user() {
    let (app, _) = app().await;
    let cookie = login_as(&app, "admin", "admin123").await;
    let body: StatusResponse = body_json(send(&app, "GET", STATUS_PATH, Some(&cookie), None).await).await;
    assert!(body.authenticated);
    assert_eq!(body.user.map(|u| u.username).as_deref(), Some("admin"));
}

#[tokio::test]
async fn status_with_bogus_cookie_is_unauthenticated() {
    let (app, _) = app().await;
    let body: StatusResponse = body_json(send(&app, "GET", STATUS_PATH, Some("session_token=bogus"), None).await).await;
    assert!(!body.authenticated);
}

#[tokio::test]
async fn logout_ends_session_and_clears_cookie() {
    let (app, state) = app().await;
    let cookie = login_as(&app, "admin", "admin123").await;

    let resp = send(&app, "POST", LOGOUT_PATH, Some(&cookie), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let set_cookie = resp.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap().to_owned();
    assert!(set_cookie.contains("Max-Age=0"));
    let body: AuthResult = body_json(resp).await;
    assert_eq!(body.message.as_deref(), Some("Logout successful"));

    assert_eq!(state.sessions.len().await, 0);
    let status: StatusResponse = body_json(send(&app, "GET", STATUS_PATH, Some(&cookie), None).await).await;
    assert!(!status.authenticated);
}

#[tokio::test]
async fn logout_without_session_still_succeeds() {
    let (app, _) = app().await;
    let resp = send(&app, "POST", LOGOUT_PATH, None, None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: AuthResult = body_json(resp).await;
    assert!(body.success);
}

// =============================================================================
// profile
// =============================================================================

#[tokio::test]
async fn profile_requires_session() {
    let (app, _) = app().await;
    for (method, body) in [("GET", None), ("PUT", Some(json!({"email": "a@b.c", "fullName": "A"})))] {
        let resp = send(&app, method, PROFILE_PATH, None, body).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{method}");
        let body: AuthResult = body_json(resp).await;
        assert_eq!(body.message.as_deref(), Some(NOT_AUTHENTICATED));
    }
}

#[tokio::test]
async fn get_profile_includes_created_at() {
    let (app, _) = app().await;
    let cookie = login_as(&app, "admin", "admin123").await;
    let body: AuthResult = body_json(send(&app, "GET", PROFILE_PATH, Some(&cookie), None).await).await;
    assert!(body.success);
    let user = body.user.unwrap();
    assert_eq!(user.email, "admin@catering.com");
    assert!(user.created_at.is_some());
}

#[tokio::test]
async fn update_profile_returns_updated_user() {
    let (app, _) = app().await;
    let cookie = login_as(&app, "admin", "admin123").await;
    let resp = send(
        &app,
        "PUT",
        PROFILE_PATH,
        Some(&cookie),
        Some(json!({"email": "boss@catering.com", "fullName": "Catering Boss"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: AuthResult = body_json(resp).await;
    assert_eq!(body.message.as_deref(), Some("Profile updated successfully"));
    let user: UserProfile = body.user.unwrap();
    assert_eq!(user.email, "boss@catering.com");
    assert_eq!(user.full_name, "Catering Boss");
}

#[tokio::test]
async fn update_profile_with_taken_email_is_409() {
    let (app, state) = app().await;
    seed_staff(&state).await;
    let cookie = login_as(&app, "chef", "kitchen1").await;
    let resp = send(
        &app,
        "PUT",
        PROFILE_PATH,
        Some(&cookie),
        Some(json!({"email": "admin@catering.com", "fullName": "Head Chef"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: AuthResult = body_json(resp).await;
    assert_eq!(body.message.as_deref(), Some("Email already exists: admin@catering.com"));
}

// =============================================================================
// change-password
// =============================================================================

#[tokio::test]
async fn change_password_with_wrong_old_password_is_400() {
    let (app, _) = app().await;
    let cookie = login_as(&app, "admin", "admin123").await;
    let resp = send(
        &app,
        "POST",
        CHANGE_PASSWORD_PATH,
        Some(&cookie),
        Some(json!({"oldPassword": "nope", "newPassword": "fresh-pass"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: AuthResult = body_json(resp).await;
    assert_eq!(body.message.as_deref(), Some("Invalid old password"));
}

#[tokio::test]
async fn change_password_rotates_credentials_and_revokes_other_sessions() {
    let (app, _) = app().await;
    let current = login_as(&app, "admin", "admin123").await;
    let other = login_as(&app, "admin", "admin123").await;

    let resp = send(
        &app,
        "POST",
        CHANGE_PASSWORD_PATH,
        Some(&current),
        Some(json!({"oldPassword": "admin123", "newPassword": "fresh-pass"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: AuthResult = body_json(resp).await;
    assert_eq!(body.message.as_deref(), Some("Password changed successfully"));

    let still: StatusResponse = body_json(send(&app, "GET", STATUS_PATH, Some(&current), None).await).await;
    assert!(still.authenticated);
    let gone: StatusResponse = body_json(send(&app, "GET", STATUS_PATH, Some(&other), None).await).await;
    assert!(!gone.authenticated);

    let old = send(&app, "POST", LOGIN_PATH, None, Some(json!({"username": "admin", "password": "admin123"}))).await;
    assert_eq!(old.status(), StatusCode::UNAUTHORIZED);
    login_as(&app, "admin", "fresh-pass").await;
}

#[tokio::test]
async fn healthz_is_ok() {
    let (app, _) = app().await;
    assert_eq!(send(&app, "GET", "/healthz", None, None).await.status(), StatusCode::OK);
}
