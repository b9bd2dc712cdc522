//! Auth routes: credential login, cookie sessions, profile and password.
//!
//! DESIGN
//! ======
//! Every endpoint answers with the JSON envelopes from `protocol`, including
//! failures, so clients can always surface `message`. The session token only
//! travels in the HttpOnly `session_token` cookie.
//!
//! ERROR HANDLING
//! ==============
//! [`DirectoryError`] variants map to status codes in [`directory_error`].
//! Missing or stale sessions reject with `401` before a handler runs.

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use protocol::{
    AuthResult, LoginRequest, PasswordChangeRequest, ProfileUpdateRequest, SESSION_COOKIE, StatusResponse,
};
use time::Duration;

use crate::services::directory::DirectoryError;
use crate::state::AppState;

pub const NOT_AUTHENTICATED: &str = "User not authenticated";

fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

fn cleared_cookie(secure: bool) -> Cookie<'static> {
    let mut cookie = session_cookie(String::new(), secure);
    cookie.set_max_age(Duration::ZERO);
    cookie
}

fn rejected(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(AuthResult::rejected(message))).into_response()
}

fn directory_error(err: DirectoryError) -> Response {
    let status = match &err {
        DirectoryError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        DirectoryError::InvalidOldPassword => StatusCode::BAD_REQUEST,
        DirectoryError::UsernameTaken(_) | DirectoryError::EmailTaken(_) => StatusCode::CONFLICT,
        DirectoryError::NotFound => StatusCode::NOT_FOUND,
        DirectoryError::Password(e) => {
            tracing::error!(error = %e, "password hashing failed");
            return rejected(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        }
    };
    rejected(status, err.to_string())
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Session resolved from the request cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user_id: i64,
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(SESSION_COOKIE).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(rejected(StatusCode::UNAUTHORIZED, NOT_AUTHENTICATED));
        }

        let app_state = AppState::from_ref(state);
        let user_id = app_state
            .sessions
            .validate(token)
            .await
            .ok_or_else(|| rejected(StatusCode::UNAUTHORIZED, NOT_AUTHENTICATED))?;

        Ok(Self { user_id, token: token.to_owned() })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/auth/login`: check credentials, open a session, set the cookie.
pub async fn login(State(state): State<AppState>, jar: CookieJar, Json(req): Json<LoginRequest>) -> Response {
    let user = match state.directory.authenticate(req.username.trim(), &req.password).await {
        Ok(user) => user,
        Err(e) => {
            tracing::info!(username = %req.username, "login rejected");
            return directory_error(e);
        }
    };

    // A login replaces whatever session the browser already had.
    if let Some(old) = jar.get(SESSION_COOKIE) {
        state.sessions.delete(old.value()).await;
    }
    let token = state.sessions.create(user.id).await;
    let mut cookie = session_cookie(token, state.config.cookie_secure);
    cookie.set_max_age(state.sessions.ttl());

    tracing::info!(user_id = user.id, "login succeeded");
    let body = AuthResult::ok("Login successful", Some(user.to_profile()));
    (jar.add(cookie), Json(body)).into_response()
}

/// `POST /api/auth/logout`: drop the session if any and clear the cookie.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if state.sessions.delete(cookie.value()).await {
            tracing::debug!("session deleted");
        }
    }
    let jar = jar.add(cleared_cookie(state.config.cookie_secure));
    (jar, Json(AuthResult::ok("Logout successful", None))).into_response()
}

/// `GET /api/auth/status`: always `200`; reports whether the cookie is live.
pub async fn status(State(state): State<AppState>, jar: CookieJar) -> Json<StatusResponse> {
    let token = jar.get(SESSION_COOKIE).map(Cookie::value).unwrap_or_default();
    let user = match state.sessions.validate(token).await {
        Some(user_id) => state.directory.find(user_id).await,
        None => None,
    };
    Json(StatusResponse {
        authenticated: user.is_some(),
        user: user.map(|u| u.to_profile()),
        message: None,
    })
}

/// `GET /api/auth/profile`: current user's profile with its creation time.
pub async fn get_profile(State(state): State<AppState>, auth: AuthUser) -> Response {
    match state.directory.find(auth.user_id).await {
        Some(user) => Json(AuthResult { success: true, message: None, user: Some(user.to_detailed_profile()) })
            .into_response(),
        None => directory_error(DirectoryError::NotFound),
    }
}

/// `PUT /api/auth/profile`: replace email and full name.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ProfileUpdateRequest>,
) -> Response {
    match state.directory.update_profile(auth.user_id, req.email.trim(), req.full_name.trim()).await {
        Ok(user) => Json(AuthResult::ok("Profile updated successfully", Some(user.to_profile()))).into_response(),
        Err(e) => directory_error(e),
    }
}

/// `POST /api/auth/change-password`: rotate the password and sign out other sessions.
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<PasswordChangeRequest>,
) -> Response {
    if let Err(e) = state.directory.change_password(auth.user_id, &req.old_password, &req.new_password).await {
        return directory_error(e);
    }
    let revoked = state.sessions.revoke_others(auth.user_id, &auth.token).await;
    tracing::info!(user_id = auth.user_id, revoked, "other sessions revoked after password change");
    Json(AuthResult::ok("Password changed successfully", None)).into_response()
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
