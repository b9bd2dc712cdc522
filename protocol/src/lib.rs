//! Shared wire DTOs for the `/api/auth` REST surface.
//!
//! This crate owns the JSON representation used by `server`, `client`, and
//! `cli`. Field names are camelCase on the wire to match the browser
//! contract; every optional field is tolerated when absent so older servers
//! and cached profiles keep deserializing.

use serde::{Deserialize, Serialize};

/// Base path for every auth endpoint.
pub const AUTH_BASE: &str = "/api/auth";

/// `POST`: exchange credentials for a session cookie.
pub const LOGIN_PATH: &str = "/api/auth/login";
/// `POST`: end the server session.
pub const LOGOUT_PATH: &str = "/api/auth/logout";
/// `GET`: report whether the current cookie maps to a live session.
pub const STATUS_PATH: &str = "/api/auth/status";
/// `GET` fetches and `PUT` updates the current user's profile.
pub const PROFILE_PATH: &str = "/api/auth/profile";
/// `POST`: rotate the current user's password.
pub const CHANGE_PASSWORD_PATH: &str = "/api/auth/change-password";

/// Name of the HttpOnly cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session_token";

/// Role string assigned to administrators.
pub const ROLE_ADMIN: &str = "ADMIN";

/// Cached copy of the signed-in user's profile. Owned by the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Server-side numeric identifier, when the server includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub username: String,
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    /// Role name, e.g. `"ADMIN"`.
    pub role: String,
    /// RFC 3339 account creation timestamp (profile endpoint only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl UserProfile {
    /// Uppercased first character of the full name, used for avatar badges.
    #[must_use]
    pub fn initial(&self) -> Option<char> {
        self.full_name.chars().next().map(|c| c.to_ascii_uppercase())
    }
}

/// Result envelope returned by every credential/profile endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
}

impl AuthResult {
    /// Successful result with a message and optional user.
    #[must_use]
    pub fn ok(message: impl Into<String>, user: Option<UserProfile>) -> Self {
        Self { success: true, message: Some(message.into()), user }
    }

    /// Rejected result carrying only a message.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self { success: false, message: Some(message.into()), user: None }
    }
}

/// Body of `GET /api/auth/status`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Body of `POST /api/auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body of `PUT /api/auth/profile`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    pub email: String,
    pub full_name: String,
}

/// Body of `POST /api/auth/change-password`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangeRequest {
    pub old_password: String,
    pub new_password: String,
}

/// Minimal shape used to pull a `message` out of an error body of unknown type.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Extract a non-empty `message` field from a raw response body, if any.
#[must_use]
pub fn error_message_from_body(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
