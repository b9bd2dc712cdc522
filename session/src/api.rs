//! Transport seam for the `/api/auth` endpoints.
//!
//! ERROR HANDLING
//! ==============
//! Implementations report *what happened on the wire* and nothing more:
//! [`ApiError::Network`] when no response arrived, [`ApiError::Rejected`]
//! when the server answered with a non-2xx status, [`ApiError::Decode`] when
//! a 2xx body could not be read. Turning those into user-facing messages is
//! the auth client's job.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use protocol::{AuthResult, LoginRequest, PasswordChangeRequest, ProfileUpdateRequest, StatusResponse};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Outcome of a failed round trip.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// No response was received.
    #[error("network error: {0}")]
    Network(String),
    /// A response was received with a failure status.
    #[error("request rejected with status {status}")]
    Rejected { status: u16, message: Option<String> },
    /// A success response carried a body we could not parse.
    #[error("unreadable response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Server-supplied message, if the server sent one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => message.as_deref(),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }

    /// Whether the failure happened before any response arrived.
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

/// One async method per auth endpoint. Requests carry ambient session
/// credentials (the session cookie); nothing token-like is passed here.
///
/// Futures are not required to be `Send` so browser implementations can hold
/// JS handles across awaits.
#[async_trait::async_trait(?Send)]
pub trait AuthApi {
    /// `POST /api/auth/login`.
    async fn login(&self, request: &LoginRequest) -> Result<AuthResult, ApiError>;

    /// `POST /api/auth/logout`. The body is ignored.
    async fn logout(&self) -> Result<(), ApiError>;

    /// `GET /api/auth/status`.
    async fn status(&self) -> Result<StatusResponse, ApiError>;

    /// `GET /api/auth/profile`.
    async fn profile(&self) -> Result<AuthResult, ApiError>;

    /// `PUT /api/auth/profile`.
    async fn update_profile(&self, request: &ProfileUpdateRequest) -> Result<AuthResult, ApiError>;

    /// `POST /api/auth/change-password`.
    async fn change_password(&self, request: &PasswordChangeRequest) -> Result<AuthResult, ApiError>;
}

/// Serialize a request body for any transport.
///
/// Nothing was sent when this fails, so it is never reported as a network
/// error; it surfaces as [`ApiError::Decode`] and the operation's fallback
/// message.
///
/// # Errors
///
/// [`ApiError::Decode`] if `body` cannot be represented as JSON.
pub fn encode_request<T: Serialize>(body: &T) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Decode(format!("request not encoded: {e}")))
}

/// Classify a received response into a decoded body or an [`ApiError`].
///
/// Shared by the HTTP implementations so browser and native transports agree
/// on what counts as a rejection.
///
/// # Errors
///
/// [`ApiError::Rejected`] for non-2xx statuses (with the body's `message`
/// when present), [`ApiError::Decode`] for unparsable 2xx bodies.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::Rejected { status, message: protocol::error_message_from_body(body) });
    }
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Like [`decode_response`] but discards a successful body.
///
/// # Errors
///
/// [`ApiError::Rejected`] for non-2xx statuses.
pub fn expect_success(status: u16, body: &str) -> Result<(), ApiError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(ApiError::Rejected { status, message: protocol::error_message_from_body(body) })
    }
}
