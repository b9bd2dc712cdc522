//! Native [`AuthApi`] over `reqwest`.
//!
//! DESIGN
//! ======
//! A browser keeps the `session_token` cookie in its jar. Here the cookie is
//! kept in the same key-value store as the session, under
//! [`COOKIE_KEY`], so separate cli invocations share one server session.
//! Every response's `Set-Cookie` headers are applied to the store before the
//! body is classified.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::sync::Arc;
use std::time::Duration;

use protocol::{
    AuthResult, CHANGE_PASSWORD_PATH, LOGIN_PATH, LOGOUT_PATH, LoginRequest, PROFILE_PATH, PasswordChangeRequest,
    ProfileUpdateRequest, SESSION_COOKIE, STATUS_PATH, StatusResponse,
};
use reqwest::header::{COOKIE, HeaderMap, SET_COOKIE};
use reqwest::{Client, Method};
use session::api::{ApiError, AuthApi, decode_response, encode_request, expect_success};
use session::store::KeyValueStore;

/// Store key holding the raw session cookie value.
pub const COOKIE_KEY: &str = "session_cookie";

/// What a response asked us to do with the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookieUpdate {
    Set(String),
    Clear,
}

/// Find the session cookie among `Set-Cookie` header values. The last one wins.
pub fn session_cookie_update<'a>(values: impl IntoIterator<Item = &'a str>) -> Option<CookieUpdate> {
    let mut update = None;
    for raw in values {
        let mut parts = raw.split(';').map(str::trim);
        let Some((name, value)) = parts.next().and_then(|pair| pair.split_once('=')) else {
            continue;
        };
        if name.trim() != SESSION_COOKIE {
            continue;
        }
        let expired = parts.any(|attr| attr.eq_ignore_ascii_case("max-age=0"));
        update = Some(if expired || value.is_empty() { CookieUpdate::Clear } else { CookieUpdate::Set(value.to_owned()) });
    }
    update
}

pub struct ReqwestAuthApi<S> {
    client: Client,
    base_url: String,
    store: Arc<S>,
}

impl<S: KeyValueStore> ReqwestAuthApi<S> {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built (TLS backend init).
    pub fn new(base_url: &str, timeout: Duration, store: Arc<S>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_owned(), store })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn stored_cookie(&self) -> Option<String> {
        match self.store.get(COOKIE_KEY) {
            Ok(cookie) => cookie.filter(|c| !c.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "session cookie unreadable");
                None
            }
        }
    }

    fn apply_cookies(&self, headers: &HeaderMap) {
        let values = headers.get_all(SET_COOKIE).iter().filter_map(|v| v.to_str().ok());
        let result = match session_cookie_update(values) {
            Some(CookieUpdate::Set(token)) => self.store.set(COOKIE_KEY, &token),
            Some(CookieUpdate::Clear) => self.store.remove(COOKIE_KEY),
            None => Ok(()),
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "session cookie not persisted");
        }
    }

    /// Send a request and return the status code and body text.
    async fn round_trip(&self, method: Method, path: &str, body: Option<String>) -> Result<(u16, String), ApiError> {
        let mut request = self.client.request(method, self.url(path));
        if let Some(cookie) = self.stored_cookie() {
            request = request.header(COOKIE, format!("{SESSION_COOKIE}={cookie}"));
        }
        if let Some(body) = body {
            request = request.header(reqwest::header::CONTENT_TYPE, "application/json").body(body);
        }

        let response = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        self.apply_cookies(response.headers());
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
        tracing::debug!(path, status, "auth request completed");
        Ok((status, text))
    }
}

#[async_trait::async_trait(?Send)]
impl<S: KeyValueStore> AuthApi for ReqwestAuthApi<S> {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResult, ApiError> {
        let (status, body) = self.round_trip(Method::POST, LOGIN_PATH, Some(encode_request(request)?)).await?;
        decode_response(status, &body)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let outcome = self.round_trip(Method::POST, LOGOUT_PATH, None).await;
        // The local cookie goes even when the server could not be told.
        if let Err(e) = self.store.remove(COOKIE_KEY) {
            tracing::warn!(error = %e, "session cookie not removed");
        }
        let (status, body) = outcome?;
        expect_success(status, &body)
    }

    async fn status(&self) -> Result<StatusResponse, ApiError> {
        let (status, body) = self.round_trip(Method::GET, STATUS_PATH, None).await?;
        decode_response(status, &body)
    }

    async fn profile(&self) -> Result<AuthResult, ApiError> {
        let (status, body) = self.round_trip(Method::GET, PROFILE_PATH, None).await?;
        decode_response(status, &body)
    }

    async fn update_profile(&self, request: &ProfileUpdateRequest) -> Result<AuthResult, ApiError> {
        let (status, body) = self.round_trip(Method::PUT, PROFILE_PATH, Some(encode_request(request)?)).await?;
        decode_response(status, &body)
    }

    async fn change_password(&self, request: &PasswordChangeRequest) -> Result<AuthResult, ApiError> {
        let (status, body) = self.round_trip(Method::POST, CHANGE_PASSWORD_PATH, Some(encode_request(request)?)).await?;
        decode_response(status, &body)
    }
}
