//! `gloo-net` transport for the auth endpoints.
//!
//! Client-side (hydrate): real HTTP calls with browser credentials so the
//! `session_token` cookie rides along. Server-side (SSR): every call fails
//! as a network error, since these endpoints only make sense in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Status and body are handed to `session::api::decode_response`, so the
//! browser and the cli classify rejections the same way.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use protocol::{
    AuthResult, CHANGE_PASSWORD_PATH, LOGIN_PATH, LOGOUT_PATH, LoginRequest, PROFILE_PATH, PasswordChangeRequest,
    ProfileUpdateRequest, STATUS_PATH, StatusResponse,
};
use session::api::{ApiError, AuthApi, decode_response, encode_request, expect_success};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Method {
    Get,
    Post,
    Put,
}

/// [`AuthApi`] over `fetch`.
#[derive(Clone, Debug, Default)]
pub struct HttpAuthApi {
    base: String,
}

impl HttpAuthApi {
    /// Transport rooted at `base` (scheme + host, no trailing path).
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// Transport for the origin that served the page.
    #[must_use]
    pub fn same_origin() -> Self {
        Self::default()
    }

    /// Absolute or origin-relative URL for an endpoint path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base.trim_end_matches('/'))
    }

    async fn round_trip(&self, method: Method, path: &str, body: Option<String>) -> Result<(u16, String), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            use gloo_net::http::Request;
            use web_sys::RequestCredentials;

            let url = self.url(path);
            let builder = match method {
                Method::Get => Request::get(&url),
                Method::Post => Request::post(&url),
                Method::Put => Request::put(&url),
            }
            .credentials(RequestCredentials::Include);
            let request = match body {
                Some(json) => builder.header("Content-Type", "application/json").body(json),
                None => builder.build(),
            }
            .map_err(|e| ApiError::Network(e.to_string()))?;

            let response = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
            let status = response.status();
            let text = response.text().await.map_err(|e| ApiError::Decode(e.to_string()))?;
            log::debug!("{method:?} {path} -> {status}");
            Ok((status, text))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (method, body);
            Err(ApiError::Network(format!("no browser transport for {path}")))
        }
    }
}

#[async_trait::async_trait(?Send)]
impl AuthApi for HttpAuthApi {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResult, ApiError> {
        let (status, body) = self.round_trip(Method::Post, LOGIN_PATH, Some(encode_request(request)?)).await?;
        decode_response(status, &body)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let (status, body) = self.round_trip(Method::Post, LOGOUT_PATH, None).await?;
        expect_success(status, &body)
    }

    async fn status(&self) -> Result<StatusResponse, ApiError> {
        let (status, body) = self.round_trip(Method::Get, STATUS_PATH, None).await?;
        decode_response(status, &body)
    }

    async fn profile(&self) -> Result<AuthResult, ApiError> {
        let (status, body) = self.round_trip(Method::Get, PROFILE_PATH, None).await?;
        decode_response(status, &body)
    }

    async fn update_profile(&self, request: &ProfileUpdateRequest) -> Result<AuthResult, ApiError> {
        let (status, body) = self.round_trip(Method::Put, PROFILE_PATH, Some(encode_request(request)?)).await?;
        decode_response(status, &body)
    }

    async fn change_password(&self, request: &PasswordChangeRequest) -> Result<AuthResult, ApiError> {
        let (status, body) = self
            .round_trip(Method::Post, CHANGE_PASSWORD_PATH, Some(encode_request(request)?))
            .await?;
        decode_response(status, &body)
    }
}
