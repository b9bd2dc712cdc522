//! Auth client: server round trips reconciled into the session store.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the only writer of the persisted session. The app shell asks it
//! whether the user is signed in, and login/logout/profile screens call it.
//!
//! DESIGN
//! ======
//! `check_status` trusts the local flag only to skip the network when no
//! session was ever established. Whenever the flag claims "signed in", the
//! server must confirm it; any doubt clears the session (fail-closed).
//!
//! ERROR HANDLING
//! ==============
//! Every failure surfaces as an [`AuthError`] whose `Display` is the text to
//! show the user. Transport failures always use a generic per-operation
//! network message; only server rejections may carry a server message.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::fmt;

use protocol::{
    AuthResult, LoginRequest, PasswordChangeRequest, ProfileUpdateRequest, ROLE_ADMIN, UserProfile,
};

use crate::api::{ApiError, AuthApi};
use crate::session::{Session, SessionStore};
use crate::store::KeyValueStore;

/// Shown when the login form is submitted with an empty field.
pub const LOGIN_FIELDS_REQUIRED: &str = "Please enter both username and password";
/// Shown when a profile update is missing a field.
pub const PROFILE_FIELDS_REQUIRED: &str = "Please enter both email and full name";
/// Shown when a password change is missing a field.
pub const PASSWORD_FIELDS_REQUIRED: &str = "Please enter both current and new password";

/// Uniform failure contract for every auth operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Required input was missing; no request was sent.
    #[error("{0}")]
    Validation(String),
    /// No response from the server.
    #[error("{0}")]
    Transport(String),
    /// The server answered and said no.
    #[error("{0}")]
    Application(String),
}

impl AuthError {
    /// User-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(m) | Self::Transport(m) | Self::Application(m) => m,
        }
    }
}

/// Server-facing operations, used to pick failure messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Login,
    Logout,
    GetProfile,
    UpdateProfile,
    ChangePassword,
}

impl Operation {
    /// Message used when the server rejects without saying why.
    #[must_use]
    pub fn fallback_message(self) -> &'static str {
        match self {
            Self::Login => "Login failed",
            Self::Logout => "Logout failed",
            Self::GetProfile => "Failed to get profile",
            Self::UpdateProfile => "Failed to update profile",
            Self::ChangePassword => "Failed to change password",
        }
    }

    /// Message used whenever no response arrived.
    #[must_use]
    pub fn network_message(self) -> &'static str {
        match self {
            Self::Login => "Network error during login",
            Self::Logout => "Network error during logout",
            Self::GetProfile => "Network error while getting profile",
            Self::UpdateProfile => "Network error while updating profile",
            Self::ChangePassword => "Network error while changing password",
        }
    }

    /// Map a transport-level failure to the user-facing error.
    #[must_use]
    pub fn failure(self, err: &ApiError) -> AuthError {
        match err {
            ApiError::Network(_) => AuthError::Transport(self.network_message().to_owned()),
            ApiError::Rejected { .. } | ApiError::Decode(_) => AuthError::Application(
                err.server_message()
                    .unwrap_or(self.fallback_message())
                    .to_owned(),
            ),
        }
    }

    /// Map a delivered `success: false` body to the user-facing error.
    #[must_use]
    pub fn rejected(self, result: &AuthResult) -> AuthError {
        let message = result
            .message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(self.fallback_message());
        AuthError::Application(message.to_owned())
    }

    fn settle(self, outcome: Result<AuthResult, ApiError>) -> Result<AuthResult, AuthError> {
        match outcome {
            Ok(result) if result.success => Ok(result),
            Ok(result) => Err(self.rejected(&result)),
            Err(e) => {
                log::warn!("{self} failed: {e}");
                Err(self.failure(&e))
            }
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Login => "login",
            Self::Logout => "logout",
            Self::GetProfile => "get profile",
            Self::UpdateProfile => "update profile",
            Self::ChangePassword => "change password",
        };
        f.write_str(label)
    }
}

/// Validate login form input. The username is trimmed; the password is not.
///
/// # Errors
///
/// [`AuthError::Validation`] with [`LOGIN_FIELDS_REQUIRED`] if either is empty.
pub fn validate_credentials(username: &str, password: &str) -> Result<LoginRequest, AuthError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AuthError::Validation(LOGIN_FIELDS_REQUIRED.to_owned()));
    }
    Ok(LoginRequest { username: username.to_owned(), password: password.to_owned() })
}

/// Explicitly constructed auth service. One instance per client.
pub struct AuthClient<A, S> {
    api: A,
    session: SessionStore<S>,
}

impl<A: AuthApi, S: KeyValueStore> AuthClient<A, S> {
    #[must_use]
    pub fn new(api: A, kv: S) -> Self {
        Self { api, session: SessionStore::new(kv) }
    }

    /// Transport this client talks through.
    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Current persisted session.
    #[must_use]
    pub fn session(&self) -> Session {
        self.session.read()
    }

    /// Cached profile of the signed-in user, if the session is authenticated.
    #[must_use]
    pub fn current_user(&self) -> Option<UserProfile> {
        self.session.read().current_user().cloned()
    }

    /// Whether the signed-in user has exactly `role`.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.current_user().is_some_and(|u| u.role == role)
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN)
    }

    /// Sign in. On success the session is persisted before returning.
    ///
    /// # Errors
    ///
    /// Validation, transport or server rejection; the session is untouched.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResult, AuthError> {
        let request = validate_credentials(username, password)?;
        let result = Operation::Login.settle(self.api.login(&request).await)?;
        self.session.write(&Session::signed_in(result.user.clone()));
        log::info!("signed in as {}", request.username);
        Ok(result)
    }

    /// Sign out. The local session is cleared immediately, before the returned
    /// future is polled, so no dead session survives a failed request.
    ///
    /// # Errors
    ///
    /// The server request failed. Local state is already cleared.
    pub fn logout(&self) -> impl Future<Output = Result<(), AuthError>> + '_ {
        self.session.clear();
        async move {
            self.api.logout().await.map_err(|e| {
                log::warn!("logout request failed: {e}");
                Operation::Logout.failure(&e)
            })
        }
    }

    /// Ask the server whether the persisted session is still live.
    ///
    /// Returns `false` without any request when no local session exists.
    pub async fn check_status(&self) -> bool {
        if !self.session.read().authenticated {
            return false;
        }
        match self.api.status().await {
            Ok(status) if status.authenticated => {
                if let Some(user) = status.user {
                    self.session.write(&Session::signed_in(Some(user)));
                }
                true
            }
            Ok(_) => {
                log::info!("server reports session expired");
                self.session.clear();
                false
            }
            Err(e) => {
                log::warn!("status check failed, treating as signed out: {e}");
                self.session.clear();
                false
            }
        }
    }

    /// Fetch the profile and refresh the cached copy.
    ///
    /// # Errors
    ///
    /// Transport failure or server rejection.
    pub async fn get_profile(&self) -> Result<AuthResult, AuthError> {
        let result = Operation::GetProfile.settle(self.api.profile().await)?;
        self.refresh_user(result.user.as_ref());
        Ok(result)
    }

    /// Update email and full name, then refresh the cached copy.
    ///
    /// # Errors
    ///
    /// Validation, transport failure or server rejection.
    pub async fn update_profile(&self, email: &str, full_name: &str) -> Result<AuthResult, AuthError> {
        let (email, full_name) = (email.trim(), full_name.trim());
        if email.is_empty() || full_name.is_empty() {
            return Err(AuthError::Validation(PROFILE_FIELDS_REQUIRED.to_owned()));
        }
        let request = ProfileUpdateRequest { email: email.to_owned(), full_name: full_name.to_owned() };
        let result = Operation::UpdateProfile.settle(self.api.update_profile(&request).await)?;
        self.refresh_user(result.user.as_ref());
        Ok(result)
    }

    /// Change the password. Local state is not touched.
    ///
    /// # Errors
    ///
    /// Validation, transport failure or server rejection.
    pub async fn change_password(&self, old_password: &str, new_password: &str) -> Result<AuthResult, AuthError> {
        if old_password.is_empty() || new_password.is_empty() {
            return Err(AuthError::Validation(PASSWORD_FIELDS_REQUIRED.to_owned()));
        }
        let request = PasswordChangeRequest {
            old_password: old_password.to_owned(),
            new_password: new_password.to_owned(),
        };
        Operation::ChangePassword.settle(self.api.change_password(&request).await)
    }

    fn refresh_user(&self, user: Option<&UserProfile>) {
        let Some(user) = user else {
            return;
        };
        let mut session = self.session.read();
        session.user = Some(user.clone());
        self.session.write(&session);
    }
}
