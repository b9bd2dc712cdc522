//! App-shell state machine and route guard.
//!
//! DESIGN
//! ======
//! `Loading -> {Authenticated, Unauthenticated}`, then explicit login/logout
//! events flip between the two. Transitions are plain functions returning the
//! next state so any renderer (Leptos signals, the cli, tests) can drive them.
//! [`AppShell`] is the async driver that pairs them with an [`AuthClient`].
//!
//! Login and status transitions happen only after the server answered.
//! Logout transitions first and never waits on the network.

#[cfg(test)]
#[path = "shell_test.rs"]
mod shell_test;

use std::sync::Arc;

use crate::api::AuthApi;
use crate::auth::{AuthClient, AuthError};
use crate::routes::Route;
use crate::store::KeyValueStore;

/// Top-level rendering state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShellState {
    /// Startup status check in flight.
    #[default]
    Loading,
    Unauthenticated,
    Authenticated,
}

impl ShellState {
    /// Apply the result of the startup status check. Only leaves `Loading`.
    #[must_use]
    pub fn on_status_checked(self, authenticated: bool) -> Self {
        match self {
            Self::Loading if authenticated => Self::Authenticated,
            Self::Loading => Self::Unauthenticated,
            settled => settled,
        }
    }

    /// A login was confirmed by the server.
    #[must_use]
    pub fn on_login_succeeded(self) -> Self {
        match self {
            Self::Loading => Self::Loading,
            Self::Unauthenticated | Self::Authenticated => Self::Authenticated,
        }
    }

    /// The user asked to sign out. Unconditional.
    #[must_use]
    pub fn on_logout(self) -> Self {
        Self::Unauthenticated
    }

    #[must_use]
    pub fn is_authenticated(self) -> bool {
        self == Self::Authenticated
    }

    /// Route guard: what may render for `path` in this state.
    ///
    /// Nothing routed renders unless authenticated; once authenticated,
    /// unknown paths fall back to the dashboard.
    #[must_use]
    pub fn screen(self, path: &str) -> Screen {
        match self {
            Self::Loading => Screen::Loading,
            Self::Unauthenticated => Screen::Login,
            Self::Authenticated => Screen::Routed(Route::resolve(path)),
        }
    }
}

/// What the shell renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Login,
    Routed(Route),
}

/// Async driver for [`ShellState`] with an injected auth client.
pub struct AppShell<A, S> {
    auth: Arc<AuthClient<A, S>>,
    state: ShellState,
}

impl<A: AuthApi, S: KeyValueStore> AppShell<A, S> {
    /// New shell in `Loading`; call [`AppShell::init`] next.
    #[must_use]
    pub fn new(auth: Arc<AuthClient<A, S>>) -> Self {
        Self { auth, state: ShellState::Loading }
    }

    #[must_use]
    pub fn state(&self) -> ShellState {
        self.state
    }

    #[must_use]
    pub fn auth(&self) -> &AuthClient<A, S> {
        &self.auth
    }

    /// Run the startup status check. Only the first call does anything.
    pub async fn init(&mut self) -> ShellState {
        if self.state == ShellState::Loading {
            let authenticated = self.auth.check_status().await;
            self.state = self.state.on_status_checked(authenticated);
            log::debug!("shell initialized: {:?}", self.state);
        }
        self.state
    }

    /// Submit credentials. The state changes only on success.
    ///
    /// # Errors
    ///
    /// The [`AuthError`] whose message the login view should display.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<ShellState, AuthError> {
        self.auth.login(username, password).await?;
        self.state = self.state.on_login_succeeded();
        Ok(self.state)
    }

    /// Sign out. The state becomes `Unauthenticated` whatever the server says.
    pub async fn logout(&mut self) -> ShellState {
        self.state = self.state.on_logout();
        if let Err(e) = self.auth.logout().await {
            log::debug!("ignoring logout failure: {e}");
        }
        self.state
    }

    /// Route guard for the current state.
    #[must_use]
    pub fn screen(&self, path: &str) -> Screen {
        self.state.screen(path)
    }
}
