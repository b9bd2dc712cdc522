//! Auth state for the current browser tab.
//!
//! SYSTEM CONTEXT
//! ==============
//! `app::App` builds one [`AuthContext`] and provides it; the login page,
//! navbar and routed shell read it with `expect_context`.
//!
//! DESIGN
//! ======
//! The shell state lives in a signal and only changes through the pure
//! `ShellState` transitions. Network work runs in `spawn_local` and applies
//! its transition after the response. Sign-out is the exception: it flips
//! the state first and lets the request finish in the background.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use leptos::prelude::*;
use protocol::UserProfile;
use session::auth::AuthClient;
use session::shell::ShellState;

use crate::net::api::HttpAuthApi;
use crate::util::storage::BrowserStorage;

/// The auth client the browser build runs on.
pub type BrowserAuthClient = AuthClient<HttpAuthApi, BrowserStorage>;

/// Shared auth handle: the client plus the reactive view of its state.
#[derive(Clone)]
pub struct AuthContext {
    pub client: Arc<BrowserAuthClient>,
    pub shell: RwSignal<ShellState>,
    /// Profile to display; `None` unless the shell is authenticated.
    pub user: RwSignal<Option<UserProfile>>,
}

impl AuthContext {
    /// Context in `Loading`; call [`AuthContext::init`] once mounted.
    #[must_use]
    pub fn new(client: BrowserAuthClient) -> Self {
        Self { client: Arc::new(client), shell: RwSignal::new(ShellState::Loading), user: RwSignal::new(None) }
    }

    /// Apply a shell transition and refresh the displayed profile.
    pub fn transition(&self, step: impl FnOnce(ShellState) -> ShellState) {
        let next = step(self.shell.get_untracked());
        self.shell.set(next);
        self.user.set(visible_user(next, self.client.current_user()));
    }

    /// Start the one-time status check. Browser only; SSR stays `Loading`.
    pub fn init(&self) {
        #[cfg(feature = "hydrate")]
        {
            let ctx = self.clone();
            leptos::task::spawn_local(async move {
                let authenticated = ctx.client.check_status().await;
                ctx.transition(|state| state.on_status_checked(authenticated));
            });
        }
    }

    /// Sign out immediately; the server request runs in the background.
    pub fn sign_out(&self) {
        self.shell.set(self.shell.get_untracked().on_logout());
        self.user.set(None);
        #[cfg(feature = "hydrate")]
        {
            let client = Arc::clone(&self.client);
            leptos::task::spawn_local(async move {
                if let Err(e) = client.logout().await {
                    log::warn!("server logout failed: {e}");
                }
            });
        }
    }
}

/// Profile the UI may show in `state`.
#[must_use]
pub fn visible_user(state: ShellState, cached: Option<UserProfile>) -> Option<UserProfile> {
    if state.is_authenticated() { cached } else { None }
}
