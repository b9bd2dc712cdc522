//! Authentication and session-state core for the catering dashboard.
//!
//! This crate holds everything about "is the user signed in" that does not
//! depend on a browser: the persisted session model, the auth client that
//! reconciles server answers into it, and the app-shell state machine that
//! decides what may render. The `client` crate plugs in `localStorage` and
//! `gloo-net`; the `cli` crate plugs in a JSON file and `reqwest`.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`store`] | [`store::KeyValueStore`] seam and the in-memory backend |
//! | [`session`] | [`session::Session`] model and the two-key [`session::SessionStore`] |
//! | [`api`] | [`api::AuthApi`] transport seam and [`api::ApiError`] |
//! | [`auth`] | [`auth::AuthClient`] and the [`auth::AuthError`] taxonomy |
//! | [`shell`] | [`shell::ShellState`] transitions and the [`shell::AppShell`] driver |
//! | [`routes`] | Route table, fallback resolution and sidebar menu model |

pub mod api;
pub mod auth;
pub mod routes;
pub mod session;
pub mod shell;
pub mod store;

#[cfg(test)]
mod test_helpers;

pub use protocol::{AuthResult, UserProfile};
