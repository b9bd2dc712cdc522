//! Reactive state shared through Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` carries the auth client and the shell state; `ui` carries local
//! chrome such as the sidebar width. Both are provided once by `app::App`.

pub mod auth;
pub mod ui;
