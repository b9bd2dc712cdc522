//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Chrome around the routed pages. Components read the auth and UI state from
//! Leptos context providers installed by `app::App`.

pub mod loading_screen;
pub mod navbar;
pub mod sidebar;
