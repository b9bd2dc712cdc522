//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own account and session state so route handlers can stay
//! focused on protocol translation and cookie plumbing.

pub mod directory;
pub mod password;
pub mod session;
