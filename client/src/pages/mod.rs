//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! `login` is shown for every path while signed out. The rest render inside
//! the authenticated shell, picked by `session::routes::Route`.

pub mod dashboard;
pub mod login;
pub mod placeholder;
