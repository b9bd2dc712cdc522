//! Networking for the `/api/auth` endpoints.

pub mod api;
