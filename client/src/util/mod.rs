//! Browser glue shared by the client modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Keeps `web-sys` calls out of pages and components so those stay testable
//! natively.

pub mod storage;
