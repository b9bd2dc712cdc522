//! # client
//!
//! Leptos + WASM frontend for the catering management dashboard.
//!
//! This crate is the browser half of the auth slice: it wires the `session`
//! core to `localStorage` and `gloo-net`, renders the loading screen, the
//! login form and the authenticated shell (navbar, sidebar, routed pages),
//! and exposes `app::shell` for the server's SSR integration.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("console logger not installed: {e}").into());
    }
    leptos::mount::hydrate_body(app::App);
}
