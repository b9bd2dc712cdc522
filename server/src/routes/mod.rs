//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the `/api/auth` endpoints and stitches them with Leptos
//! SSR rendering under a single Axum router. Every page path is rendered by
//! the client's `App`; its route guard decides what the visitor sees.

pub mod auth;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use protocol::{CHANGE_PASSWORD_PATH, LOGIN_PATH, LOGOUT_PATH, PROFILE_PATH, STATUS_PATH};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// API routes shared by the SSR app and the cli.
pub fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route(LOGIN_PATH, post(auth::login))
        .route(LOGOUT_PATH, post(auth::logout))
        .route(STATUS_PATH, get(auth::status))
        .route(PROFILE_PATH, get(auth::get_profile).put(auth::update_profile))
        .route(CHANGE_PASSWORD_PATH, post(auth::change_password))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API routes plus Leptos SSR and the `/pkg` assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[package.metadata.leptos]` section).
pub fn leptos_app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes(state)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg"))))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
