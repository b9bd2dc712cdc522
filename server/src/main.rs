#![recursion_limit = "256"]
mod config;
mod routes;
mod services;
mod state;

use std::sync::Arc;
use std::time::Duration as StdDuration;

use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::services::password::Hasher;
use crate::services::session::SessionTable;

const PURGE_INTERVAL: StdDuration = StdDuration::from_secs(15 * 60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e.into());
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let port = config.port;
    let admin_password = config.admin_password.clone();
    let state = state::AppState::new(config, Hasher::default());

    if state.directory.seed_default_admin(&admin_password).await? {
        tracing::info!("seeded default administrator account");
    }

    // Expired sessions are also dropped on lookup; this bounds memory.
    SessionTable::spawn_purger(Arc::clone(&state.sessions), PURGE_INTERVAL);

    let app = match routes::leptos_app(state.clone()) {
        Ok(app) => app,
        Err(e) => {
            tracing::warn!(error = %e, "leptos shell unavailable, serving API only");
            routes::api_routes(state)
        }
    };

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    tracing::info!(%port, "catering server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
