//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the user directory, the session table and the loaded config. Clone
//! is cheap; every field is behind an `Arc`.

use std::sync::Arc;

use crate::config::Config;
use crate::services::directory::UserDirectory;
use crate::services::password::Hasher;
use crate::services::session::SessionTable;

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<UserDirectory>,
    pub sessions: Arc<SessionTable>,
    pub config: Arc<Config>,
}

impl AppState {
    #[must_use]
    pub fn new(config: Config, hasher: Hasher) -> Self {
        Self {
            directory: Arc::new(UserDirectory::new(hasher)),
            sessions: Arc::new(SessionTable::new(config.session_ttl)),
            config: Arc::new(config),
        }
    }
}
