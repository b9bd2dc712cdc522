//! Cookie session table.
//!
//! ARCHITECTURE
//! ============
//! Sessions are opaque random tokens mapped to a user id and an expiry. The
//! browser only ever sees the token, in an HttpOnly cookie.
//!
//! TRADE-OFFS
//! ==========
//! The table is in memory, so a restart signs everyone out. Expired entries
//! are dropped lazily on lookup and in bulk by [`SessionTable::purge_expired`].

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;

use rand::Rng;
use time::{Duration, OffsetDateTime};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        // Writing into a String cannot fail.
        if write!(s, "{b:02x}").is_err() {
            break;
        }
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    user_id: i64,
    expires_at: OffsetDateTime,
}

/// Live sessions keyed by token.
#[derive(Debug)]
pub struct SessionTable {
    ttl: Duration,
    entries: RwLock<HashMap<String, Entry>>,
}

impl SessionTable {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entries: RwLock::new(HashMap::new()) }
    }

    /// Lifetime of a new session.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Open a session for `user_id`, returning its token.
    pub async fn create(&self, user_id: i64) -> String {
        let token = generate_token();
        let entry = Entry { user_id, expires_at: OffsetDateTime::now_utc().saturating_add(self.ttl) };
        self.entries.write().await.insert(token.clone(), entry);
        token
    }

    /// User behind `token`, if the session exists and has not expired.
    pub async fn validate(&self, token: &str) -> Option<i64> {
        let entry = self.entries.read().await.get(token).copied()?;
        if entry.expires_at > OffsetDateTime::now_utc() {
            return Some(entry.user_id);
        }
        self.entries.write().await.remove(token);
        None
    }

    /// Drop a session. Unknown tokens are ignored.
    pub async fn delete(&self, token: &str) -> bool {
        self.entries.write().await.remove(token).is_some()
    }

    /// Drop every session belonging to `user_id` except `keep`.
    pub async fn revoke_others(&self, user_id: i64, keep: &str) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|token, entry| entry.user_id != user_id || token == keep);
        before - entries.len()
    }

    /// Remove all expired sessions, returning how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        let now = OffsetDateTime::now_utc();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Run [`SessionTable::purge_expired`] every `every` until the runtime
    /// shuts down or the handle is aborted.
    pub fn spawn_purger(table: Arc<Self>, every: std::time::Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let purged = table.purge_expired().await;
                if purged > 0 {
                    let remaining = table.len().await;
                    tracing::debug!(purged, remaining, "expired sessions purged");
                }
            }
        })
    }
}
