//! Persisted session model.
//!
//! DESIGN
//! ======
//! The session is stored as two independent string entries: a boolean flag
//! under [`FLAG_KEY`] and a JSON profile under [`USER_KEY`]. Reads never
//! fail; anything unparsable reads back as the absent session. Writes touch
//! the profile first and the flag last, and restore both previous values if
//! either step is rejected, so a later read never observes half a write.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use protocol::UserProfile;
use serde::{Deserialize, Serialize};

use crate::store::{KeyValueStore, StorageError};

/// Storage key for the `"true"` / `"false"` authenticated flag.
pub const FLAG_KEY: &str = "authenticated";
/// Storage key for the JSON-serialized cached profile.
pub const USER_KEY: &str = "user";

/// The client's belief about whether the user is signed in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub authenticated: bool,
    pub user: Option<UserProfile>,
}

impl Session {
    /// Authenticated session holding `user`.
    #[must_use]
    pub fn signed_in(user: Option<UserProfile>) -> Self {
        Self { authenticated: true, user }
    }

    /// The cached profile, but only while the session is authenticated.
    ///
    /// A profile left behind by an unauthenticated session is stale and must
    /// not be shown as the current user.
    #[must_use]
    pub fn current_user(&self) -> Option<&UserProfile> {
        if self.authenticated { self.user.as_ref() } else { None }
    }
}

#[derive(Debug, thiserror::Error)]
enum ReadFailure {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("malformed authenticated flag: {0:?}")]
    MalformedFlag(String),
    #[error("malformed cached profile: {0}")]
    MalformedUser(#[from] serde_json::Error),
}

/// Two-key session persistence over any [`KeyValueStore`].
#[derive(Debug)]
pub struct SessionStore<S> {
    kv: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    #[must_use]
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Best-effort current session. Malformed or unreadable data is absent.
    #[must_use]
    pub fn read(&self) -> Session {
        match self.try_read() {
            Ok(session) => session,
            Err(e) => {
                log::warn!("discarding stored session: {e}");
                Session::default()
            }
        }
    }

    /// Persist both entries, or leave the previous state in place.
    pub fn write(&self, session: &Session) {
        let user_raw = match session.user.as_ref().map(serde_json::to_string).transpose() {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("session not written, profile did not serialize: {e}");
                return;
            }
        };
        let flag = if session.authenticated { "true" } else { "false" };

        let prior = match (self.kv.get(FLAG_KEY), self.kv.get(USER_KEY)) {
            (Ok(prior_flag), Ok(prior_user)) => (prior_flag, prior_user),
            (Err(e), _) | (_, Err(e)) => {
                log::warn!("session not written, storage unreadable: {e}");
                return;
            }
        };

        if let Err(e) = self.apply(Some(flag), user_raw.as_deref()) {
            log::warn!("session write failed, restoring previous state: {e}");
            if let Err(e) = self.apply(prior.0.as_deref(), prior.1.as_deref()) {
                log::error!("session restore failed: {e}");
            }
        }
    }

    /// Remove both entries. Idempotent.
    ///
    /// If the flag cannot be removed it is overwritten with `"false"`, so a
    /// failed clear still reads as signed out.
    pub fn clear(&self) {
        if let Err(e) = self.kv.remove(FLAG_KEY) {
            log::warn!("failed to clear session key `{FLAG_KEY}`: {e}");
            if let Err(e) = self.kv.set(FLAG_KEY, "false") {
                log::error!("session flag left in place: {e}");
            }
        }
        if let Err(e) = self.kv.remove(USER_KEY) {
            log::warn!("failed to clear session key `{USER_KEY}`: {e}");
        }
    }

    fn try_read(&self) -> Result<Session, ReadFailure> {
        let authenticated = match self.kv.get(FLAG_KEY)?.as_deref() {
            None | Some("false") => false,
            Some("true") => true,
            Some(other) => return Err(ReadFailure::MalformedFlag(other.to_owned())),
        };
        let user = match self.kv.get(USER_KEY)? {
            Some(raw) => Some(serde_json::from_str::<UserProfile>(&raw)?),
            None => None,
        };
        Ok(Session { authenticated, user })
    }

    fn apply(&self, flag: Option<&str>, user: Option<&str>) -> Result<(), StorageError> {
        self.put(USER_KEY, user)?;
        self.put(FLAG_KEY, flag)
    }

    fn put(&self, key: &str, value: Option<&str>) -> Result<(), StorageError> {
        match value {
            Some(value) => self.kv.set(key, value),
            None => self.kv.remove(key),
        }
    }
}
