//! In-memory user directory.
//!
//! ARCHITECTURE
//! ============
//! Accounts live in a `RwLock`-guarded vector owned by `AppState`. Usernames
//! and emails are unique across accounts. Passwords are never stored in the
//! clear; see [`super::password`].
//!
//! ERROR HANDLING
//! ==============
//! Every fallible operation returns [`DirectoryError`]. The route layer maps
//! each variant to a status code and a user-facing message, so the
//! `Display` text is the message clients see.

#[cfg(test)]
#[path = "directory_test.rs"]
mod directory_test;

use protocol::{ROLE_ADMIN, UserProfile};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tokio::sync::RwLock;

use super::password::{Hasher, PasswordError};

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@catering.com";
pub const DEFAULT_ADMIN_FULL_NAME: &str = "System Administrator";

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Invalid old password")]
    InvalidOldPassword,
    #[error("Username already exists: {0}")]
    UsernameTaken(String),
    #[error("Email already exists: {0}")]
    EmailTaken(String),
    #[error("User not found")]
    NotFound,
    #[error(transparent)]
    Password(#[from] PasswordError),
}

/// Stored account.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub active: bool,
    pub created_at: OffsetDateTime,
}

impl UserRecord {
    /// Profile as returned by login and status.
    #[must_use]
    pub fn to_profile(&self) -> UserProfile {
        UserProfile {
            id: Some(self.id),
            username: self.username.clone(),
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
            created_at: None,
        }
    }

    /// Profile with the creation timestamp, as returned by the profile endpoints.
    #[must_use]
    pub fn to_detailed_profile(&self) -> UserProfile {
        UserProfile { created_at: self.created_at.format(&Rfc3339).ok(), ..self.to_profile() }
    }
}

/// Fields for a new account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
}

pub struct UserDirectory {
    hasher: Hasher,
    users: RwLock<Vec<UserRecord>>,
}

impl UserDirectory {
    #[must_use]
    pub fn new(hasher: Hasher) -> Self {
        Self { hasher, users: RwLock::new(Vec::new()) }
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Add an account.
    ///
    /// # Errors
    ///
    /// Rejects duplicate usernames and emails, or a password Argon2 cannot hash.
    pub async fn create_user(&self, new: NewUser) -> Result<UserRecord, DirectoryError> {
        let password_hash = self.hasher.hash(&new.password)?;
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == new.username) {
            return Err(DirectoryError::UsernameTaken(new.username));
        }
        if users.iter().any(|u| u.email == new.email) {
            return Err(DirectoryError::EmailTaken(new.email));
        }

        let id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        let record = UserRecord {
            id,
            username: new.username,
            password_hash,
            email: new.email,
            full_name: new.full_name,
            role: new.role,
            active: true,
            created_at: OffsetDateTime::now_utc(),
        };
        users.push(record.clone());
        tracing::info!(user_id = id, username = %record.username, "user created");
        Ok(record)
    }

    /// Create the default administrator when no accounts exist.
    ///
    /// Returns `true` when the account was created.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::create_user`] failures.
    pub async fn seed_default_admin(&self, password: &str) -> Result<bool, DirectoryError> {
        if !self.is_empty().await {
            return Ok(false);
        }
        self.create_user(NewUser {
            username: DEFAULT_ADMIN_USERNAME.to_owned(),
            password: password.to_owned(),
            email: DEFAULT_ADMIN_EMAIL.to_owned(),
            full_name: DEFAULT_ADMIN_FULL_NAME.to_owned(),
            role: ROLE_ADMIN.to_owned(),
        })
        .await?;
        Ok(true)
    }

    /// Check credentials. Unknown, inactive and wrong-password all fail the same way.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::InvalidCredentials`] on any mismatch.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<UserRecord, DirectoryError> {
        let record = self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.username == username && u.active)
            .cloned()
            .ok_or(DirectoryError::InvalidCredentials)?;
        if !self.hasher.verify(password, &record.password_hash) {
            return Err(DirectoryError::InvalidCredentials);
        }
        Ok(record)
    }

    pub async fn find(&self, id: i64) -> Option<UserRecord> {
        self.users.read().await.iter().find(|u| u.id == id).cloned()
    }

    /// Replace email and full name.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::EmailTaken`] when another account holds `email`;
    /// [`DirectoryError::NotFound`] for an unknown id.
    pub async fn update_profile(&self, id: i64, email: &str, full_name: &str) -> Result<UserRecord, DirectoryError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.id != id && u.email == email) {
            return Err(DirectoryError::EmailTaken(email.to_owned()));
        }
        let record = users.iter_mut().find(|u| u.id == id).ok_or(DirectoryError::NotFound)?;
        email.clone_into(&mut record.email);
        full_name.clone_into(&mut record.full_name);
        Ok(record.clone())
    }

    /// Rotate a password after checking the current one.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::InvalidOldPassword`] when `old` does not match;
    /// [`DirectoryError::NotFound`] for an unknown id.
    pub async fn change_password(&self, id: i64, old: &str, new: &str) -> Result<(), DirectoryError> {
        let current = self.find(id).await.ok_or(DirectoryError::NotFound)?;
        if !self.hasher.verify(old, &current.password_hash) {
            return Err(DirectoryError::InvalidOldPassword);
        }
        let password_hash = self.hasher.hash(new)?;

        let mut users = self.users.write().await;
        let record = users.iter_mut().find(|u| u.id == id).ok_or(DirectoryError::NotFound)?;
        record.password_hash = password_hash;
        tracing::info!(user_id = id, "password changed");
        Ok(())
    }
}
