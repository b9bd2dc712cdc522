//! Password hashing.
//!
//! DESIGN
//! ======
//! Passwords are stored as PHC strings produced by Argon2id with a random
//! salt per hash. Verification parses the stored string, so hashes made with
//! different parameters keep verifying.

#[cfg(test)]
#[path = "password_test.rs"]
mod password_test;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hashing failed or a stored hash could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("password hashing failed: {0}")]
pub struct PasswordError(String);

/// Argon2 hasher shared by every account operation.
#[derive(Clone, Default)]
pub struct Hasher {
    argon: Argon2<'static>,
}

impl Hasher {
    /// Low-cost parameters for tests.
    #[cfg(test)]
    #[must_use]
    pub fn fast() -> Self {
        use argon2::{Algorithm, Params, Version};

        let argon = match Params::new(8, 1, 1, None) {
            Ok(params) => Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            Err(_) => Argon2::default(),
        };
        Self { argon }
    }

    /// Hash `password` into a PHC string.
    ///
    /// # Errors
    ///
    /// Returns an error if Argon2 rejects the input.
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError(e.to_string()))
    }

    /// Whether `password` matches the stored PHC string. Malformed hashes never match.
    #[must_use]
    pub fn verify(&self, password: &str, stored: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(stored) else {
            tracing::warn!("stored password hash is malformed");
            return false;
        };
        self.argon.verify_password(password.as_bytes(), &parsed).is_ok()
    }
}
