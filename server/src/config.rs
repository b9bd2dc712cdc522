//! Server configuration from the process environment.
//!
//! DESIGN
//! ======
//! `main` loads `.env` through `dotenvy` first, then [`Config::from_env`]
//! reads plain environment variables. Parsing goes through
//! [`Config::from_lookup`] so tests can feed a map instead of mutating the
//! real environment.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;
/// Longest session a deployment may configure: one year.
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub session_ttl: Duration,
    /// Whether the session cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
    /// Password for the administrator seeded into an empty directory.
    pub admin_password: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            session_ttl: Duration::hours(DEFAULT_SESSION_TTL_HOURS),
            cookie_secure: false,
            admin_password: DEFAULT_ADMIN_PASSWORD.to_owned(),
        }
    }
}

/// Parse the usual spellings of a boolean flag.
pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Config {
    /// # Errors
    ///
    /// Returns an error if a variable is set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. Unset or blank
    /// variables fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = get("PORT") {
            config.port = raw.trim().parse().map_err(|_| ConfigError::Invalid { key: "PORT", value: raw })?;
        }
        if let Some(raw) = get("SESSION_TTL_HOURS") {
            let hours = raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|h| (1..=MAX_SESSION_TTL_HOURS).contains(h))
                .ok_or(ConfigError::Invalid { key: "SESSION_TTL_HOURS", value: raw })?;
            config.session_ttl = Duration::hours(hours);
        }
        if let Some(raw) = get("COOKIE_SECURE") {
            config.cookie_secure =
                parse_bool(&raw).ok_or(ConfigError::Invalid { key: "COOKIE_SECURE", value: raw })?;
        }
        if let Some(raw) = get("CATERING_ADMIN_PASSWORD") {
            config.admin_password = raw;
        }
        Ok(config)
    }
}
