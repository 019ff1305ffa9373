//! Runtime configuration read from the environment.
//!
//! `main` loads a `.env` file with `dotenvy` first, so every setting below can
//! live there during development.

use std::{env, net::SocketAddr, str::FromStr, time::Duration};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Shared secret required by every `/api/admin` route.
    pub admin_password: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_connect_timeout: Duration,
    /// Sessions expire after this much inactivity.
    pub session_ttl: time::Duration,
    /// Whether the session cookie carries the `Secure` attribute.
    pub session_secure: bool,
    pub session_cleanup_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            admin_password: required("ADMIN_PASSWORD")?,
            bind_addr: parse_or(&lookup, "BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 5000)))?,
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            db_min_connections: parse_or(&lookup, "DB_MIN_CONNECTIONS", 2)?,
            db_connect_timeout: Duration::from_secs(parse_or(
                &lookup,
                "DB_CONNECT_TIMEOUT_SECS",
                10,
            )?),
            session_ttl: time::Duration::days(parse_or(&lookup, "SESSION_TTL_DAYS", 7)?),
            session_secure: parse_or(&lookup, "SESSION_SECURE", true)?,
            session_cleanup_interval: Duration::from_secs(parse_or(
                &lookup,
                "SESSION_CLEANUP_INTERVAL_SECS",
                3600,
            )?),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) if !value.is_empty() => value
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        _ => Ok(default),
    }
}
