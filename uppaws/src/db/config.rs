//! Connection settings for the PostgreSQL tournament store.

use crate::settings::parse_env_or;
use std::time::Duration;

/// Pool settings for [`super::Database`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Seconds to wait for a free connection
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    /// Create `tournament_records` on connect if it is missing
    pub create_schema: bool,
}

impl DatabaseConfig {
    /// Pool settings for a given URL, other values at their defaults
    pub fn for_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Self::default()
        }
    }

    /// Read `UPPAWS_DATABASE_URL` (falling back to `DATABASE_URL`),
    /// `UPPAWS_DB_MAX_CONNECTIONS`, `UPPAWS_DB_MIN_CONNECTIONS`,
    /// `UPPAWS_DB_ACQUIRE_TIMEOUT_SECS`, `UPPAWS_DB_IDLE_TIMEOUT_SECS` and
    /// `UPPAWS_DB_CREATE_SCHEMA`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let database_url = std::env::var("UPPAWS_DATABASE_URL")
            .or_else(|_| std::env::var("DATABASE_URL"))
            .unwrap_or(defaults.database_url);

        Self {
            database_url,
            max_connections: parse_env_or("UPPAWS_DB_MAX_CONNECTIONS", defaults.max_connections),
            min_connections: parse_env_or("UPPAWS_DB_MIN_CONNECTIONS", defaults.min_connections),
            acquire_timeout_secs: parse_env_or(
                "UPPAWS_DB_ACQUIRE_TIMEOUT_SECS",
                defaults.acquire_timeout_secs,
            ),
            idle_timeout_secs: parse_env_or(
                "UPPAWS_DB_IDLE_TIMEOUT_SECS",
                defaults.idle_timeout_secs,
            ),
            create_schema: parse_env_or("UPPAWS_DB_CREATE_SCHEMA", defaults.create_schema),
        }
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

impl Default for DatabaseConfig {
    /// Local development database
    fn default() -> Self {
        Self {
            database_url: "postgres://postgres@localhost/uppaws".to_string(),
            max_connections: 10,
            min_connections: 1,
            acquire_timeout_secs: 5,
            idle_timeout_secs: 300,
            create_schema: true,
        }
    }
}
