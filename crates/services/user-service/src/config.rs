//! User service configuration.

use std::env;
use std::fmt;
use std::str::FromStr;

use common::{DatabaseConfig, ServiceConfig};

/// Where users are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// SeaORM-backed store (SQLite or Postgres)
    #[default]
    Database,
    /// Process-local map, lost on exit
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "database" | "db" => Ok(StorageBackend::Database),
            "memory" | "mem" => Ok(StorageBackend::Memory),
            other => Err(format!("unknown storage backend: {}", other)),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Database => write!(f, "database"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

/// User service configuration.
#[derive(Debug, Clone, Default)]
pub struct UserServiceConfig {
    pub server: ServiceConfig,
    pub database: DatabaseConfig,
    pub storage: StorageBackend,
    /// Seed the demo users (memory backend only)
    pub seed_demo_users: bool,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Missing or unparseable values fall back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server: ServiceConfig {
                host: env::var("SERVER_HOST").unwrap_or(defaults.server.host),
                port: parse_env("SERVER_PORT").unwrap_or(defaults.server.port),
                log_level: env::var("LOG_LEVEL").unwrap_or(defaults.server.log_level),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or(defaults.database.url),
                max_connections: parse_env("DB_MAX_CONNECTIONS")
                    .unwrap_or(defaults.database.max_connections),
                min_connections: parse_env("DB_MIN_CONNECTIONS")
                    .unwrap_or(defaults.database.min_connections),
            },
            storage: parse_env("STORAGE_BACKEND").unwrap_or(defaults.storage),
            seed_demo_users: parse_env("SEED_DEMO_USERS").unwrap_or(defaults.seed_demo_users),
        }
    }
}

fn parse_env<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
