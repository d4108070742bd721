//! Database configuration

use crate::config::env::env;

/// Backend inferred from the connection URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    Sqlite,
    Postgres,
}

/// Connection pool settings, read from the environment
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Seconds to wait for a pooled connection
    pub connect_timeout: u64,
    /// Log every SQL statement through sqlx
    pub logging: bool,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self {
            url: env("DATABASE_URL", "sqlite://./database/todo.db".to_string()),
            max_connections: env("DB_MAX_CONNECTIONS", 10),
            min_connections: env("DB_MIN_CONNECTIONS", 1),
            connect_timeout: env("DB_CONNECT_TIMEOUT", 30),
            logging: env("DB_LOGGING", false),
        }
    }

    /// Private in-memory SQLite database
    ///
    /// Every pooled connection to `sqlite::memory:` opens its own database, so
    /// the pool is pinned to a single connection.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: 5,
            logging: false,
        }
    }

    pub fn database_type(&self) -> DatabaseType {
        if self.url.starts_with("postgres://") || self.url.starts_with("postgresql://") {
            DatabaseType::Postgres
        } else {
            DatabaseType::Sqlite
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_type() == DatabaseType::Sqlite && self.url.contains(":memory:")
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
