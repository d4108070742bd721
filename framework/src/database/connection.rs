//! Database connection management

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::database::config::DatabaseConfig;
use crate::error::FrameworkError;

/// Clonable handle to the connection pool
#[derive(Clone)]
pub struct DbConnection {
    inner: Arc<DatabaseConnection>,
}

impl DbConnection {
    /// Open a connection pool
    ///
    /// For file-backed SQLite the parent directory is created and the file
    /// opened in create mode.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, FrameworkError> {
        let url = sqlite_url(&config.url)?;

        let mut opt = ConnectOptions::new(&url);
        opt.max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .sqlx_logging(config.logging);

        if config.is_in_memory() {
            // Dropping the only connection would drop the database with it
            opt.idle_timeout(Duration::from_secs(u32::MAX as u64))
                .max_lifetime(Duration::from_secs(u32::MAX as u64));
        }

        let conn = Database::connect(opt).await.map_err(|e| {
            tracing::error!(error = %e, "failed to connect to database");
            FrameworkError::database(e.to_string())
        })?;

        Ok(Self {
            inner: Arc::new(conn),
        })
    }

    /// Wrap an existing sea-orm connection
    pub fn from_connection(conn: DatabaseConnection) -> Self {
        Self {
            inner: Arc::new(conn),
        }
    }

    pub fn inner(&self) -> &DatabaseConnection {
        &self.inner
    }
}

/// Rewrite `sqlite://path` into the `sqlite:path?mode=rwc` form and make sure
/// the parent directory exists
fn sqlite_url(url: &str) -> Result<String, FrameworkError> {
    let Some(path) = url.strip_prefix("sqlite://") else {
        return Ok(url.to_string());
    };
    let path = path.trim_start_matches("./");

    if path.starts_with(":memory:") {
        return Ok("sqlite::memory:".to_string());
    }

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                FrameworkError::database(format!(
                    "Failed to create database directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(format!("sqlite:{}?mode=rwc", path))
}

impl AsRef<DatabaseConnection> for DbConnection {
    fn as_ref(&self) -> &DatabaseConnection {
        &self.inner
    }
}

impl std::ops::Deref for DbConnection {
    type Target = DatabaseConnection;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_url_rewrites() {
        assert_eq!(sqlite_url("sqlite::memory:").unwrap(), "sqlite::memory:");
        assert_eq!(sqlite_url("sqlite://:memory:").unwrap(), "sqlite::memory:");
        assert_eq!(
            sqlite_url("postgres://localhost/todo").unwrap(),
            "postgres://localhost/todo"
        );
        assert_eq!(sqlite_url("sqlite://todo.db").unwrap(), "sqlite:todo.db?mode=rwc");
    }
}
