//! Logging setup
//!
//! Installs a `tracing` subscriber once per process. The filter comes from
//! `RUST_LOG` when set, otherwise from `LOG_LEVEL`. Output goes to stdout, or
//! is appended to `LOG_FILE` when configured.

use crate::config::env::{env, env_optional};
use crate::error::FrameworkError;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static INITIALIZED: OnceLock<()> = OnceLock::new();

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is not set (e.g. `info`,
    /// `todo_app=debug,info`)
    pub level: String,
    /// Append log lines to this file instead of stdout
    pub file: Option<PathBuf>,
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self {
            level: env("LOG_LEVEL", "info".to_string()),
            file: env_optional::<String>("LOG_FILE").map(PathBuf::from),
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Install the global subscriber
///
/// Subsequent calls are no-ops, so tests and binaries can both call it.
pub fn init(config: &LogConfig) -> Result<(), FrameworkError> {
    if INITIALIZED.get().is_some() {
        return Ok(());
    }

    let registry = tracing_subscriber::registry().with(config.filter());

    let result = match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    FrameworkError::internal(format!(
                        "Failed to open log file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
        }
        None => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    };

    // Another subscriber may already be installed (e.g. by a test harness)
    if let Err(e) = result {
        tracing::debug!(error = %e, "tracing subscriber already installed");
    }

    let _ = INITIALIZED.set(());
    Ok(())
}
