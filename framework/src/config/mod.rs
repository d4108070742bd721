//! Configuration
//!
//! - `.env` loading with environment-based precedence
//! - typed config structs stored in a process-wide repository
//!
//! # Example
//!
//! ```rust,no_run
//! use kit::{Config, ServerConfig};
//!
//! Config::init(std::path::Path::new("."));
//! let server = Config::get::<ServerConfig>().unwrap();
//! println!("Server port: {}", server.port);
//! ```

pub mod env;
pub mod providers;
pub mod repository;

pub use env::{env, env_optional, load_dotenv, Environment};
pub use providers::{AppConfig, ServerConfig, ServerConfigBuilder};

use crate::logging::LogConfig;
use std::path::Path;

/// Config facade
pub struct Config;

impl Config {
    /// Load `.env` files and register the framework's own configs
    ///
    /// Call once at startup, before building the server.
    pub fn init(project_root: &Path) -> Environment {
        let env = env::load_dotenv(project_root);

        repository::register(AppConfig::from_env());
        repository::register(ServerConfig::from_env());
        repository::register(LogConfig::from_env());

        env
    }

    /// Get a registered config struct
    pub fn get<T: std::any::Any + Send + Sync + Clone + 'static>() -> Option<T> {
        repository::get::<T>()
    }

    /// Register an application config struct
    pub fn register<T: std::any::Any + Send + Sync + 'static>(config: T) {
        repository::register(config);
    }

    pub fn has<T: std::any::Any + 'static>() -> bool {
        repository::has::<T>()
    }

    /// Current environment, from `AppConfig` if registered
    pub fn environment() -> Environment {
        Config::get::<AppConfig>()
            .map(|c| c.environment)
            .unwrap_or_else(Environment::detect)
    }

    pub fn is_debug() -> bool {
        Config::get::<AppConfig>().map(|c| c.debug).unwrap_or(false)
    }
}
