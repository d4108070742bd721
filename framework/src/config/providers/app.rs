use crate::config::env::{env, Environment};

/// Application-wide settings
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Shown in page titles
    pub name: String,
    pub environment: Environment,
    pub debug: bool,
    pub url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            name: env("APP_NAME", "To Do".to_string()),
            environment: Environment::detect(),
            debug: env("APP_DEBUG", false),
            url: env("APP_URL", "http://localhost:8080".to_string()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
