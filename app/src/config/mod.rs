mod database;

pub use database::DatabaseConfig;

use kit::Config;

/// Register all application configs
pub fn register_all() {
    Config::register(DatabaseConfig::from_env());
}
