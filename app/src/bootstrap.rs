//! Application bootstrap
//!
//! Registers global middleware and services. Called from main.rs after the
//! database is connected and before `Server::from_config()`.

use kit::{global_middleware, singleton, DbConnection};
use std::sync::Arc;

use crate::middleware;
use crate::services::{FlashNotifier, TodoService};

pub fn register(db: DbConnection) {
    // Runs on every request in registration order
    global_middleware!(middleware::LoggingMiddleware);
    global_middleware!(middleware::SecurityHeadersMiddleware);

    singleton!(TodoService::new(db, Arc::new(FlashNotifier)));
}
