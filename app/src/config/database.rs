//! Database configuration
//!
//! `DATABASE_URL` (default `sqlite://./database/todo.db`) plus the
//! `DB_*` pool settings; see `kit::DatabaseConfig`.

pub use kit::DatabaseConfig;
