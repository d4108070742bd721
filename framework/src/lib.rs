//! A small web framework for server-rendered CRUD apps
//!
//! hyper for HTTP, matchit for routing, SeaORM for persistence, Tera for
//! HTML and `tracing` for logs.

pub mod config;
pub mod container;
pub mod database;
pub mod error;
pub mod flash;
pub mod http;
pub mod logging;
pub mod middleware;
pub mod routing;
pub mod server;
pub mod testing;
pub mod view;

pub use config::{env, AppConfig, Config, Environment, ServerConfig};
pub use container::App;
pub use database::{DatabaseConfig, DbConnection, DB};
pub use error::{FrameworkError, ValidationErrors};
pub use flash::{Flash, FlashLevel, FlashMessage};
pub use http::{HttpResponse, Redirect, Request, Response};
pub use logging::LogConfig;
pub use middleware::{Middleware, Next};
pub use routing::{route, Router};
pub use server::Server;
pub use view::View;

pub use async_trait::async_trait;
pub use tera;
