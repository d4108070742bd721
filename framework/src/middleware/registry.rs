//! Global middleware
//!
//! Register global middleware at boot with `global_middleware!`, or add it
//! to a server with `Server::middleware()`.

use super::{into_boxed, BoxedMiddleware, Middleware};
use std::sync::{OnceLock, RwLock};

static GLOBAL_MIDDLEWARE: OnceLock<RwLock<Vec<BoxedMiddleware>>> = OnceLock::new();

/// Register middleware that runs on every request, in registration order
pub fn register_global_middleware<M: Middleware + 'static>(middleware: M) {
    let registry = GLOBAL_MIDDLEWARE.get_or_init(|| RwLock::new(Vec::new()));
    if let Ok(mut vec) = registry.write() {
        vec.push(into_boxed(middleware));
    }
}

pub fn get_global_middleware() -> Vec<BoxedMiddleware> {
    GLOBAL_MIDDLEWARE
        .get()
        .and_then(|lock| lock.read().ok())
        .map(|vec| vec.clone())
        .unwrap_or_default()
}

/// Middleware applied to every request a server handles
#[derive(Default, Clone)]
pub struct MiddlewareRegistry {
    global: Vec<BoxedMiddleware>,
}

impl MiddlewareRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the middleware registered with `global_middleware!`
    pub fn from_global() -> Self {
        Self {
            global: get_global_middleware(),
        }
    }

    pub fn append<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        self.global.push(into_boxed(middleware));
        self
    }

    pub fn global_middleware(&self) -> &[BoxedMiddleware] {
        &self.global
    }
}

/// Register global middleware
///
/// ```rust,ignore
/// global_middleware!(middleware::LoggingMiddleware);
/// ```
#[macro_export]
macro_rules! global_middleware {
    ($middleware:expr) => {
        $crate::middleware::register_global_middleware($middleware)
    };
}
