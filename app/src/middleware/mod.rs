//! Application middleware
//!
//! Each middleware has its own dedicated file.

mod logging;
mod security_headers;

pub use logging::LoggingMiddleware;
pub use security_headers::SecurityHeadersMiddleware;
