//! Security headers middleware

use kit::{async_trait, Middleware, Next, Request, Response};

const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/css/bootstrap.min.css";
const BOOTSTRAP_JS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/js/bootstrap.bundle.min.js";

/// Content-Security-Policy limited to this origin and the pinned Bootstrap
/// bundle
pub fn content_security_policy() -> String {
    [
        "default-src 'self'".to_string(),
        format!("script-src 'self' {}", BOOTSTRAP_JS),
        format!("style-src 'self' {}", BOOTSTRAP_CSS),
        "img-src 'self' data:".to_string(),
        format!("font-src 'self' {}", BOOTSTRAP_CSS),
        "frame-ancestors 'self'".to_string(),
        "form-action 'self'".to_string(),
    ]
    .join("; ")
}

/// Adds CSP and related headers unless the handler already set them
pub struct SecurityHeadersMiddleware;

#[async_trait]
impl Middleware for SecurityHeadersMiddleware {
    async fn handle(&self, request: Request, next: Next) -> Response {
        let decorate = |response: kit::HttpResponse| {
            response
                .header_if_missing("Content-Security-Policy", content_security_policy())
                .header_if_missing("X-Frame-Options", "SAMEORIGIN")
                .header_if_missing("X-Content-Type-Options", "nosniff")
                .header_if_missing("Referrer-Policy", "strict-origin-when-cross-origin")
        };

        match next(request).await {
            Ok(response) => Ok(decorate(response)),
            Err(response) => Err(decorate(response)),
        }
    }
}
