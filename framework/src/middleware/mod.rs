//! Middleware
//!
//! A middleware receives the request and a `Next` continuation, and may
//! short-circuit, rewrite the request, or decorate the response.
//!
//! ```rust,ignore
//! use kit::{async_trait, Middleware, Next, Request, Response};
//!
//! pub struct Timing;
//!
//! #[async_trait]
//! impl Middleware for Timing {
//!     async fn handle(&self, request: Request, next: Next) -> Response {
//!         next(request).await
//!     }
//! }
//! ```

mod registry;

pub use registry::{get_global_middleware, register_global_middleware, MiddlewareRegistry};

use crate::http::{Request, Response};
use crate::routing::{BoxedHandler, HandlerFuture};
use async_trait::async_trait;
use std::sync::Arc;

/// Continuation that runs the rest of the chain
pub type Next = Arc<dyn Fn(Request) -> HandlerFuture + Send + Sync>;

#[async_trait]
pub trait Middleware: Send + Sync {
    async fn handle(&self, request: Request, next: Next) -> Response;
}

pub type BoxedMiddleware = Arc<dyn Middleware>;

pub fn into_boxed<M: Middleware + 'static>(middleware: M) -> BoxedMiddleware {
    Arc::new(middleware)
}

/// Ordered middleware wrapped around a route handler
#[derive(Default)]
pub struct MiddlewareChain {
    middleware: Vec<BoxedMiddleware>,
}

impl MiddlewareChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, middleware: impl IntoIterator<Item = BoxedMiddleware>) {
        self.middleware.extend(middleware);
    }

    /// Run the chain; the first middleware added is the outermost
    pub async fn execute(self, request: Request, handler: Arc<BoxedHandler>) -> Response {
        let mut next: Next = Arc::new(move |req: Request| -> HandlerFuture { handler(req) });

        for middleware in self.middleware.into_iter().rev() {
            let inner = next.clone();
            next = Arc::new(move |req: Request| -> HandlerFuture {
                let middleware = middleware.clone();
                let inner = inner.clone();
                Box::pin(async move { middleware.handle(req, inner).await })
            });
        }

        next(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpResponse;
    use bytes::Bytes;

    struct Tag(&'static str);

    #[async_trait]
    impl Middleware for Tag {
        async fn handle(&self, request: Request, next: Next) -> Response {
            let response = next(request).await;
            response.map(|r| {
                let body = format!("{}{}", self.0, r.body_text());
                r.body(body)
            })
        }
    }

    struct Block;

    #[async_trait]
    impl Middleware for Block {
        async fn handle(&self, _request: Request, _next: Next) -> Response {
            Err(HttpResponse::text("blocked").status(403))
        }
    }

    fn handler() -> Arc<BoxedHandler> {
        let handler: BoxedHandler = Box::new(|_req: Request| -> HandlerFuture {
            Box::pin(async { Ok(HttpResponse::text("handler")) })
        });
        Arc::new(handler)
    }

    fn request() -> Request {
        Request::new(hyper::Request::builder().uri("/").body(Bytes::new()).unwrap())
    }

    #[tokio::test]
    async fn test_first_middleware_is_outermost() {
        let mut chain = MiddlewareChain::new();
        chain.extend([into_boxed(Tag("a:")), into_boxed(Tag("b:"))]);

        let response = chain.execute(request(), handler()).await.unwrap();
        assert_eq!(response.body_text(), "a:b:handler");
    }

    #[tokio::test]
    async fn test_middleware_can_short_circuit() {
        let mut chain = MiddlewareChain::new();
        chain.extend([into_boxed(Block), into_boxed(Tag("never:"))]);

        let response = chain.execute(request(), handler()).await.unwrap_err();
        assert_eq!(response.status_code(), 403);
        assert_eq!(response.body_text(), "blocked");
    }
}
