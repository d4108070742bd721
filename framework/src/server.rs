use crate::config::{Config, ServerConfig};
use crate::error::FrameworkError;
use crate::flash::Flash;
use crate::http::{collect_body, HttpResponse, Request};
use crate::middleware::{Middleware, MiddlewareChain, MiddlewareRegistry};
use crate::routing::{RouteMatch, Router};
use bytes::Bytes;
use http_body_util::Full;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;

/// HTTP server
///
/// Bodies are collected (up to `max_body_size`) before routing, then the
/// request runs through global middleware, route middleware and the handler
/// inside a flash scope.
pub struct Server {
    router: Arc<Router>,
    middleware: MiddlewareRegistry,
    host: String,
    port: u16,
    max_body_size: usize,
}

impl Server {
    pub fn new(router: impl Into<Router>) -> Self {
        let defaults = ServerConfig::builder().build();
        Self {
            router: Arc::new(router.into()),
            middleware: MiddlewareRegistry::new(),
            host: defaults.host,
            port: defaults.port,
            max_body_size: defaults.max_body_size,
        }
    }

    /// Server using the registered `ServerConfig` and the global middleware
    /// registered in bootstrap
    pub fn from_config(router: impl Into<Router>) -> Self {
        let config = Config::get::<ServerConfig>().unwrap_or_else(ServerConfig::from_env);
        Self {
            router: Arc::new(router.into()),
            middleware: MiddlewareRegistry::from_global(),
            host: config.host,
            port: config.port,
            max_body_size: config.max_body_size,
        }
    }

    /// Add global middleware (runs on every matched request)
    ///
    /// For route-specific middleware, use `.middleware(M)` on the route itself.
    pub fn middleware<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        self.middleware = self.middleware.append(middleware);
        self
    }

    pub fn host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    fn addr(&self) -> Result<SocketAddr, FrameworkError> {
        let ip: IpAddr = self.host.parse().map_err(|_| {
            FrameworkError::internal(format!("Invalid SERVER_HOST '{}'", self.host))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Accept connections until Ctrl-C
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = self.addr()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!(%addr, "server listening on http://{}", addr);

        let limit = self.max_body_size;
        let server = Arc::new(self);

        loop {
            let (stream, peer) = tokio::select! {
                accepted = listener.accept() => accepted?,
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("shutting down");
                    return Ok(());
                }
            };
            let io = TokioIo::new(stream);
            let server = server.clone();

            tokio::spawn(async move {
                let service = service_fn(move |req: hyper::Request<hyper::body::Incoming>| {
                    let server = server.clone();
                    async move {
                        let (parts, body) = req.into_parts();
                        let response = match collect_body(body, limit).await {
                            Ok(bytes) => server.handle(hyper::Request::from_parts(parts, bytes)).await,
                            Err(e) => HttpResponse::from(e),
                        };
                        Ok::<_, Infallible>(response.into_hyper())
                    }
                });

                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    tracing::warn!(%peer, error = %err, "error serving connection");
                }
            });
        }
    }

    /// Route a buffered request and convert the result for hyper
    pub async fn dispatch(&self, req: hyper::Request<Bytes>) -> hyper::Response<Full<Bytes>> {
        self.handle(req).await.into_hyper()
    }

    /// Route a buffered request
    ///
    /// Unknown paths get 404, known paths with the wrong method get 405 with
    /// an `Allow` header. HEAD runs the GET handler without a body and
    /// leaves the flash cookie untouched.
    pub async fn handle(&self, req: hyper::Request<Bytes>) -> HttpResponse {
        let request = Request::new(req);
        let method = request.method().clone();
        let path = request.path().to_string();
        let flash_cookie = request.cookie(Flash::COOKIE).map(str::to_string);

        let work = async {
            match self.router.match_route(&method, &path) {
                RouteMatch::Found(matched) => {
                    let request = request.with_params(matched.params);

                    let mut chain = MiddlewareChain::new();
                    chain.extend(self.middleware.global_middleware().iter().cloned());
                    chain.extend(matched.middleware);

                    chain
                        .execute(request, matched.handler)
                        .await
                        .unwrap_or_else(|e| e)
                }
                RouteMatch::MethodNotAllowed(allowed) => {
                    let allow = allowed
                        .iter()
                        .map(|m| m.as_str())
                        .collect::<Vec<_>>()
                        .join(", ");
                    HttpResponse::text("405 Method Not Allowed")
                        .status(405)
                        .header("Allow", allow)
                }
                RouteMatch::NotFound => HttpResponse::text("404 Not Found").status(404),
            }
        };

        // A HEAD response is never displayed, so it must not consume flashes
        if method == hyper::Method::HEAD {
            Flash::ephemeral(work).await.body(String::new())
        } else {
            Flash::scope(flash_cookie.as_deref(), work).await
        }
    }
}
