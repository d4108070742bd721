use crate::http::{Request, Response};
use crate::middleware::{into_boxed, BoxedMiddleware, Middleware};
use matchit::Router as MatchitRouter;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, OnceLock, RwLock};

/// Route name -> path pattern, shared so redirects and templates can build URLs
static ROUTE_REGISTRY: OnceLock<RwLock<HashMap<String, String>>> = OnceLock::new();

pub fn register_route_name(name: &str, path: &str) {
    let registry = ROUTE_REGISTRY.get_or_init(|| RwLock::new(HashMap::new()));
    if let Ok(mut map) = registry.write() {
        map.insert(name.to_string(), path.to_string());
    }
}

/// URL for a named route
///
/// ```rust,ignore
/// let url = route("todos.edit", &[("id", "3")]);
/// assert_eq!(url, Some("/edit/3".to_string()));
/// ```
pub fn route(name: &str, params: &[(&str, &str)]) -> Option<String> {
    let registry = ROUTE_REGISTRY.get()?.read().ok()?;
    let mut url = registry.get(name)?.clone();
    for (key, value) in params {
        url = url.replace(&format!("{{{}}}", key), value);
    }
    Some(url)
}

pub type HandlerFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

pub type BoxedHandler = Box<dyn Fn(Request) -> HandlerFuture + Send + Sync>;

#[derive(Clone)]
struct Route {
    pattern: String,
    handler: Arc<BoxedHandler>,
}

/// Result of a successful route lookup
pub struct MatchedRoute {
    pub handler: Arc<BoxedHandler>,
    pub params: HashMap<String, String>,
    pub middleware: Vec<BoxedMiddleware>,
}

/// Outcome of matching a request against the router
pub enum RouteMatch {
    Found(MatchedRoute),
    /// The path exists but not for this method
    MethodNotAllowed(Vec<hyper::Method>),
    NotFound,
}

/// Method + path router backed by matchit
///
/// Paths use matchit syntax: `/edit/{id}`.
#[derive(Default)]
pub struct Router {
    routes: HashMap<hyper::Method, MatchitRouter<Route>>,
    /// Route-level middleware keyed by path pattern
    route_middleware: HashMap<String, Vec<BoxedMiddleware>>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert<H, Fut>(mut self, method: hyper::Method, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        let handler: BoxedHandler = Box::new(move |req: Request| -> HandlerFuture { Box::pin(handler(req)) });
        let route = Route {
            pattern: path.to_string(),
            handler: Arc::new(handler),
        };

        if let Err(e) = self.routes.entry(method.clone()).or_insert_with(MatchitRouter::new).insert(path, route) {
            tracing::error!(%method, path, error = %e, "route registration failed");
        }

        RouteBuilder {
            router: self,
            last_path: path.to_string(),
        }
    }

    pub fn get<H, Fut>(self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.insert(hyper::Method::GET, path, handler)
    }

    pub fn post<H, Fut>(self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.insert(hyper::Method::POST, path, handler)
    }

    /// Match a request and collect the route's params and middleware
    pub fn match_route(&self, method: &hyper::Method, path: &str) -> RouteMatch {
        // HEAD is answered by the GET handler
        let lookup = if *method == hyper::Method::HEAD {
            &hyper::Method::GET
        } else {
            method
        };

        if let Some(matched) = self.routes.get(lookup).and_then(|r| r.at(path).ok()) {
            let params = matched
                .params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            let route = matched.value;
            return RouteMatch::Found(MatchedRoute {
                handler: route.handler.clone(),
                params,
                middleware: self
                    .route_middleware
                    .get(&route.pattern)
                    .cloned()
                    .unwrap_or_default(),
            });
        }

        let mut allowed: Vec<hyper::Method> = self
            .routes
            .iter()
            .filter(|(_, router)| router.at(path).is_ok())
            .map(|(method, _)| method.clone())
            .collect();

        if allowed.is_empty() {
            RouteMatch::NotFound
        } else {
            allowed.sort_by(|a, b| a.as_str().cmp(b.as_str()));
            RouteMatch::MethodNotAllowed(allowed)
        }
    }
}

/// Returned after registering a route; names it or attaches middleware
pub struct RouteBuilder {
    router: Router,
    last_path: String,
}

impl RouteBuilder {
    /// Name the most recently registered route
    pub fn name(self, name: &str) -> Router {
        register_route_name(name, &self.last_path);
        self.router
    }

    /// Attach middleware to the most recently registered path
    pub fn middleware<M: Middleware + 'static>(mut self, middleware: M) -> RouteBuilder {
        self.router
            .route_middleware
            .entry(self.last_path.clone())
            .or_default()
            .push(into_boxed(middleware));
        self
    }

    pub fn get<H, Fut>(self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.router.get(path, handler)
    }

    pub fn post<H, Fut>(self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.router.post(path, handler)
    }
}

impl From<RouteBuilder> for Router {
    fn from(builder: RouteBuilder) -> Self {
        builder.router
    }
}
