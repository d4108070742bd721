mod router;

pub use router::{
    register_route_name, route, BoxedHandler, HandlerFuture, MatchedRoute, RouteBuilder, RouteMatch, Router,
};
