//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled routes in table order
//! - Look up the first route matching method + path
//! - Invoke its handler, or the fallback when nothing matches
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan over the table (two routes today)
//! - Explicit NoMatch (`None`) from lookup; the 404 is produced by dispatch
//! - Params are decoded only for the winning route; a bad escape is a 400

use std::fmt;

use axum::http::Method;
use serde_json::Value;

use crate::errors::ApiError;
use crate::handlers::places;
use crate::http::request::ApiRequest;
use crate::http::response::ApiResponse;
use crate::routing::matcher::{decode_params, PathParams, PathPattern, PatternError, RouteMatcher};

/// Signature shared by every route handler.
pub type Handler = fn(&ApiRequest) -> ApiResponse;

/// One row of the static route table.
#[derive(Clone)]
pub struct RouteDef {
    pub name: &'static str,
    pub method: Method,
    pub pattern: &'static str,
    pub handler: Handler,
}

/// The service's route table, in match order.
pub const PLACES_ROUTES: [RouteDef; 2] = [
    RouteDef {
        name: "places_nearby",
        method: Method::GET,
        pattern: "/places/nearby/latitude/{latitude}/longitude/{longitude}",
        handler: places::nearby,
    },
    RouteDef {
        name: "places_trending",
        method: Method::GET,
        pattern: "/places/trending",
        handler: places::trending,
    },
];

/// A compiled route.
#[derive(Clone)]
pub struct Route {
    pub name: &'static str,
    matcher: RouteMatcher,
    handler: Handler,
}

impl Route {
    fn compile(def: &RouteDef) -> Result<Self, PatternError> {
        Ok(Self {
            name: def.name,
            matcher: RouteMatcher::new(def.method.clone(), PathPattern::compile(def.pattern)?),
            handler: def.handler,
        })
    }

    pub fn matcher(&self) -> &RouteMatcher {
        &self.matcher
    }
}

/// Result of a successful lookup.
#[derive(Debug)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    pub params: PathParams,
}

/// Ordered, first-match-wins request router.
#[derive(Clone)]
pub struct Router {
    routes: Vec<Route>,
    fallback: Handler,
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("matcher", &self.matcher)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes)
            .finish_non_exhaustive()
    }
}

impl Router {
    /// Compile a route table. Fails on the first malformed pattern.
    pub fn new(defs: &[RouteDef]) -> Result<Self, PatternError> {
        let routes = defs.iter().map(Route::compile).collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            routes,
            fallback: places::not_found,
        })
    }

    /// The router for the places service.
    pub fn places() -> Result<Self, PatternError> {
        Self::new(&PLACES_ROUTES)
    }

    /// Find the first route whose method and path match.
    pub fn match_route(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        self.routes.iter().find_map(|route| {
            route
                .matcher
                .matches(method, path)
                .map(|params| RouteMatch { route, params })
        })
    }

    /// Route a request and produce exactly one response.
    pub fn dispatch(&self, method: Method, path: &str, body: Option<Value>) -> (Option<&'static str>, ApiResponse) {
        let mut request = ApiRequest::new(method, path).with_body(body);

        match self.match_route(&request.method, path) {
            Some(RouteMatch { route, params }) => match decode_params(params) {
                Ok(params) => {
                    request.params = params;
                    (Some(route.name), (route.handler)(&request))
                }
                Err(e) => {
                    tracing::debug!(route = route.name, error = %e, "Rejected path parameters");
                    (Some(route.name), ApiError::from(e).into())
                }
            },
            None => (None, (self.fallback)(&request)),
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}
