//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path, parsed body)
//!     → router.rs (ordered route lookup)
//!     → matcher.rs (method + path pattern, bind params)
//!     → percent-decode params (400 on a bad escape)
//!     → matched handler, or fallback (404)
//!
//! Route Compilation (at startup):
//!     RouteDef[] (static table)
//!     → Compile path patterns into segments
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (segment comparison only)
//! - Deterministic: same input always matches same route
//! - First match wins (table order)

pub mod matcher;
pub mod router;

pub use matcher::{decode_params, ParamDecodeError, PathParams, PathPattern, PatternError, RouteMatcher};
pub use router::{Handler, Route, RouteDef, RouteMatch, Router, PLACES_ROUTES};
