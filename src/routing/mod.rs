//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Navigation request (path from address bar or push)
//!     → router.rs (first-match scan of the route table)
//!     → matcher.rs (literal / catch-all evaluation)
//!     → Return: Render(page), Redirect(path) or NoRouteMatched
//!
//! Route Compilation (at startup):
//!     RouteConfig[]
//!     → pattern.rs (parse patterns)
//!     → table.rs (ordered RouteTable)
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex: literal compare and prefix split only
//! - Deterministic: same input always matches same rule
//! - First match wins (declaration order)

pub mod matcher;
pub mod pattern;
pub mod router;
pub mod table;

use thiserror::Error;

pub use matcher::{literal_key, MatchOptions, ParamValue, Params};
pub use pattern::RoutePattern;
pub use router::{Navigation, NavigationRequest, Resolution, RouteMatch, Router};
pub use table::{RouteRule, RouteTable, RouteTarget};

/// Errors raised while building or consulting the route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// No rule matched. The table is missing its catch-all.
    #[error("no route matched path {path:?}")]
    NoRouteMatched { path: String },

    /// Redirect chain exceeded the hop limit or revisited a path.
    #[error("redirect loop while resolving {path:?} after {hops} hop(s)")]
    RedirectLoop { path: String, hops: usize },

    /// Pattern could not be parsed.
    #[error("invalid route pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}
