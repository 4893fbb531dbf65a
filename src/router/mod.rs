//! # Router Module
//!
//! The router module holds the route table and answers two questions:
//! which route handles a request, and what URL a named route produces.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Registering routes in priority order and indexing named routes
//! - Matching incoming requests to the first accepting route
//! - Extracting path parameters in declaration order
//! - Generating concrete paths from named routes
//!
//! ## Matching
//!
//! For each route, in registration order:
//!
//! 1. **Method check**: the method spec (`GET|POST`) is matched as a
//!    case-insensitive anchored alternation.
//! 2. **Pattern check**, by pattern shape:
//!    - `*` matches anything
//!    - `@…` runs the raw regex body
//!    - a pattern without `[` is compared byte for byte
//!    - otherwise the literal text before the first placeholder is checked
//!      as a prefix, then the compiled expression runs
//!
//! The first route passing both checks wins. Exhausting the table returns
//! `None`.
//!
//! ## Example
//!
//! ```rust
//! use bracket_router::router::Router;
//!
//! let mut router = Router::new();
//! router.register_route("GET", "/users/[i:id]", "show_user", Some("user")).unwrap();
//! router.register_route("GET|POST", "*", "fallback", None).unwrap();
//!
//! let m = router.match_request("get", "/users/42").unwrap();
//! assert_eq!(*m.handler, "show_user");
//! assert_eq!(m.param("id"), Some("42"));
//!
//! let m = router.match_request("GET", "/users/abc").unwrap();
//! assert_eq!(*m.handler, "fallback");
//!
//! assert_eq!(router.generate("user", [("id", 42)]).unwrap(), "/users/42");
//! ```

mod core;
mod error;
mod normalize;
mod url;


pub use self::core::{ParamVec, Route, RouteDef, RouteMatch, Router, MAX_INLINE_PARAMS};
pub use error::RouterError;
pub use normalize::{normalize_base_path, normalize_method, normalize_path, DEFAULT_METHOD};
