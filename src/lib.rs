//! # bracket-router
//!
//! **bracket-router** is a first-match URL router built around a compact
//! placeholder syntax. Routes are declared as a method spec, a path pattern
//! and an opaque handler; the router finds the handler for a request and
//! extracts its parameters, and regenerates paths from named routes.
//!
//! ## Architecture
//!
//! - **[`pattern`]** - placeholder grammar, type registry and pattern compiler
//! - **[`router`]** - route table, matching, normalization and URL generation
//! - **[`config`]** - route table files (YAML/JSON)
//! - **[`logging`]** - `tracing` subscriber setup for binaries
//! - **[`cli`]** - the `bracket-router` command line
//!
//! ### Request Matching Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller as Transport
//!     participant Router
//!     participant Normalize as normalize
//!     participant Route as Route (in order)
//!     participant Matcher
//!
//!     Caller->>Router: match_request("GET", "/myapp/users/42?tab=1")
//!     Router->>Normalize: strip query, percent-decode,<br/>strip base path
//!     Normalize-->>Router: "/users/42"
//!     loop each route in registration order
//!         Router->>Route: method spec matches?
//!         alt method rejected
//!             Route-->>Router: next route
//!         end
//!         Router->>Matcher: captures("/users/42")
//!         alt prefix or expression rejects
//!             Matcher-->>Router: next route
//!         end
//!         Matcher-->>Router: [(id, "42")]
//!     end
//!     Router-->>Caller: Some(RouteMatch) or None
//! ```
//!
//! ## Pattern Syntax
//!
//! | Pattern                       | Meaning                                     |
//! |-------------------------------|---------------------------------------------|
//! | `/users/[i:id]`               | digits, captured as `id`                    |
//! | `/posts/[a:slug]`             | alphanumerics                               |
//! | `/colors/[h:rgb]`             | hex digits                                  |
//! | `/files/[*:name]`             | one path segment                            |
//! | `/static/[**:path]`           | the rest of the path                        |
//! | `/tags/[:tag]` or `/tags/[tag]` | one segment, stopping at `/` and `.`      |
//! | `/products/[i:categoryId]?`   | optional, elided with its leading `/`       |
//! | `/[en\|fr:lang]/home`         | unregistered tag used as a regex fragment   |
//! | `@/legacy/(?P<page>.+)\.php`  | raw regex body                              |
//! | `*`                           | any path                                    |
//!
//! ## Quick Start
//!
//! ```rust
//! use bracket_router::router::{RouteDef, Router};
//!
//! # fn main() -> Result<(), bracket_router::router::RouterError> {
//! let mut router = Router::new();
//! router.set_base_path("/myapp");
//! router.add_match_types([("slug", "[a-z0-9-]+")])?;
//! router.add_routes([
//!     RouteDef::new("GET", "/", "home").named("home"),
//!     RouteDef::new("GET", "/posts/[slug:slug]", "show_post").named("post"),
//!     RouteDef::new("GET|POST", "/products/[i:categoryId]?", "products").named("products"),
//! ])?;
//!
//! let m = router.match_request("GET", "/myapp/posts/hello-world").unwrap();
//! assert_eq!(*m.handler, "show_post");
//! assert_eq!(m.param("slug"), Some("hello-world"));
//!
//! assert_eq!(router.generate("products", [("categoryId", 5)])?, "/myapp/products/5");
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! Registration takes `&mut self`; matching and generation take `&self` and
//! do no I/O. Build the table first, or share it behind an
//! `Arc<RwLock<Router<_>>>` when routes change while serving.

pub mod cli;
pub mod config;
pub mod logging;
pub mod pattern;
pub mod router;

pub use config::{RouteEntry, RouteTableConfig};
pub use pattern::{PatternError, TypeRegistry};
pub use router::{ParamVec, Route, RouteDef, RouteMatch, Router, RouterError};
