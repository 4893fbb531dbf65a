//! # CLI Module
//!
//! Command-line access to a route table file, mainly for checking route
//! tables while authoring them.
//!
//! ## Commands
//!
//! ```bash
//! # Compile every pattern and report the route count
//! bracket-router --routes demos/routes.yaml check
//!
//! # Print the table in priority order
//! bracket-router --routes demos/routes.yaml list
//!
//! # Match a request; prints JSON, exits 1 when nothing matches
//! bracket-router --routes demos/routes.yaml match /users/42 --method get
//!
//! # Generate a URL from a named route
//! bracket-router --routes demos/routes.yaml generate user --param id=42
//! ```
//!
//! `--routes` and `--base-path` can also be given through `BRKT_ROUTES` and
//! `BRKT_BASE_PATH`.

mod commands;


pub use commands::{execute, run_cli, Cli, Commands, Outcome};
