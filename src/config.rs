//! # Route Table Files
//!
//! A route table can be declared in YAML or JSON (chosen by file extension)
//! and turned into a [`Router<String>`] whose handlers are the declared
//! handler names.
//!
//! ```yaml
//! base_path: /myapp
//! match_types:
//!   slug: "[a-z0-9-]+"
//! routes:
//!   - method: GET
//!     pattern: /users/[i:id]
//!     handler: show_user
//!     name: user
//!   - method: GET|POST
//!     pattern: "*"
//!     handler: not_found
//! ```
//!
//! Routes keep file order, which is also their match priority. Unknown keys
//! are rejected so a misspelt field fails the load instead of being ignored.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

use crate::router::{RouteDef, Router, RouterError, DEFAULT_METHOD};

fn default_method() -> String {
    DEFAULT_METHOD.to_owned()
}

/// A whole route table file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteTableConfig {
    #[serde(default)]
    pub base_path: Option<String>,
    /// Extra type tags merged over the built-ins
    #[serde(default)]
    pub match_types: BTreeMap<String, String>,
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

/// One route declaration in a table file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteEntry {
    #[serde(default = "default_method")]
    pub method: String,
    pub pattern: String,
    pub handler: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl From<RouteEntry> for RouteDef<String> {
    fn from(entry: RouteEntry) -> Self {
        RouteDef {
            method: entry.method,
            pattern: entry.pattern,
            handler: entry.handler,
            name: entry.name,
        }
    }
}

impl RouteTableConfig {
    /// Load a route table from a `.yaml`/`.yml` or `.json` file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read route table {}", path.display()))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config = if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
        .with_context(|| format!("failed to parse route table {}", path.display()))?;

        info!(
            path = %path.display(),
            routes_count = config.routes.len(),
            match_types = config.match_types.len(),
            base_path = ?config.base_path,
            "Route table loaded"
        );
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns an error if `content` is not a valid route table document.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// # Errors
    ///
    /// Returns an error if `content` is not a valid route table document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Build a router: base path, then match types, then routes in order.
    ///
    /// # Errors
    ///
    /// Returns the first [`RouterError`] raised while registering.
    pub fn into_router(self) -> Result<Router<String>, RouterError> {
        let mut router = Router::new();
        if let Some(base_path) = &self.base_path {
            router.set_base_path(base_path);
        }
        router.add_match_types(self.match_types)?;
        router.add_routes(self.routes.into_iter().map(RouteDef::from))?;
        Ok(router)
    }
}
