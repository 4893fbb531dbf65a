//! Router core - route table, registration and the match loop.

use http::Method;
use regex::Regex;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

use super::normalize::{normalize_base_path, normalize_method, normalize_path};
use super::RouterError;
use crate::pattern::{compile, Matcher, TypeRegistry};

/// Maximum number of path parameters before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Extracted parameters as `(name, value)` pairs in declaration order.
///
/// Names are shared with the compiled route, so cloning one is a refcount bump.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// A route declaration before registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDef<H> {
    /// Pipe-separated methods (`GET|POST`) or a regex alternation
    pub method: String,
    pub pattern: String,
    pub handler: H,
    pub name: Option<String>,
}

impl<H> RouteDef<H> {
    pub fn new(method: impl Into<String>, pattern: impl Into<String>, handler: H) -> Self {
        Self {
            method: method.into(),
            pattern: pattern.into(),
            handler,
            name: None,
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A registered route
#[derive(Debug, Clone)]
pub struct Route<H> {
    method_spec: String,
    methods: Regex,
    pattern: String,
    handler: H,
    name: Option<String>,
    matcher: Matcher,
}

impl<H> Route<H> {
    #[must_use]
    pub fn method_spec(&self) -> &str {
        &self.method_spec
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn handler(&self) -> &H {
        &self.handler
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Whether an already-normalized (upper-case) method is accepted
    #[must_use]
    pub fn accepts_method(&self, method: &str) -> bool {
        self.methods.is_match(method)
    }
}

/// Result of successfully matching a request to a route
#[derive(Debug, Clone)]
pub struct RouteMatch<'r, H> {
    pub handler: &'r H,
    /// Named captures in declaration order; anonymous groups are excluded
    pub params: ParamVec,
    pub name: Option<&'r str>,
    /// The raw pattern of the matched route
    pub pattern: &'r str,
}

impl<H> RouteMatch<'_, H> {
    /// Get a parameter by name.
    ///
    /// Uses "last write wins" semantics when a name occurs more than once.
    #[inline]
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Convert params to a `HashMap`
    /// Note: This allocates - use `param()` in hot paths instead
    #[must_use]
    pub fn params_map(&self) -> HashMap<String, String> {
        self.params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[must_use]
    pub fn into_params(self) -> ParamVec {
        self.params
    }
}

/// First-match router over an ordered route table.
///
/// Registration order is match priority: the first route whose method spec
/// and pattern both accept a request wins, regardless of how specific later
/// routes are.
///
/// The table is mutated through `&mut self` and matched through `&self`;
/// share it behind an `Arc<RwLock<_>>` if routes are added while serving.
#[derive(Debug, Clone)]
pub struct Router<H> {
    routes: Vec<Route<H>>,
    /// Route name → raw pattern
    named: HashMap<String, String>,
    base_path: String,
    types: TypeRegistry,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self {
            routes: Vec::new(),
            named: HashMap::new(),
            base_path: String::new(),
            types: TypeRegistry::new(),
        }
    }
}

impl<H> Router<H> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route at the end of the table.
    ///
    /// The pattern is compiled immediately so authoring errors surface here
    /// rather than as silent non-matches.
    ///
    /// # Errors
    ///
    /// - [`RouterError::DuplicateRouteName`] if `name` is already taken
    /// - [`RouterError::InvalidMethod`] if the method spec is not a valid alternation
    /// - [`RouterError::Pattern`] if the pattern is malformed
    ///
    /// On error the table is left unchanged.
    pub fn register_route(
        &mut self,
        method_spec: &str,
        pattern: &str,
        handler: H,
        name: Option<&str>,
    ) -> Result<(), RouterError> {
        if let Some(name) = name {
            if self.named.contains_key(name) {
                warn!(
                    route_name = %name,
                    pattern = %pattern,
                    existing_pattern = ?self.named.get(name),
                    "Rejected duplicate route name"
                );
                return Err(RouterError::DuplicateRouteName(name.to_owned()));
            }
        }

        let methods = compile_methods(method_spec)?;
        let matcher = compile(pattern, &self.types).map_err(|source| RouterError::Pattern {
            pattern: pattern.to_owned(),
            source,
        })?;

        debug!(
            method = %method_spec,
            pattern = %pattern,
            route_name = ?name,
            matcher = matcher.kind(),
            priority = self.routes.len(),
            "Route registered"
        );

        if let Some(name) = name {
            self.named.insert(name.to_owned(), pattern.to_owned());
        }
        self.routes.push(Route {
            method_spec: method_spec.to_owned(),
            methods,
            pattern: pattern.to_owned(),
            handler,
            name: name.map(str::to_owned),
            matcher,
        });
        Ok(())
    }

    /// Register several routes in order.
    ///
    /// # Errors
    ///
    /// Stops at the first failing route and returns its error; routes before
    /// it stay registered.
    pub fn add_routes<I>(&mut self, routes: I) -> Result<(), RouterError>
    where
        I: IntoIterator<Item = RouteDef<H>>,
    {
        for def in routes {
            self.register_route(&def.method, &def.pattern, def.handler, def.name.as_deref())?;
        }
        Ok(())
    }

    /// Set the prefix stripped from inbound paths and prepended to generated ones
    pub fn set_base_path(&mut self, base_path: &str) {
        self.base_path = normalize_base_path(base_path);
        debug!(base_path = %self.base_path, "Base path set");
    }

    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Merge caller type tags over the registry.
    ///
    /// Every registered route is recompiled against the merged registry.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::Pattern`] for the first route that no longer
    /// compiles; the registry and the table are then left unchanged.
    pub fn add_match_types<I, K, V>(&mut self, types: I) -> Result<(), RouterError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut merged = self.types.clone();
        merged.extend(types);

        let matchers = self
            .routes
            .iter()
            .map(|route| {
                compile(&route.pattern, &merged).map_err(|source| RouterError::Pattern {
                    pattern: route.pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (route, matcher) in self.routes.iter_mut().zip(matchers) {
            route.matcher = matcher;
        }
        self.types = merged;
        debug!(type_count = self.types.len(), "Match types updated");
        Ok(())
    }

    #[must_use]
    pub fn match_types(&self) -> &TypeRegistry {
        &self.types
    }

    /// Match a request against the table.
    ///
    /// `method` is case-insensitive; an empty method means `GET`. `path` is
    /// normalized first (query stripped, percent-decoded, base path removed).
    ///
    /// Returns `None` when no route accepts the request.
    #[must_use]
    pub fn match_request(&self, method: &str, path: &str) -> Option<RouteMatch<'_, H>> {
        let method = normalize_method(method);
        let path = normalize_path(path, &self.base_path);

        debug!(
            method = %method,
            path = %path,
            routes_count = self.routes.len(),
            "Route match attempt"
        );

        if self.routes.is_empty() {
            warn!(method = %method, path = %path, "Match attempted against an empty route table");
            return None;
        }

        let match_start = Instant::now();

        for (priority, route) in self.routes.iter().enumerate() {
            if !route.accepts_method(&method) {
                trace!(priority, method_spec = %route.method_spec, "Method rejected");
                continue;
            }

            if let Some(params) = route.matcher.captures(&path) {
                let match_duration = match_start.elapsed();
                if match_duration > Duration::from_millis(1) {
                    warn!(
                        method = %method,
                        path = %path,
                        route_pattern = %route.pattern,
                        priority,
                        duration_us = match_duration.as_micros(),
                        "Slow route matching detected"
                    );
                } else {
                    debug!(
                        method = %method,
                        path = %path,
                        route_pattern = %route.pattern,
                        route_name = ?route.name,
                        priority,
                        path_params = ?params,
                        duration_us = match_duration.as_micros(),
                        "Route matched"
                    );
                }

                return Some(RouteMatch {
                    handler: &route.handler,
                    params,
                    name: route.name.as_deref(),
                    pattern: &route.pattern,
                });
            }
        }

        debug!(
            method = %method,
            path = %path,
            duration_us = match_start.elapsed().as_micros(),
            "No route matched"
        );
        None
    }

    /// [`match_request`](Self::match_request) taking an [`http::Method`]
    #[must_use]
    pub fn route(&self, method: &Method, path: &str) -> Option<RouteMatch<'_, H>> {
        self.match_request(method.as_str(), path)
    }

    /// Raw pattern registered under `name`
    #[must_use]
    pub fn named_pattern(&self, name: &str) -> Option<&str> {
        self.named.get(name).map(String::as_str)
    }

    pub(super) fn named_route(&self, name: &str) -> Option<&Route<H>> {
        self.routes.iter().find(|r| r.name.as_deref() == Some(name))
    }

    /// Routes in priority order
    pub fn routes(&self) -> impl Iterator<Item = &Route<H>> {
        self.routes.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<H: std::fmt::Display> Router<H> {
    /// Printable listing of the table in priority order
    #[must_use]
    pub fn dump_routes(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "[routes] base_path={} count={}",
            self.base_path,
            self.routes.len()
        );
        for route in &self.routes {
            let _ = writeln!(
                out,
                "[route] {} {}{} -> {}{}",
                route.method_spec,
                self.base_path,
                route.pattern,
                route.handler,
                route
                    .name
                    .as_deref()
                    .map(|n| format!(" ({n})"))
                    .unwrap_or_default()
            );
        }
        out
    }
}

/// Compile a method spec into a case-insensitive anchored alternation
fn compile_methods(spec: &str) -> Result<Regex, RouterError> {
    Regex::new(&format!("(?i)^(?:{spec})$")).map_err(|source| RouterError::InvalidMethod {
        spec: spec.to_owned(),
        source,
    })
}
