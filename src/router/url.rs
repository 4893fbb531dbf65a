//! Reverse routing - build a concrete path from a named route.

use std::collections::HashMap;
use tracing::debug;

use super::{Router, RouterError};
use crate::pattern::{scan, PatternError, Segment};

impl<H> Router<H> {
    /// Generate the path for a named route.
    ///
    /// Each placeholder is replaced by its supplied value, keeping its literal
    /// prefix. A missing optional placeholder is removed together with its
    /// prefix; a missing required placeholder leaves only its prefix behind.
    /// Values are inserted as-is; encoding them is the caller's job.
    ///
    /// ```
    /// use bracket_router::router::Router;
    ///
    /// let mut router = Router::new();
    /// router
    ///     .register_route("GET", "/products/[i:categoryId]?", "products", Some("products"))
    ///     .unwrap();
    ///
    /// assert_eq!(router.generate("products", [("categoryId", 5)]).unwrap(), "/products/5");
    /// assert_eq!(router.generate("products", Vec::<(&str, &str)>::new()).unwrap(), "/products");
    /// ```
    ///
    /// # Errors
    ///
    /// - [`RouterError::UnknownRoute`] if no route has this name
    /// - [`RouterError::NotReversible`] for `*` and `@` routes
    pub fn generate<I, K, V>(&self, name: &str, params: I) -> Result<String, RouterError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        let route = self
            .named_route(name)
            .ok_or_else(|| RouterError::UnknownRoute(name.to_owned()))?;

        if !route.matcher().is_reversible() {
            return Err(RouterError::NotReversible(name.to_owned()));
        }

        let params: HashMap<String, String> = params
            .into_iter()
            .map(|(k, v)| (k.into(), v.to_string()))
            .collect();

        let url = expand(self.base_path(), route.pattern(), &params).map_err(|source| {
            RouterError::Pattern {
                pattern: route.pattern().to_owned(),
                source,
            }
        })?;

        debug!(route_name = %name, url = %url, "URL generated");
        Ok(url)
    }
}

/// Substitute `params` into a raw pattern, prefixed with `base_path`
pub(crate) fn expand(
    base_path: &str,
    pattern: &str,
    params: &HashMap<String, String>,
) -> Result<String, PatternError> {
    let mut url = String::with_capacity(base_path.len() + pattern.len());
    url.push_str(base_path);

    for segment in scan(pattern)? {
        match segment {
            Segment::Literal(text) => url.push_str(text),
            Segment::Placeholder(ph) => {
                let value = if ph.is_anonymous() {
                    None
                } else {
                    params.get(ph.name)
                };
                match value {
                    Some(value) => {
                        url.push_str(ph.prefix);
                        url.push_str(value);
                    }
                    None if ph.optional => {}
                    None => url.push_str(ph.prefix),
                }
            }
        }
    }

    if url.is_empty() {
        url.push('/');
    }
    Ok(url)
}
