//! Pattern compiler - turns a route pattern into a [`Matcher`].
//!
//! Placeholder patterns are built in a single pass over the scanned segments:
//! literal text is escaped, each placeholder becomes
//! `(?:prefix(?P<__bktN>fragment))` with one trailing `?` when optional, and
//! the whole expression is anchored with `^…$`. Capture groups get synthetic
//! names so placeholder names are not limited to regex group-name syntax;
//! `slots` maps each group back to the declared name.

use regex::Regex;
use std::sync::Arc;
use tracing::trace;

use super::{has_placeholders, scan, PatternError, Segment, TypeRegistry};
use crate::router::ParamVec;

const GROUP_PREFIX: &str = "__bkt";

/// A compiled anchored expression plus the mapping from its groups to
/// parameter names
#[derive(Debug, Clone)]
pub struct Expression {
    regex: Regex,
    /// `(parameter name, capture group index)` in declaration order
    slots: Vec<(Arc<str>, usize)>,
    /// Literal text every match must start with
    head: String,
}

impl Expression {
    /// The regex source, including anchors
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    #[must_use]
    pub fn head(&self) -> &str {
        &self.head
    }

    /// Parameter names in declaration order
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|(name, _)| name.as_ref())
    }

    fn captures(&self, path: &str) -> Option<ParamVec> {
        let caps = self.regex.captures(path)?;
        Some(
            self.slots
                .iter()
                .filter_map(|(name, idx)| {
                    caps.get(*idx)
                        .map(|m| (Arc::clone(name), m.as_str().to_owned()))
                })
                .collect(),
        )
    }
}

/// How a single route pattern is matched against a normalized path
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Pattern `*`
    CatchAll,
    /// Pattern without placeholders; byte equality
    Exact(String),
    /// Pattern prefixed with `@`; the body is used verbatim
    Raw(Expression),
    /// Pattern with one or more placeholders
    Placeholders(Expression),
}

impl Matcher {
    /// Match a normalized path, returning the extracted parameters.
    ///
    /// `Some` with no parameters is a match; `None` is no match.
    #[must_use]
    pub fn captures(&self, path: &str) -> Option<ParamVec> {
        match self {
            Matcher::CatchAll => Some(ParamVec::new()),
            Matcher::Exact(pattern) => (pattern == path).then(ParamVec::new),
            Matcher::Raw(expr) => expr.captures(path),
            Matcher::Placeholders(expr) => {
                // The anchored expression opens with `head`, so a path lacking
                // it cannot match; skip the regex entirely.
                if !path.starts_with(expr.head.as_str()) {
                    trace!(path = %path, head = %expr.head, "Prefilter rejected path");
                    return None;
                }
                // `/` is also tried as the empty path so a pattern made only of
                // optional groups (e.g. `/[:lang]?`) matches the root.
                expr.captures(path).or_else(|| {
                    if path == "/" {
                        expr.captures("")
                    } else {
                        None
                    }
                })
            }
        }
    }

    /// Short label used in logs and route listings
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Matcher::CatchAll => "catch_all",
            Matcher::Exact(_) => "exact",
            Matcher::Raw(_) => "raw",
            Matcher::Placeholders(_) => "placeholders",
        }
    }

    /// Whether a concrete URL can be generated from the pattern
    #[must_use]
    pub fn is_reversible(&self) -> bool {
        matches!(self, Matcher::Exact(_) | Matcher::Placeholders(_))
    }

    #[must_use]
    pub fn expression(&self) -> Option<&Expression> {
        match self {
            Matcher::Raw(expr) | Matcher::Placeholders(expr) => Some(expr),
            Matcher::CatchAll | Matcher::Exact(_) => None,
        }
    }
}

/// Compile a route pattern against a type registry.
///
/// # Errors
///
/// Returns a [`PatternError`] for malformed placeholder syntax, or when the
/// resulting expression (including any inline type tag or `@` body) is not a
/// valid regex.
pub fn compile(pattern: &str, types: &TypeRegistry) -> Result<Matcher, PatternError> {
    if pattern == "*" {
        return Ok(Matcher::CatchAll);
    }

    if let Some(body) = pattern.strip_prefix('@') {
        let regex = Regex::new(&format!("^(?:{body})$"))?;
        let slots = regex
            .capture_names()
            .enumerate()
            .filter_map(|(idx, name)| name.map(|n| (Arc::from(n), idx)))
            .collect();
        return Ok(Matcher::Raw(Expression {
            regex,
            slots,
            head: String::new(),
        }));
    }

    if !has_placeholders(pattern) {
        return Ok(Matcher::Exact(pattern.to_owned()));
    }

    let segments = scan(pattern)?;
    let regex = Regex::new(&expression_source(&segments, types))?;

    let names: Vec<&str> = segments
        .iter()
        .filter_map(|segment| match segment {
            Segment::Placeholder(ph) if !ph.is_anonymous() => Some(ph.name),
            _ => None,
        })
        .collect();

    let slots = regex
        .capture_names()
        .enumerate()
        .filter_map(|(idx, group)| {
            let ordinal: usize = group?.strip_prefix(GROUP_PREFIX)?.parse().ok()?;
            names.get(ordinal).map(|name| (Arc::from(*name), idx))
        })
        .collect();

    let head = match segments.first() {
        Some(Segment::Literal(text)) => (*text).to_owned(),
        _ => String::new(),
    };

    Ok(Matcher::Placeholders(Expression { regex, slots, head }))
}

/// Build the anchored regex source for a scanned pattern
pub(crate) fn expression_source(segments: &[Segment<'_>], types: &TypeRegistry) -> String {
    let mut out = String::from("^");
    let mut ordinal = 0usize;

    for segment in segments {
        match segment {
            Segment::Literal(text) => out.push_str(&regex::escape(text)),
            Segment::Placeholder(ph) => {
                let fragment = types.resolve(ph.type_tag).fragment();

                out.push_str("(?:");
                out.push_str(&regex::escape(ph.prefix));
                if ph.is_anonymous() {
                    out.push_str("(?:");
                } else {
                    out.push_str("(?P<");
                    out.push_str(GROUP_PREFIX);
                    out.push_str(&ordinal.to_string());
                    out.push('>');
                    ordinal += 1;
                }
                out.push_str(fragment);
                out.push_str("))");
                if ph.optional {
                    out.push('?');
                }
            }
        }
    }

    out.push('$');
    out
}
