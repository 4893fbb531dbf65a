//! # Pattern Module
//!
//! Route patterns are plain paths with bracketed placeholders:
//!
//! ```text
//! /users/[i:id]                 required integer segment named `id`
//! /products/[i:categoryId]?     optional, elided together with its leading `/`
//! /files/[**:path]              multi-segment tail
//! /report.[:format]?            optional extension, elided with its leading `.`
//! @^/legacy/(?P<slug>.+)\.php   raw regex body, no placeholder expansion
//! *                             matches any path
//! ```
//!
//! ## Grammar
//!
//! ```text
//! placeholder   := [literalPrefix] "[" [typeTag] [":" paramName] "]" ["?"]
//! literalPrefix := "/" | "."
//! typeTag       := any run of characters excluding ":" and "]"
//! paramName     := any run of characters excluding "]"
//! ```
//!
//! A placeholder without a `:` is a default-typed placeholder whose name is
//! the whole inner text, so `[slug]` is the same as `[:slug]`. An empty name
//! (`[i:]`) is matched but never reported.
//!
//! ## Pipeline
//!
//! [`scan`] turns a pattern into a flat list of [`Segment`]s in one pass.
//! The compiler ([`compile`]) and the URL generator both walk that list, so the
//! two directions cannot disagree about where a placeholder starts or ends.
//! Type tags are resolved through a [`TypeRegistry`].

mod compiler;
mod error;
pub mod types;

#[cfg(test)]
mod tests;

pub use compiler::{compile, Expression, Matcher};
pub use error::PatternError;
pub use types::{Resolved, TypeRegistry, BUILT_IN_TYPES};

/// One piece of a scanned route pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal text, matched byte-for-byte
    Literal(&'a str),
    /// A bracketed placeholder, including its literal prefix and `?` marker
    Placeholder(Placeholder<'a>),
}

/// A placeholder token as it appears in the raw pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// Full token text: prefix, brackets and trailing `?`
    pub full: &'a str,
    /// `""`, `"/"` or `"."`
    pub prefix: &'a str,
    pub type_tag: &'a str,
    pub name: &'a str,
    pub optional: bool,
    /// Byte offset of `full` within the pattern
    pub offset: usize,
}

impl Placeholder<'_> {
    /// Byte offset of the opening `[`
    #[must_use]
    pub fn bracket_offset(&self) -> usize {
        self.offset + self.prefix.len()
    }

    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }
}

/// Whether a pattern contains any placeholder delimiter
#[inline]
#[must_use]
pub fn has_placeholders(pattern: &str) -> bool {
    pattern.contains('[')
}

/// Split a route pattern into literal and placeholder segments.
///
/// A `/` or `.` directly before `[` belongs to the placeholder rather than
/// the preceding literal, so an optional placeholder can be elided together
/// with it. A character already consumed by an earlier placeholder is never
/// taken as a prefix.
///
/// # Errors
///
/// - [`PatternError::Unclosed`] for a `[` without a matching `]`
/// - [`PatternError::Nested`] for a `[` inside an open placeholder
/// - [`PatternError::Empty`] for `[]`
pub fn scan(pattern: &str) -> Result<Vec<Segment<'_>>, PatternError> {
    let bytes = pattern.as_bytes();
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'[' {
            i += 1;
            continue;
        }

        let open = i;
        let close = find_close(pattern, open)?;
        let inner = &pattern[open + 1..close];
        if inner.is_empty() {
            return Err(PatternError::Empty { position: open });
        }

        let (type_tag, name) = inner.split_once(':').unwrap_or(("", inner));

        let start = if open > literal_start && matches!(bytes[open - 1], b'/' | b'.') {
            open - 1
        } else {
            open
        };
        let optional = bytes.get(close + 1) == Some(&b'?');
        let end = if optional { close + 2 } else { close + 1 };

        if start > literal_start {
            segments.push(Segment::Literal(&pattern[literal_start..start]));
        }
        segments.push(Segment::Placeholder(Placeholder {
            full: &pattern[start..end],
            prefix: &pattern[start..open],
            type_tag,
            name,
            optional,
            offset: start,
        }));

        literal_start = end;
        i = end;
    }

    if literal_start < bytes.len() {
        segments.push(Segment::Literal(&pattern[literal_start..]));
    }

    Ok(segments)
}

fn find_close(pattern: &str, open: usize) -> Result<usize, PatternError> {
    for (i, b) in pattern.bytes().enumerate().skip(open + 1) {
        match b {
            b']' => return Ok(i),
            b'[' => return Err(PatternError::Nested { position: open }),
            _ => {}
        }
    }
    Err(PatternError::Unclosed { position: open })
}
