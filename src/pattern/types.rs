//! Placeholder type tags.
//!
//! A type tag selects the regex fragment a placeholder expands to. Tags the
//! registry does not know are used as inline regex fragments, so
//! `[en|fr:lang]` works without registering anything. [`TypeRegistry::resolve`]
//! reports which of the two happened.

use std::collections::HashMap;

/// Tags every registry starts with.
///
/// The default (empty) tag stops at both `/` and `.` so `/report.[:format]`
/// splits `report.pdf` at the dot.
pub const BUILT_IN_TYPES: [(&str, &str); 6] = [
    ("i", "[0-9]+"),
    ("a", "[0-9A-Za-z]+"),
    ("h", "[0-9A-Fa-f]+"),
    ("*", "[^/]+"),
    ("**", ".+"),
    ("", "[^/.]+"),
];

/// Outcome of resolving a type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'a> {
    /// The tag is registered; this is its fragment
    Registered(&'a str),
    /// Unknown tag, used verbatim as a regex fragment
    Inline(&'a str),
}

impl<'a> Resolved<'a> {
    #[must_use]
    pub fn fragment(self) -> &'a str {
        match self {
            Resolved::Registered(f) | Resolved::Inline(f) => f,
        }
    }

    #[must_use]
    pub fn is_inline(self) -> bool {
        matches!(self, Resolved::Inline(_))
    }
}

/// Mapping from type tag to regex fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRegistry {
    types: HashMap<String, String>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self {
            types: BUILT_IN_TYPES
                .iter()
                .map(|(tag, fragment)| ((*tag).to_owned(), (*fragment).to_owned()))
                .collect(),
        }
    }
}

impl TypeRegistry {
    /// Registry seeded with [`BUILT_IN_TYPES`]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn resolve<'a>(&'a self, tag: &'a str) -> Resolved<'a> {
        match self.types.get(tag) {
            Some(fragment) => Resolved::Registered(fragment),
            None => Resolved::Inline(tag),
        }
    }

    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&str> {
        self.types.get(tag).map(String::as_str)
    }

    /// Merge caller tags over the registry; later entries win on collision.
    pub fn extend<I, K, V>(&mut self, types: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (tag, fragment) in types {
            self.types.insert(tag.into(), fragment.into());
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
