use thiserror::Error;

/// Authoring errors in a route pattern.
///
/// Positions are byte offsets into the raw pattern string, pointing at the
/// opening `[` of the offending placeholder.
#[derive(Debug, Error)]
pub enum PatternError {
    /// A `[` with no closing `]`
    #[error("unterminated placeholder starting at byte {position}")]
    Unclosed { position: usize },

    /// `[]` or `[]?`
    #[error("empty placeholder at byte {position}")]
    Empty { position: usize },

    /// A `[` inside an open placeholder
    #[error("nested `[` inside placeholder starting at byte {position}")]
    Nested { position: usize },

    /// The assembled expression (or an inline type tag, or an `@` body) is not a valid regex
    #[error("invalid matching expression: {0}")]
    Regex(#[from] regex::Error),
}
