use thiserror::Error;

use crate::pattern::PatternError;

/// Errors raised while building a route table or generating URLs.
///
/// Matching itself never fails; an unmatched request is `None`.
#[derive(Debug, Error)]
pub enum RouterError {
    /// A route with this name is already registered
    #[error("route name `{0}` is already registered")]
    DuplicateRouteName(String),

    /// No route is registered under this name
    #[error("no route named `{0}`")]
    UnknownRoute(String),

    /// The named route is a catch-all or raw regex route
    #[error("route `{0}` has no generatable pattern")]
    NotReversible(String),

    /// The method spec is not a valid alternation
    #[error("invalid method spec `{spec}`: {source}")]
    InvalidMethod {
        spec: String,
        #[source]
        source: regex::Error,
    },

    /// The route pattern failed to compile
    #[error("invalid route pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: PatternError,
    },
}
