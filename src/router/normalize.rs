//! Request normalization applied before matching.

use std::borrow::Cow;

/// Method used when the caller passes an empty method
pub const DEFAULT_METHOD: &str = "GET";

/// Normalize an inbound request path.
///
/// In order:
/// 1. drop the query string and fragment
/// 2. percent-decode (invalid UTF-8 is decoded lossily)
/// 3. strip `base_path` when the path starts with it on a segment boundary
/// 4. collapse leading slashes to exactly one
///
/// ```
/// use bracket_router::router::normalize_path;
///
/// assert_eq!(normalize_path("/myapp/users/42?x=1", "/myapp"), "/users/42");
/// assert_eq!(normalize_path("//caf%C3%A9", ""), "/café");
/// assert_eq!(normalize_path("", ""), "/");
/// ```
#[must_use]
pub fn normalize_path(raw: &str, base_path: &str) -> String {
    let end = raw.find(|c| c == '?' || c == '#').unwrap_or(raw.len());
    let decoded = percent_decode(&raw[..end]);
    let stripped = strip_base(&decoded, base_path);

    let mut path = String::with_capacity(stripped.len() + 1);
    path.push('/');
    path.push_str(stripped.trim_start_matches('/'));
    path
}

/// Upper-case the method, defaulting to `GET`
#[must_use]
pub fn normalize_method(method: &str) -> Cow<'_, str> {
    let method = method.trim();
    if method.is_empty() {
        Cow::Borrowed(DEFAULT_METHOD)
    } else if method.bytes().any(|b| b.is_ascii_lowercase()) {
        Cow::Owned(method.to_ascii_uppercase())
    } else {
        Cow::Borrowed(method)
    }
}

/// Normalize a base path: one leading slash, no trailing slash, `""` for none.
#[must_use]
pub fn normalize_base_path(base_path: &str) -> String {
    let trimmed = base_path.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

fn percent_decode(path: &str) -> Cow<'_, str> {
    if !path.contains('%') {
        return Cow::Borrowed(path);
    }
    match urlencoding::decode(path) {
        Ok(decoded) => decoded,
        Err(_) => {
            let bytes = urlencoding::decode_binary(path.as_bytes());
            Cow::Owned(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}

fn strip_base<'p>(path: &'p str, base_path: &str) -> &'p str {
    if base_path.is_empty() {
        return path;
    }
    match path.strip_prefix(base_path) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => path,
    }
}
