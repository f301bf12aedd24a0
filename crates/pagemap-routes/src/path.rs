//! Path normalization.
//!
//! Raw paths are single segments written by hand (`/`, `/home`, `/blog/`).
//! Normalized paths always start and end with `/`, never contain `//`, and
//! the root normalizes to exactly `/`.
//!
//! The dispatcher's "optional trailing slash" marker is kept separate from the
//! canonical path as a [`MatchSuffix`], so the canonical form stays usable for
//! sitemaps and literal lookups.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default match suffix: makes the trailing slash optional in the
/// dispatcher's pattern syntax.
pub const DEFAULT_MATCH_SUFFIX: &str = "?";

/// Normalize a raw path into its canonical form.
///
/// # Examples
///
/// ```
/// use pagemap_routes::normalize_path;
///
/// assert_eq!(normalize_path("/").unwrap(), "/");
/// assert_eq!(normalize_path("/home").unwrap(), "/home/");
/// assert_eq!(normalize_path("/docs//guide/").unwrap(), "/docs/guide/");
/// assert!(normalize_path("home").is_err());
/// ```
///
/// # Errors
///
/// Returns [`ConfigError::InvalidPath`] if `raw` is empty or does not begin
/// with `/`.
pub fn normalize_path(raw: &str) -> Result<String, ConfigError> {
    if !raw.starts_with('/') {
        return Err(ConfigError::invalid_path(raw));
    }

    let mut normalized = String::with_capacity(raw.len() + 1);
    normalized.push('/');
    for segment in raw.split('/').filter(|s| !s.is_empty()) {
        normalized.push_str(segment);
        normalized.push('/');
    }
    Ok(normalized)
}

/// Join a raw path under a parent path.
///
/// Both sides are normalized first, so the parent does not need a trailing
/// slash: `join_path("/blog", "/post")` is `/blog/post/`.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidPath`] if either `parent` or `raw` is not a
/// valid raw path.
pub fn join_path(parent: &str, raw: &str) -> Result<String, ConfigError> {
    let parent = normalize_path(parent)?;
    let child = normalize_path(raw)?;
    Ok(format!("{parent}{}", &child[1..]))
}

/// Suffix appended to resolved paths to form dispatcher patterns.
///
/// The default (`?`) marks the trailing slash as optional. An empty suffix
/// leaves patterns identical to canonical paths.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchSuffix(String);

impl MatchSuffix {
    /// Create a match suffix.
    #[must_use]
    pub fn new(suffix: impl Into<String>) -> Self {
        Self(suffix.into())
    }

    /// Suffix that leaves patterns unchanged.
    #[must_use]
    pub fn none() -> Self {
        Self(String::new())
    }

    /// Raw suffix string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build the dispatcher pattern for a canonical path.
    #[must_use]
    pub fn apply(&self, path: &str) -> String {
        format!("{path}{}", self.0)
    }
}

impl Default for MatchSuffix {
    fn default() -> Self {
        Self(DEFAULT_MATCH_SUFFIX.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_normalizes_to_slash() {
        assert_eq!(normalize_path("/").unwrap(), "/");
        assert_eq!(normalize_path("//").unwrap(), "/");
    }

    #[test]
    fn test_segment_gets_trailing_slash() {
        assert_eq!(normalize_path("/home").unwrap(), "/home/");
        assert_eq!(normalize_path("/home/").unwrap(), "/home/");
    }

    #[test]
    fn test_duplicate_slashes_collapse() {
        assert_eq!(normalize_path("//a///b//").unwrap(), "/a/b/");
    }

    #[test]
    fn test_missing_leading_slash_rejected() {
        let err = normalize_path("home").unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidPath {
                path: "home".to_owned()
            }
        );
        assert!(err.to_string().contains("must begin with `/`"));
    }

    #[test]
    fn test_empty_path_rejected() {
        assert!(matches!(
            normalize_path(""),
            Err(ConfigError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_normalized_paths_are_well_formed() {
        for raw in ["/", "/a", "/a/", "//a", "/a//b", "/a/b/c///", "/x-y_z"] {
            let path = normalize_path(raw).unwrap();
            assert!(path.starts_with('/'), "{path}");
            assert!(path.ends_with('/'), "{path}");
            assert!(!path.contains("//"), "{path}");
        }
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_path("/blog//posts").unwrap();
        assert_eq!(normalize_path(&once).unwrap(), once);
    }

    #[test]
    fn test_join_under_root() {
        assert_eq!(join_path("/", "/home").unwrap(), "/home/");
    }

    #[test]
    fn test_join_under_parent() {
        assert_eq!(join_path("/blog/", "/posts").unwrap(), "/blog/posts/");
        assert_eq!(join_path("/blog/", "/").unwrap(), "/blog/");
    }

    #[test]
    fn test_join_rejects_invalid_child() {
        assert!(join_path("/blog/", "posts").is_err());
    }

    #[test]
    fn test_join_normalizes_parent() {
        assert_eq!(join_path("/blog", "/post").unwrap(), "/blog/post/");
        assert_eq!(join_path("//blog//", "/post").unwrap(), "/blog/post/");
    }

    #[test]
    fn test_join_rejects_invalid_parent() {
        assert!(matches!(
            join_path("blog", "/post"),
            Err(ConfigError::InvalidPath { path }) if path == "blog"
        ));
    }

    #[test]
    fn test_match_suffix_default() {
        let suffix = MatchSuffix::default();
        assert_eq!(suffix.as_str(), "?");
        assert_eq!(suffix.apply("/home/"), "/home/?");
    }

    #[test]
    fn test_match_suffix_none() {
        assert_eq!(MatchSuffix::none().apply("/home/"), "/home/");
    }
}
