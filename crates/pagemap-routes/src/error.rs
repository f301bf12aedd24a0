//! Route configuration errors.
//!
//! Every variant is fatal: a route table that fails to resolve must stop the
//! application from starting.

/// Error raised while resolving route declarations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A raw path is empty or does not begin with `/`.
    #[error("Path not valid, must begin with `/`: {path:?}")]
    InvalidPath {
        /// The offending raw path.
        path: String,
    },
    /// Flattening or expansion was invoked on an empty list.
    #[error("declaration list must not be empty")]
    EmptyDeclarationList,
    /// A declaration does not have the expected shape.
    #[error("Malformed declaration at {location}: {reason}")]
    MalformedDeclaration {
        /// Location within the declaration file (e.g. `declarations[1].children[0]`).
        location: String,
        /// What is wrong with it.
        reason: String,
    },
    /// More than one top-level declaration is marked as the default route.
    #[error("Only one route may be marked default, found `{first}` and `{second}`")]
    DuplicateDefault {
        /// Name of the first default route.
        first: String,
        /// Name of the second default route.
        second: String,
    },
    /// The declaration marked as default cannot serve as the home route.
    #[error("Route `{name}` cannot be the default route: {reason}")]
    InvalidDefault {
        /// Name of the marked route.
        name: String,
        /// Why it cannot be home.
        reason: String,
    },
    /// The declaration file is not valid YAML.
    #[error("Declaration parse error: {0}")]
    Parse(String),
}

impl ConfigError {
    pub(crate) fn invalid_path(path: &str) -> Self {
        Self::InvalidPath {
            path: path.to_owned(),
        }
    }

    pub(crate) fn malformed(location: &str, reason: impl Into<String>) -> Self {
        Self::MalformedDeclaration {
            location: location.to_owned(),
            reason: reason.into(),
        }
    }
}
