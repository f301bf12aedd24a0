//! Declaration normalization.
//!
//! Converts [`RawDeclaration`]s into uniform [`Node`]s. Normalization validates
//! the raw path (if any) and collapses empty child lists to `None`, so a node's
//! `children` is either absent or non-empty.
//!
//! Normalizing a [`Node`] again is a no-op, which is what lets declarations be
//! assembled from subtrees that were normalized ahead of their parents.

use serde::Serialize;

use crate::ConfigError;
use crate::declaration::{Child, PathMeta, RawDeclaration, RouteMeta};
use crate::path::normalize_path;

/// Normalized route declaration.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Node<T> {
    /// What renders this route.
    pub target: T,
    /// Route metadata.
    pub route: RouteMeta,
    /// Path metadata, still holding the raw segment.
    pub path: PathMeta,
    /// Normalized children. Never `Some` of an empty list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Node<T>>>,
}

impl<T> Node<T> {
    /// Raw path segment, if the node is routable.
    #[must_use]
    pub fn raw_path(&self) -> Option<&str> {
        self.path.path.as_deref()
    }

    /// Child nodes (empty slice for leaves).
    #[must_use]
    pub fn children(&self) -> &[Node<T>] {
        self.children.as_deref().unwrap_or_default()
    }
}

/// Conversion into a normalized [`Node`].
pub trait Normalize<T> {
    /// Normalize into a [`Node`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPath`] if this node or any descendant
    /// carries a path that does not begin with `/`.
    fn normalize(self) -> Result<Node<T>, ConfigError>;
}

impl<T> Normalize<T> for RawDeclaration<T> {
    fn normalize(self) -> Result<Node<T>, ConfigError> {
        let children = self
            .children
            .into_iter()
            .map(Normalize::normalize)
            .collect::<Result<Vec<_>, _>>()?;
        build_node(self.target, self.route, self.path, children)
    }
}

impl<T> Normalize<T> for Node<T> {
    fn normalize(self) -> Result<Node<T>, ConfigError> {
        let children = self
            .children
            .unwrap_or_default()
            .into_iter()
            .map(Normalize::normalize)
            .collect::<Result<Vec<_>, _>>()?;
        build_node(self.target, self.route, self.path, children)
    }
}

impl<T> Normalize<T> for Child<T> {
    fn normalize(self) -> Result<Node<T>, ConfigError> {
        match self {
            Child::Raw(decl) => decl.normalize(),
            Child::Node(node) => node.normalize(),
        }
    }
}

fn build_node<T>(
    target: T,
    route: RouteMeta,
    path: PathMeta,
    children: Vec<Node<T>>,
) -> Result<Node<T>, ConfigError> {
    if let Some(raw) = path.path.as_deref() {
        normalize_path(raw)?;
    }

    Ok(Node {
        target,
        route,
        path,
        children: (!children.is_empty()).then_some(children),
    })
}

/// Normalize every declaration in order.
///
/// # Errors
///
/// Returns the first [`ConfigError`] raised by any declaration.
pub fn normalize_all<T, D, I>(decls: I) -> Result<Vec<Node<T>>, ConfigError>
where
    D: Normalize<T>,
    I: IntoIterator<Item = D>,
{
    let nodes = decls
        .into_iter()
        .map(Normalize::normalize)
        .collect::<Result<Vec<_>, _>>()?;
    tracing::trace!(count = nodes.len(), "Normalized declarations");
    Ok(nodes)
}
