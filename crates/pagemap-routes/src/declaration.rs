//! Raw route declarations.
//!
//! A declaration pairs a render target with route metadata, path metadata and
//! optional child declarations. Declarations are authored by hand, either in
//! code through the builder methods on [`RawDeclaration`] or in a declaration
//! file (see [`parse_declarations`](crate::parse_declarations)).
//!
//! Children may be raw declarations or subtrees that were already normalized
//! into [`Node`]s; [`Child`] keeps the two apart so normalization never has to
//! guess which one it is looking at.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::node::Node;

/// Name of the page component that renders a route.
///
/// The resolver never interprets it; it is carried through to the route tree
/// and path listings.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderTarget(String);

impl RenderTarget {
    /// Create a render target from a component name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Component name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RenderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RenderTarget {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for RenderTarget {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Route metadata used by the dispatcher.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteMeta {
    /// Route identifier.
    pub name: String,
    /// Declared ordering key. Siblings with a key sort before siblings without.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    /// Marks the home route explicitly instead of relying on declaration order.
    #[serde(default, skip_serializing_if = "is_false")]
    pub default: bool,
    /// Any other metadata, carried through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

impl RouteMeta {
    /// Route metadata with just a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Path metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathMeta {
    /// Raw path segment. `None` marks a node that is not routable by path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl PathMeta {
    /// Path metadata for a raw path segment.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }
}

/// A child of a declaration: either still raw or already normalized.
#[derive(Clone, Debug, PartialEq)]
pub enum Child<T> {
    /// Declaration that still needs normalizing.
    Raw(RawDeclaration<T>),
    /// Subtree normalized ahead of its parent.
    Node(Node<T>),
}

impl<T> From<RawDeclaration<T>> for Child<T> {
    fn from(decl: RawDeclaration<T>) -> Self {
        Self::Raw(decl)
    }
}

impl<T> From<Node<T>> for Child<T> {
    fn from(node: Node<T>) -> Self {
        Self::Node(node)
    }
}

/// Author-written route declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct RawDeclaration<T> {
    /// What renders this route.
    pub target: T,
    /// Route metadata.
    pub route: RouteMeta,
    /// Path metadata.
    pub path: PathMeta,
    /// Nested declarations, in declared order.
    pub children: Vec<Child<T>>,
}

impl<T> RawDeclaration<T> {
    /// Declare a route rendered by `target` at the raw path `path`.
    #[must_use]
    pub fn new(target: T, name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::from_parts(target, RouteMeta::named(name), PathMeta::new(path))
    }

    /// Declare a route without a path. It is dropped when paths are resolved.
    #[must_use]
    pub fn unrouted(target: T, name: impl Into<String>) -> Self {
        Self::from_parts(target, RouteMeta::named(name), PathMeta::default())
    }

    /// Declare a route from its metadata blocks.
    #[must_use]
    pub fn from_parts(target: T, route: RouteMeta, path: PathMeta) -> Self {
        Self {
            target,
            route,
            path,
            children: Vec::new(),
        }
    }

    /// Append a child declaration or pre-normalized subtree.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<Child<T>>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append several children.
    #[must_use]
    pub fn with_children<C, I>(mut self, children: I) -> Self
    where
        C: Into<Child<T>>,
        I: IntoIterator<Item = C>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Set the declared ordering key.
    #[must_use]
    pub fn with_order(mut self, order: i64) -> Self {
        self.route.order = Some(order);
        self
    }

    /// Mark this declaration as the home route.
    #[must_use]
    pub fn as_default(mut self) -> Self {
        self.route.default = true;
        self
    }
}
