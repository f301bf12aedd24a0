//! Path flattening.
//!
//! Resolves every node's absolute path by composing it under its parent's
//! resolved path, keeping the nested shape of the tree. Nodes without a path
//! are not routable and are dropped along with their subtree.
//!
//! Siblings are emitted in declared order, except that siblings carrying a
//! declared `order` key are sorted by it (stably) ahead of those that don't.

use serde::Serialize;

use crate::ConfigError;
use crate::declaration::RouteMeta;
use crate::node::Node;
use crate::path::{MatchSuffix, join_path};

/// Node with its absolute path resolved.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResolvedNode<T> {
    /// What renders this route.
    pub target: T,
    /// Route metadata.
    pub route: RouteMeta,
    /// Absolute canonical path (`/`, `/blog/`, `/blog/post/`).
    pub path: String,
    /// Dispatcher pattern: `path` plus the match suffix.
    pub pattern: String,
    /// Resolved children. Never `Some` of an empty list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ResolvedNode<T>>>,
}

impl<T> ResolvedNode<T> {
    /// Route name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.route.name
    }

    /// Child nodes (empty slice for leaves).
    #[must_use]
    pub fn children(&self) -> &[ResolvedNode<T>] {
        self.children.as_deref().unwrap_or_default()
    }
}

/// Resolve absolute paths for a list of normalized nodes.
///
/// Top-level paths are resolved under `/`; children under their parent.
///
/// # Errors
///
/// Returns [`ConfigError::EmptyDeclarationList`] if `nodes` is empty and
/// [`ConfigError::InvalidPath`] if any path is not valid.
pub fn flatten<T: Clone>(
    nodes: &[Node<T>],
    suffix: &MatchSuffix,
) -> Result<Vec<ResolvedNode<T>>, ConfigError> {
    if nodes.is_empty() {
        return Err(ConfigError::EmptyDeclarationList);
    }
    flatten_under("/", nodes, suffix)
}

fn flatten_under<T: Clone>(
    parent: &str,
    nodes: &[Node<T>],
    suffix: &MatchSuffix,
) -> Result<Vec<ResolvedNode<T>>, ConfigError> {
    let mut routable: Vec<(&Node<T>, &str)> = nodes
        .iter()
        .filter_map(|node| {
            let raw = node.raw_path();
            if raw.is_none() {
                tracing::debug!(name = %node.route.name, parent, "Dropping route without path");
            }
            raw.map(|raw| (node, raw))
        })
        .collect();

    // Keyed siblings first, ascending; stable sort keeps declared order otherwise
    routable.sort_by_key(|(node, _)| order_key(&node.route));

    routable
        .into_iter()
        .map(|(node, raw)| resolve_node(parent, node, raw, suffix))
        .collect()
}

fn order_key(route: &RouteMeta) -> (bool, i64) {
    match route.order {
        Some(order) => (false, order),
        None => (true, 0),
    }
}

fn resolve_node<T: Clone>(
    parent: &str,
    node: &Node<T>,
    raw: &str,
    suffix: &MatchSuffix,
) -> Result<ResolvedNode<T>, ConfigError> {
    let path = join_path(parent, raw)?;

    let children = match node.children.as_deref() {
        Some(children) => {
            let resolved = flatten_under(&path, children, suffix)?;
            (!resolved.is_empty()).then_some(resolved)
        }
        None => None,
    };

    Ok(ResolvedNode {
        target: node.target.clone(),
        route: node.route.clone(),
        pattern: suffix.apply(&path),
        path,
        children,
    })
}
