//! Depth-first expansion.
//!
//! Produces a single flat list of every node, emitting all of a node's
//! descendants before the node itself. Used to enumerate every addressable
//! path (sitemaps, static prerendering), never for dispatch.

use serde::Serialize;

use crate::ConfigError;
use crate::flatten::{ResolvedNode, flatten};
use crate::node::{Node, Normalize, normalize_all};
use crate::path::MatchSuffix;

/// One resolvable path with the route that serves it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PathEntry<T> {
    /// Route name.
    pub name: String,
    /// Absolute canonical path.
    pub path: String,
    /// What renders this path.
    pub target: T,
}

/// Normalize declarations and expand them children-first.
///
/// Nodes keep their raw path segments; use [`all_paths`] for absolute paths.
///
/// # Errors
///
/// Returns [`ConfigError::EmptyDeclarationList`] if `decls` is empty, or any
/// error raised while normalizing.
pub fn expand<T, D, I>(decls: I) -> Result<Vec<Node<T>>, ConfigError>
where
    T: Clone,
    D: Normalize<T>,
    I: IntoIterator<Item = D>,
{
    let nodes = normalize_all(decls)?;
    if nodes.is_empty() {
        return Err(ConfigError::EmptyDeclarationList);
    }

    let mut expanded = Vec::new();
    for node in &nodes {
        push_node(node, &mut expanded);
    }
    Ok(expanded)
}

fn push_node<T: Clone>(node: &Node<T>, out: &mut Vec<Node<T>>) {
    for child in node.children() {
        push_node(child, out);
    }
    out.push(node.clone());
}

/// Expand already-resolved nodes children-first, by reference.
#[must_use]
pub fn expand_resolved<T>(nodes: &[ResolvedNode<T>]) -> Vec<&ResolvedNode<T>> {
    fn push<'a, T>(node: &'a ResolvedNode<T>, out: &mut Vec<&'a ResolvedNode<T>>) {
        for child in node.children() {
            push(child, out);
        }
        out.push(node);
    }

    let mut expanded = Vec::new();
    for node in nodes {
        push(node, &mut expanded);
    }
    expanded
}

/// List every resolvable absolute path, children before parents.
///
/// # Errors
///
/// Returns [`ConfigError::EmptyDeclarationList`] if `decls` is empty, or any
/// error raised while normalizing or resolving paths.
pub fn all_paths<T, D, I>(decls: I, suffix: &MatchSuffix) -> Result<Vec<PathEntry<T>>, ConfigError>
where
    T: Clone,
    D: Normalize<T>,
    I: IntoIterator<Item = D>,
{
    let nodes = normalize_all(decls)?;
    let resolved = flatten(&nodes, suffix)?;

    let entries: Vec<_> = expand_resolved(&resolved)
        .into_iter()
        .map(|node| PathEntry {
            name: node.route.name.clone(),
            path: node.path.clone(),
            target: node.target.clone(),
        })
        .collect();
    tracing::debug!(count = entries.len(), "Expanded resolvable paths");
    Ok(entries)
}
