//! Route tree for the request dispatcher.
//!
//! The tree is rooted at the home route. By default the home route is the
//! **first** routable top-level declaration, so declaration order matters.
//! A single top-level declaration may instead be marked `default: true`.
//!
//! ```text
//! root (home path, home target)
//! ├── home's own children
//! ├── every other top-level route, in resolved order
//! ├── default   -> home (index fallback)
//! └── not_found -> configured target (catch-all)
//! ```

use serde::Serialize;

use crate::ConfigError;
use crate::flatten::{ResolvedNode, flatten};
use crate::node::{Node, Normalize, normalize_all};
use crate::path::{MatchSuffix, normalize_path};

/// Options for [`build_route_tree`].
#[derive(Clone, Debug)]
pub struct RouteTreeOptions<T> {
    /// Target rendered when no route matches.
    pub not_found: T,
    /// Suffix appended to resolved paths to form dispatcher patterns.
    pub suffix: MatchSuffix,
}

impl<T> RouteTreeOptions<T> {
    /// Options with the default match suffix.
    #[must_use]
    pub fn new(not_found: T) -> Self {
        Self {
            not_found,
            suffix: MatchSuffix::default(),
        }
    }

    /// Replace the match suffix.
    #[must_use]
    pub fn with_suffix(mut self, suffix: MatchSuffix) -> Self {
        self.suffix = suffix;
        self
    }
}

/// A named route in the tree.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Route<T> {
    /// Route name.
    pub name: String,
    /// Absolute canonical path.
    pub path: String,
    /// Dispatcher pattern.
    pub pattern: String,
    /// What renders this route.
    pub target: T,
    /// Nested routes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Route<T>>,
}

impl<T> From<ResolvedNode<T>> for Route<T> {
    fn from(node: ResolvedNode<T>) -> Self {
        Self {
            name: node.route.name,
            path: node.path,
            pattern: node.pattern,
            target: node.target,
            children: node
                .children
                .into_iter()
                .flatten()
                .map(Route::from)
                .collect(),
        }
    }
}

/// Index route rendered at the root path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DefaultRoute<T> {
    /// Route name of the home declaration.
    pub name: String,
    /// Target of the home declaration.
    pub target: T,
}

/// Nested routing structure consumed by the dispatcher.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteTree<T> {
    /// Canonical path of the root (the home route's path).
    pub path: String,
    /// Dispatcher pattern of the root.
    pub pattern: String,
    /// Target bound to the root.
    pub target: T,
    /// Routes nested under the root.
    pub children: Vec<Route<T>>,
    /// Fallback when no child matches the root path.
    pub default: DefaultRoute<T>,
    /// Catch-all fallback.
    pub not_found: T,
}

/// Result of [`RouteTree::lookup`].
#[derive(Debug, PartialEq)]
pub enum RouteMatch<'a, T> {
    /// The root path, served by the default route.
    Default(&'a DefaultRoute<T>),
    /// A nested route.
    Route(&'a Route<T>),
    /// Nothing matched.
    NotFound(&'a T),
}

impl<'a, T> RouteMatch<'a, T> {
    /// Target to render.
    #[must_use]
    pub fn target(&self) -> &'a T {
        match *self {
            Self::Default(route) => &route.target,
            Self::Route(route) => &route.target,
            Self::NotFound(target) => target,
        }
    }

    /// Route name, `None` for not-found.
    #[must_use]
    pub fn name(&self) -> Option<&'a str> {
        match *self {
            Self::Default(route) => Some(&route.name),
            Self::Route(route) => Some(&route.name),
            Self::NotFound(_) => None,
        }
    }
}

impl<T> RouteTree<T> {
    /// Look up the route serving a request path.
    ///
    /// Matches canonical paths literally, with the trailing slash optional.
    /// Routes are searched depth-first in tree order; the first hit wins.
    #[must_use]
    pub fn lookup(&self, request_path: &str) -> RouteMatch<'_, T> {
        let Ok(path) = normalize_path(request_path) else {
            return RouteMatch::NotFound(&self.not_found);
        };

        if path == self.path {
            return RouteMatch::Default(&self.default);
        }

        find_route(&self.children, &path)
            .map_or(RouteMatch::NotFound(&self.not_found), RouteMatch::Route)
    }

    /// All nested routes, parents before children.
    #[must_use]
    pub fn routes(&self) -> Vec<&Route<T>> {
        fn push<'a, T>(routes: &'a [Route<T>], out: &mut Vec<&'a Route<T>>) {
            for route in routes {
                out.push(route);
                push(&route.children, out);
            }
        }

        let mut out = Vec::new();
        push(&self.children, &mut out);
        out
    }
}

fn find_route<'a, T>(routes: &'a [Route<T>], path: &str) -> Option<&'a Route<T>> {
    routes.iter().find_map(|route| {
        if route.path == path {
            Some(route)
        } else {
            find_route(&route.children, path)
        }
    })
}

/// Build the dispatcher's route tree from declarations.
///
/// # Errors
///
/// Returns [`ConfigError::EmptyDeclarationList`] if there are no routable
/// declarations, [`ConfigError::DuplicateDefault`] if more than one
/// declaration anywhere in the tree is marked default,
/// [`ConfigError::InvalidDefault`] if the marked declaration is nested or has
/// no path, or any error raised while resolving paths.
pub fn build_route_tree<T, D, I>(
    decls: I,
    options: &RouteTreeOptions<T>,
) -> Result<RouteTree<T>, ConfigError>
where
    T: Clone,
    D: Normalize<T>,
    I: IntoIterator<Item = D>,
{
    let nodes = normalize_all(decls)?;
    check_default_marker(&nodes)?;
    let mut resolved = flatten(&nodes, &options.suffix)?;
    if resolved.is_empty() {
        tracing::debug!("No declaration has a path");
        return Err(ConfigError::EmptyDeclarationList);
    }

    let mut home = resolved.remove(home_index(&resolved));

    let mut children: Vec<Route<T>> = home
        .children
        .take()
        .into_iter()
        .flatten()
        .map(Route::from)
        .collect();
    children.extend(resolved.into_iter().map(Route::from));

    tracing::info!(
        home = %home.route.name,
        path = %home.path,
        routes = children.len(),
        "Built route tree"
    );

    Ok(RouteTree {
        target: home.target.clone(),
        default: DefaultRoute {
            name: home.route.name,
            target: home.target,
        },
        path: home.path,
        pattern: home.pattern,
        children,
        not_found: options.not_found.clone(),
    })
}

/// Check that at most one declaration carries the default marker and that it
/// is a top-level declaration with a path.
fn check_default_marker<T>(nodes: &[Node<T>]) -> Result<(), ConfigError> {
    fn collect<'a, T>(
        nodes: &'a [Node<T>],
        top_level: bool,
        out: &mut Vec<(&'a Node<T>, bool)>,
    ) {
        for node in nodes {
            if node.route.default {
                out.push((node, top_level));
            }
            collect(node.children(), false, out);
        }
    }

    let mut marked = Vec::new();
    collect(nodes, true, &mut marked);

    match marked.as_slice() {
        [] => Ok(()),
        [(node, top_level)] => {
            let reason = if !top_level {
                "only top-level declarations can be the home route"
            } else if node.raw_path().is_none() {
                "it has no path"
            } else {
                return Ok(());
            };
            Err(ConfigError::InvalidDefault {
                name: node.route.name.clone(),
                reason: reason.to_owned(),
            })
        }
        [(first, _), (second, _), ..] => Err(ConfigError::DuplicateDefault {
            first: first.route.name.clone(),
            second: second.route.name.clone(),
        }),
    }
}

/// Position of the home route among top-level resolved nodes.
///
/// The marked node if there is one, else the first.
fn home_index<T>(resolved: &[ResolvedNode<T>]) -> usize {
    resolved
        .iter()
        .position(|node| node.route.default)
        .unwrap_or(0)
}
