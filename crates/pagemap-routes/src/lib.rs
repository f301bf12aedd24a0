//! Route declaration resolver for pagemap.
//!
//! Turns a hand-authored tree of page declarations into:
//! - [`RouteTree`]: the nested routing structure handed to a request dispatcher
//! - [`PathEntry`] lists: every resolvable path, children before parents,
//!   for sitemaps and static prerendering
//!
//! Resolution runs once at startup. Every error is a [`ConfigError`] and is
//! fatal: a route table that does not resolve must stop the application.
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), pagemap_routes::ConfigError> {
//! use pagemap_routes::{RawDeclaration, RouteTreeOptions, all_paths, build_route_tree};
//!
//! let decls = vec![
//!     RawDeclaration::new("HomePage", "home", "/"),
//!     RawDeclaration::new("BlogPage", "blog", "/blog")
//!         .with_child(RawDeclaration::new("PostPage", "post", "/post")),
//! ];
//!
//! let tree = build_route_tree(decls.clone(), &RouteTreeOptions::new("NotFoundPage"))?;
//! assert_eq!(tree.default.name, "home");
//! assert_eq!(tree.lookup("/blog/post").name(), Some("post"));
//!
//! let options = RouteTreeOptions::new("NotFoundPage");
//! let paths: Vec<_> = all_paths(decls, &options.suffix)?
//!     .into_iter()
//!     .map(|entry| entry.path)
//!     .collect();
//! assert_eq!(paths, ["/", "/blog/post/", "/blog/"]);
//! # Ok(())
//! # }
//! ```

mod declaration;
mod error;
mod expand;
mod flatten;
mod node;
mod parser;
mod path;
mod route_tree;
mod sitemap;

pub use declaration::{Child, PathMeta, RawDeclaration, RenderTarget, RouteMeta};
pub use error::ConfigError;
pub use expand::{PathEntry, all_paths, expand, expand_resolved};
pub use flatten::{ResolvedNode, flatten};
pub use node::{Node, Normalize, normalize_all};
pub use parser::parse_declarations;
pub use path::{DEFAULT_MATCH_SUFFIX, MatchSuffix, join_path, normalize_path};
pub use route_tree::{
    DefaultRoute, Route, RouteMatch, RouteTree, RouteTreeOptions, build_route_tree,
};
pub use sitemap::Sitemap;
