//! `pagemap check` command implementation.

use clap::Args;
use pagemap_routes::{PathEntry, RenderTarget, RouteTree, Sitemap};

use super::{CommonArgs, Project};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Counts reported by `check`.
#[derive(Debug, PartialEq, Eq)]
struct Summary {
    home: String,
    home_path: String,
    routes: usize,
    paths: usize,
    shared_paths: usize,
}

impl Summary {
    fn new(tree: &RouteTree<RenderTarget>, entries: &[PathEntry<RenderTarget>]) -> Self {
        let unique = Sitemap::from_entries(entries).paths().len();
        Self {
            home: tree.default.name.clone(),
            home_path: tree.path.clone(),
            routes: tree.routes().len(),
            paths: unique,
            shared_paths: entries.len() - unique,
        }
    }
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading or resolving the declarations fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let project = Project::load(&self.common, None)?;

        output.info(&format!(
            "Declarations: {}",
            project.config.routes_resolved.file.display()
        ));

        let tree = project.route_tree()?;
        let entries = project.paths()?;
        let summary = Summary::new(&tree, &entries);

        output.highlight(&format!(
            "Home route: {} ({})",
            summary.home, summary.home_path
        ));
        output.info(&format!("Routes: {}", summary.routes));
        output.info(&format!("Resolvable paths: {}", summary.paths));
        if summary.shared_paths > 0 {
            output.warning(&format!(
                "{} routes resolve to a path already served by another route",
                summary.shared_paths
            ));
        }
        output.success("Route declarations OK");
        Ok(())
    }
}
