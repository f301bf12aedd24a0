//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod paths;
pub(crate) mod routes;
pub(crate) mod sitemap;

use std::path::PathBuf;

use clap::Args;
use pagemap_config::{CliSettings, Config};
use pagemap_routes::{
    MatchSuffix, PathEntry, RawDeclaration, RenderTarget, RouteTree, RouteTreeOptions, all_paths,
    build_route_tree, parse_declarations,
};

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use paths::PathsArgs;
pub(crate) use routes::RoutesArgs;
pub(crate) use sitemap::SitemapArgs;

/// Arguments shared by every command.
#[derive(Args)]
pub(crate) struct CommonArgs {
    /// Path to configuration file (default: auto-discover pagemap.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Declaration file (overrides config).
    #[arg(short, long, env = "PAGEMAP_ROUTES")]
    routes: Option<PathBuf>,

    /// Suffix appended to paths to form dispatcher patterns (overrides config).
    #[arg(long)]
    match_suffix: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Loaded configuration and parsed declarations.
pub(crate) struct Project {
    pub config: Config,
    pub decls: Vec<RawDeclaration<RenderTarget>>,
}

impl Project {
    /// Load configuration, then read and parse the declaration file.
    pub(crate) fn load(common: &CommonArgs, base_url: Option<String>) -> Result<Self, CliError> {
        let cli_settings = CliSettings {
            routes_file: common.routes.clone(),
            match_suffix: common.match_suffix.clone(),
            base_url,
        };
        let config = Config::load(common.config.as_deref(), Some(&cli_settings))?;

        let file = &config.routes_resolved.file;
        if !file.exists() {
            return Err(CliError::Validation(format!(
                "Declaration file not found: {}",
                file.display()
            )));
        }
        let content = std::fs::read_to_string(file)?;
        let decls = parse_declarations(&content)?;
        tracing::info!(file = %file.display(), count = decls.len(), "Loaded declarations");

        Ok(Self { config, decls })
    }

    fn suffix(&self) -> MatchSuffix {
        MatchSuffix::new(self.config.routes_resolved.match_suffix.as_str())
    }

    /// Build the dispatcher route tree.
    pub(crate) fn route_tree(&self) -> Result<RouteTree<RenderTarget>, CliError> {
        let not_found = RenderTarget::new(self.config.routes_resolved.not_found.as_str());
        let options = RouteTreeOptions::new(not_found).with_suffix(self.suffix());
        Ok(build_route_tree(self.decls.clone(), &options)?)
    }

    /// Every resolvable path, children before parents.
    pub(crate) fn paths(&self) -> Result<Vec<PathEntry<RenderTarget>>, CliError> {
        Ok(all_paths(self.decls.clone(), &self.suffix())?)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;

    const ROUTES: &str = r"
- [HomePage, { name: home }, { path: / }]
- [BlogPage, { name: blog }, { path: /blog }, [
    [PostPage, { name: post }, { path: /post }]
  ]]
";

    fn write_project(dir: &Path, config: &str) -> CommonArgs {
        let config_path = dir.join("pagemap.toml");
        std::fs::write(&config_path, config).unwrap();
        std::fs::write(dir.join("routes.yaml"), ROUTES).unwrap();
        CommonArgs {
            config: Some(config_path),
            routes: None,
            match_suffix: None,
            verbose: false,
        }
    }

    #[test]
    fn test_load_project() {
        let dir = tempfile::tempdir().unwrap();
        let common = write_project(dir.path(), "");

        let project = Project::load(&common, None).unwrap();
        assert_eq!(project.decls.len(), 2);

        let tree = project.route_tree().unwrap();
        assert_eq!(tree.default.name, "home");
        assert_eq!(tree.not_found.as_str(), "NotFoundPage");
        assert_eq!(tree.children[0].pattern, "/blog/?");
    }

    #[test]
    fn test_match_suffix_override() {
        let dir = tempfile::tempdir().unwrap();
        let mut common = write_project(dir.path(), "");
        common.match_suffix = Some(String::new());

        let project = Project::load(&common, None).unwrap();
        let tree = project.route_tree().unwrap();
        assert_eq!(tree.children[0].pattern, "/blog/");
    }

    #[test]
    fn test_paths_children_first() {
        let dir = tempfile::tempdir().unwrap();
        let common = write_project(dir.path(), "");

        let project = Project::load(&common, None).unwrap();
        let paths: Vec<_> = project
            .paths()
            .unwrap()
            .into_iter()
            .map(|entry| entry.path)
            .collect();
        assert_eq!(paths, ["/", "/blog/post/", "/blog/"]);
    }

    #[test]
    fn test_missing_declaration_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("pagemap.toml");
        std::fs::write(&config_path, "[routes]\nfile = \"missing.yaml\"\n").unwrap();
        let common = CommonArgs {
            config: Some(config_path),
            routes: None,
            match_suffix: None,
            verbose: false,
        };

        let err = Project::load(&common, None).err().unwrap();
        assert!(matches!(err, CliError::Validation(_)));
        assert!(err.to_string().contains("missing.yaml"));
    }

    #[test]
    fn test_invalid_declaration_surfaces_routes_error() {
        let dir = tempfile::tempdir().unwrap();
        let common = write_project(dir.path(), "");
        std::fs::write(
            dir.path().join("routes.yaml"),
            "- [HomePage, { name: home }, { path: home }]",
        )
        .unwrap();

        let project = Project::load(&common, None).unwrap();
        let err = project.route_tree().unwrap_err();
        assert!(matches!(
            err,
            CliError::Routes(pagemap_routes::ConfigError::InvalidPath { .. })
        ));
    }
}
