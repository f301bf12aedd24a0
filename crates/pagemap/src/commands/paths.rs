//! `pagemap paths` command implementation.

use clap::Args;
use pagemap_routes::{PathEntry, RenderTarget};

use super::{CommonArgs, Project};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the paths command.
#[derive(Args)]
pub(crate) struct PathsArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Print entries as a JSON array.
    #[arg(long)]
    json: bool,
}

impl PathsArgs {
    /// Execute the paths command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading or resolving the declarations fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let project = Project::load(&self.common, None)?;
        let entries = project.paths()?;

        let text = if self.json {
            format!("{}\n", serde_json::to_string_pretty(&entries)?)
        } else {
            format_entries(&entries)
        };
        Output::new().data(&text)?;
        Ok(())
    }
}

/// One `path<TAB>name<TAB>target` line per entry.
fn format_entries(entries: &[PathEntry<RenderTarget>]) -> String {
    entries
        .iter()
        .map(|entry| format!("{}\t{}\t{}\n", entry.path, entry.name, entry.target))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_format_entries() {
        let entries = vec![
            PathEntry {
                name: "post".to_owned(),
                path: "/blog/post/".to_owned(),
                target: RenderTarget::from("PostPage"),
            },
            PathEntry {
                name: "blog".to_owned(),
                path: "/blog/".to_owned(),
                target: RenderTarget::from("BlogPage"),
            },
        ];

        assert_eq!(
            format_entries(&entries),
            "/blog/post/\tpost\tPostPage\n/blog/\tblog\tBlogPage\n"
        );
    }

    #[test]
    fn test_format_no_entries() {
        assert_eq!(format_entries(&[]), "");
    }
}
