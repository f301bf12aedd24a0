//! `pagemap sitemap` command implementation.

use std::path::PathBuf;

use clap::Args;
use pagemap_routes::Sitemap;

use super::{CommonArgs, Project};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the sitemap command.
#[derive(Args)]
pub(crate) struct SitemapArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Base URL prefixed to every path (overrides config).
    #[arg(long, env = "PAGEMAP_BASE_URL")]
    base_url: Option<String>,

    /// Write to a file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Render one path per line instead of XML.
    #[arg(long)]
    text: bool,
}

impl SitemapArgs {
    /// Execute the sitemap command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading or resolving the declarations fails, or
    /// the output file cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let project = Project::load(&self.common, self.base_url)?;
        let sitemap = Sitemap::from_entries(&project.paths()?);
        let rendered = if self.text {
            sitemap.render_text()
        } else {
            sitemap.render_xml(&project.config.sitemap.base_url)
        };

        match self.output {
            Some(path) => {
                std::fs::write(&path, rendered)?;
                output.success(&format!(
                    "Wrote {} paths to {}",
                    sitemap.paths().len(),
                    path.display()
                ));
            }
            None => output.data(&rendered)?,
        }
        Ok(())
    }
}
