//! `pagemap routes` command implementation.

use clap::Args;

use super::{CommonArgs, Project};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the routes command.
#[derive(Args)]
pub(crate) struct RoutesArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Print compact JSON instead of pretty-printed.
    #[arg(long)]
    compact: bool,
}

impl RoutesArgs {
    /// Execute the routes command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading or resolving the declarations fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let project = Project::load(&self.common, None)?;
        let tree = project.route_tree()?;

        let json = if self.compact {
            serde_json::to_string(&tree)?
        } else {
            serde_json::to_string_pretty(&tree)?
        };
        Output::new().data(&format!("{json}\n"))?;
        Ok(())
    }
}
