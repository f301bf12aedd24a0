//! pagemap CLI - route declaration resolver.
//!
//! Provides commands for:
//! - `routes`: Print the dispatcher route tree as JSON
//! - `paths`: List every resolvable path, children first
//! - `sitemap`: Render `sitemap.xml`
//! - `check`: Resolve declarations and report problems

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, CommonArgs, PathsArgs, RoutesArgs, SitemapArgs};
use output::Output;

/// pagemap - Route declaration resolver.
#[derive(Parser)]
#[command(name = "pagemap", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the route tree handed to the dispatcher.
    Routes(RoutesArgs),
    /// List every resolvable path.
    Paths(PathsArgs),
    /// Render a sitemap.xml.
    Sitemap(SitemapArgs),
    /// Resolve declarations and report the result.
    Check(CheckArgs),
}

impl Commands {
    fn common(&self) -> &CommonArgs {
        match self {
            Self::Routes(args) => &args.common,
            Self::Paths(args) => &args.common,
            Self::Sitemap(args) => &args.common,
            Self::Check(args) => &args.common,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.common().verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Routes(args) => args.execute(),
        Commands::Paths(args) => args.execute(),
        Commands::Sitemap(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
