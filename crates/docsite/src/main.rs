//! docsite CLI - documentation site configuration.
//!
//! Provides commands for:
//! - `check`: Validate the site configuration and sidebars against the docs
//! - `nav`: Print a sidebar tree
//! - `show`: Print the resolved site configuration as JSON

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, NavArgs, ShowArgs};
use output::Output;

/// docsite - documentation site configuration.
#[derive(Parser)]
#[command(name = "docsite", version, about)]
struct Cli {
    /// Enable verbose output (INFO level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check configuration, sidebars and document references.
    Check(CheckArgs),
    /// Print a sidebar tree.
    Nav(NavArgs),
    /// Print the resolved configuration as JSON.
    Show(ShowArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(),
        Commands::Nav(args) => args.execute(),
        Commands::Show(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
