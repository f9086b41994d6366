#![deny(missing_docs)]

//! # Auto Swagger CLI
//!
//! Command line host for the marker rewriter.
//!
//! Supported Commands:
//! - `rewrite`: Runs one processing round over unit documents.
//! - `schemas`: Lists the marker schemas and their fields.

use auto_swagger_core::AppResult;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod rewrite;
mod schemas;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Auto Swagger annotation rewriter")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rewrites (or strips) marker annotations in unit documents.
    Rewrite(rewrite::RewriteArgs),
    /// Prints every marker schema.
    Schemas,
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Rewrite(args) => rewrite::execute(args)?,
        Commands::Schemas => schemas::execute(),
    }

    Ok(())
}
