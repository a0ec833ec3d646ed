//! # ghpages-release CLI
//!
//! Binary entry point. Parses the command line and runs the selected
//! subcommand; all resolution logic lives in the library crate.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute().await
}
