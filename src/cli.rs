//! CLI argument parsing and command dispatch

use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use ghpages_release::output::ColorChoice;

use crate::commands;

/// ghpages-release - Resolve and verify the docs publishing step of a release
#[derive(Parser, Debug)]
#[command(name = "ghpages-release")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output
    #[arg(long, global = true, value_name = "WHEN", value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the resolved publish configuration as JSON
    Resolve(commands::resolve::ResolveArgs),

    /// Check that the docs can be published
    Verify(commands::verify::VerifyArgs),

    /// Generate shell completion scripts
    ///
    /// Example: ghpages-release completions zsh > ~/.zfunc/_ghpages-release
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        match self.command {
            Commands::Resolve(args) => commands::resolve::execute(args).await,
            Commands::Verify(args) => commands::verify::execute(args, self.color).await,
            Commands::Completions { shell } => {
                let mut cmd = Cli::command();
                clap_complete::generate(shell, &mut cmd, "ghpages-release", &mut io::stdout());
                Ok(())
            }
        }
    }
}

/// `RUST_LOG` wins over `--log-level` when set.
fn init_logging(level: &str) {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.format_timestamp(None).target(env_logger::Target::Stderr);
    // Fails only when a logger is already installed.
    let _ = builder.try_init();
}
