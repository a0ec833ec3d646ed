//! # Resolve Command Implementation
//!
//! Prints the configuration the publish step would use, as pretty JSON.
//! The token and the credential inside the repository URL are masked unless
//! `--show-token` is given.

use anyhow::{Context as _, Result};
use clap::Args;

use ghpages_release::redirect::HttpRedirectLookup;
use ghpages_release::resolve::resolve_config;

use super::ReleaseArgs;

/// Print the resolved publish configuration as JSON
#[derive(Args, Debug)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub release: ReleaseArgs,

    /// Print the token and the authenticated repository URL unmasked.
    #[arg(long)]
    pub show_token: bool,
}

/// Execute the `resolve` command.
pub async fn execute(args: ResolveArgs) -> Result<()> {
    let (context, plugin_config) = args.release.load()?;
    let lookup = HttpRedirectLookup::new()?;

    let config = resolve_config(
        &plugin_config,
        &context,
        Some(args.release.path.as_str()),
        Some(args.release.step.as_str()),
        &lookup,
    )
    .await
    .context("Failed to resolve publish config")?;

    let config = if args.show_token {
        config
    } else {
        config.redacted()
    };

    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
