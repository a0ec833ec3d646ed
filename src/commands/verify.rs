//! # Verify Command Implementation
//!
//! Runs the checks of the verify phase against the project in the working
//! directory and prints a short summary. Nothing is published.

use anyhow::Result;
use clap::Args;

use ghpages_release::output::{ColorChoice, SummaryStyle};
use ghpages_release::plugin::verify_config;
use ghpages_release::redirect::HttpRedirectLookup;
use ghpages_release::repo_url::redact_credentials;

use super::ReleaseArgs;

/// Check that the docs can be published
#[derive(Args, Debug)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub release: ReleaseArgs,
}

/// Execute the `verify` command.
pub async fn execute(args: VerifyArgs, color: ColorChoice) -> Result<()> {
    let out = SummaryStyle::new(color);
    let (context, plugin_config) = args.release.load()?;
    let lookup = HttpRedirectLookup::new()?;

    println!(
        "{} Verifying gh-pages config in {}",
        out.marker("🔍", "[SCAN]"),
        context.cwd.display()
    );

    let outcome = verify_config(
        &plugin_config,
        &context,
        Some(args.release.path.as_str()),
        Some(args.release.step.as_str()),
        &lookup,
    )
    .await;

    let config = match outcome {
        Ok(config) => config,
        Err(e) => {
            println!("{} {}", out.marker("❌", "[ERR]"), out.failure("Verification failed"));
            return Err(e.into());
        }
    };

    let repo = config.repo.as_deref().map(redact_credentials).unwrap_or_default();
    println!("{} Ready to publish", out.marker("✅", "[OK]"));
    println!("{}", out.field("repo", repo));
    println!("{}", out.field("branch", &config.branch));
    println!("{}", out.field("src", &config.src));
    println!("{}", out.field("dst", &config.dst));
    println!("{}", out.field("pullTagsBranch", &config.pull_tags_branch));
    if config.enterprise {
        println!("{}", out.field("enterprise", "yes"));
    }

    Ok(())
}
