//! # CLI Command Implementations
//!
//! One module per library-backed subcommand. Each has an `Args` struct
//! derived with `clap` and an `execute` function that calls into the
//! `ghpages_release` library. `completions` needs no library and is handled
//! in `cli.rs`.
//!
//! `resolve` and `verify` share [`ReleaseArgs`], which locates the release
//! configuration and builds the invocation [`Context`].

pub mod resolve;
pub mod verify;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use serde_json::{Map, Value};

use ghpages_release::config::ReleaseConfig;
use ghpages_release::context::Context;
use ghpages_release::defaults::{PLUGIN_PATH, PUBLISH_STEP};

/// Options locating the release configuration and the plugin inside it.
#[derive(Args, Debug, Clone)]
pub struct ReleaseArgs {
    /// Release configuration file. Discovered in the working directory when
    /// omitted (`.releaserc*`, then the `release` key of `package.json`).
    #[arg(short, long, value_name = "FILE", env = "GHPAGES_RELEASE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Project directory. Defaults to the current directory.
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Plugin name used to find the plugin config and step overrides.
    #[arg(long, value_name = "NAME", default_value = PLUGIN_PATH)]
    pub path: String,

    /// Release step whose overrides apply.
    #[arg(long, value_name = "STEP", default_value = PUBLISH_STEP)]
    pub step: String,
}

impl ReleaseArgs {
    /// Load the release configuration and build the context from the
    /// process environment.
    ///
    /// Returns the context and the plugin config.
    pub fn load(&self) -> Result<(Context, Map<String, Value>)> {
        let cwd = match &self.cwd {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().context("Failed to get current directory")?,
        };

        let release = match &self.config {
            Some(path) => ReleaseConfig::from_file(path).with_context(|| {
                format!("Failed to load release config: {}", path.display())
            })?,
            None => ReleaseConfig::discover(&cwd)
                .context("Failed to load release config")?
                .unwrap_or_else(|| {
                    log::debug!("no release config found in {}", cwd.display());
                    ReleaseConfig::default()
                }),
        };

        // Variables that are not valid unicode cannot hold a usable token.
        let env = std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)));

        let plugin_config = release.plugin_config(&self.path);
        let context = Context::new(cwd)
            .with_env(env)
            .with_options(release.options);

        Ok((context, plugin_config))
    }
}
