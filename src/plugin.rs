//! # Verify and Publish Phases
//!
//! The release pipeline calls the plugin twice: once to verify conditions
//! and once to publish. Both phases resolve the configuration from scratch.
//!
//! The [`Session`] carries the configuration verified in the first phase to
//! the second one. When the publish phase resolves a configuration that
//! differs from the verified one, verification runs again before anything is
//! published. Re-verifying is always safe; the session only saves the
//! repeated checks when nothing changed.
//!
//! Publishing itself is delegated to a [`PagesPublisher`].

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::context::Context;
use crate::defaults::PUBLISH_STEP;
use crate::error::{Error, Result};
use crate::redirect::RedirectLookup;
use crate::resolve::{resolve_config, ResolvedConfig};
use crate::template::render_or_raw;

/// State carried from the verify phase to the publish phase.
#[derive(Debug, Clone, Default)]
pub struct Session {
    last_verified: Option<ResolvedConfig>,
}

impl Session {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// The configuration accepted by the last successful verification.
    pub fn last_verified(&self) -> Option<&ResolvedConfig> {
        self.last_verified.as_ref()
    }

    /// Whether `config` equals the last verified configuration.
    pub fn is_verified(&self, config: &ResolvedConfig) -> bool {
        self.last_verified.as_ref() == Some(config)
    }

    fn record(&mut self, config: ResolvedConfig) {
        self.last_verified = Some(config);
    }
}

/// Everything a publisher needs to push the docs.
#[derive(Debug, Clone, PartialEq)]
pub struct PushOptions {
    /// Resolved configuration.
    pub config: ResolvedConfig,
    /// Rendered commit message.
    pub message: String,
    /// Environment of the release process.
    pub env: BTreeMap<String, String>,
    /// Working directory the source path is relative to.
    pub cwd: PathBuf,
}

/// Pushes the docs directory to the hosting branch.
#[async_trait]
pub trait PagesPublisher: Send + Sync {
    /// Commit `options.config.src` into `options.config.dst` on
    /// `options.config.branch` and push it to `options.config.repo`.
    async fn publish(&self, options: &PushOptions, context: &Context) -> Result<()>;
}

/// Check that a resolved configuration can be published.
///
/// Fails when no token or repository URL was resolved, or when the docs
/// source directory does not exist under `context.cwd`.
pub fn verify_resolved(config: &ResolvedConfig, context: &Context) -> Result<()> {
    if config.token.is_none() {
        return Err(Error::TokenRequired);
    }

    if config.repo.is_none() {
        return Err(Error::RepositoryUrl);
    }

    let src = context.cwd.join(&config.src);
    let is_dir = fs::symlink_metadata(&src).is_ok_and(|meta| meta.is_dir());
    if !is_dir {
        let resolved = std::path::absolute(&src).unwrap_or_else(|_| src.clone());
        context
            .logger
            .error("Resolved docs src path=", &[&resolved.display()]);
        return Err(Error::SourceDirMissing { path: resolved });
    }

    Ok(())
}

/// Resolve the configuration for `path` and `step`, then check it.
///
/// `None` for `path` selects the default plugin name.
pub async fn verify_config(
    plugin_config: &Map<String, Value>,
    context: &Context,
    path: Option<&str>,
    step: Option<&str>,
    lookup: &dyn RedirectLookup,
) -> Result<ResolvedConfig> {
    let config = resolve_config(plugin_config, context, path, step, lookup).await?;

    context.logger.log("verify gh-pages config", &[]);
    verify_resolved(&config, context)?;

    Ok(config)
}

/// Verify phase: resolve the configuration, check it and remember it.
pub async fn verify_conditions(
    plugin_config: &Map<String, Value>,
    context: &Context,
    session: &mut Session,
    lookup: &dyn RedirectLookup,
) -> Result<ResolvedConfig> {
    let config = verify_config(plugin_config, context, None, Some(PUBLISH_STEP), lookup).await?;

    session.record(config.clone());
    Ok(config)
}

/// Publish phase: resolve, re-verify if needed, render the message and hand
/// the push options to `publisher`.
pub async fn publish(
    plugin_config: &Map<String, Value>,
    context: &Context,
    session: &mut Session,
    lookup: &dyn RedirectLookup,
    publisher: &dyn PagesPublisher,
) -> Result<PushOptions> {
    let config = resolve_config(plugin_config, context, None, Some(PUBLISH_STEP), lookup).await?;
    let message = render_or_raw(&config.msg, context);

    if !session.is_verified(&config) {
        verify_conditions(plugin_config, context, session, lookup).await?;
    }

    let options = PushOptions {
        config,
        message,
        env: context.env.clone(),
        cwd: context.cwd.clone(),
    };

    context.logger.log("Publishing docs via gh-pages", &[]);
    publisher.publish(&options, context).await?;

    Ok(options)
}
