//! # Config Resolution
//!
//! Produces the final [`ResolvedConfig`] consumed by the publish step.
//!
//! ## Repository URL
//!
//! The repository URL is taken from the first non-empty source, in order:
//!
//! 1. `repositoryUrl` of the effective options (step override or plugin config)
//! 2. `repositoryUrl` of the global release options
//! 3. the `REPO_URL` environment variable
//! 4. the `repository` field of `package.json`
//!
//! Short-links are expanded first. The URL is then rebuilt as an
//! authenticated HTTPS URL, unless it came verbatim from the global release
//! options, which the user fully controls.
//!
//! ## Token
//!
//! `GH_TOKEN`, then `GITHUB_TOKEN`, then the credential embedded in the
//! resolved repository URL.

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::context::Context;
use crate::defaults::{
    DEFAULT_BRANCH, DEFAULT_DST, DEFAULT_ENTERPRISE, DEFAULT_MSG, DEFAULT_PULL_TAGS_BRANCH,
    DEFAULT_SRC, PLUGIN_PATH, PUBLIC_DOMAIN,
};
use crate::error::{Error, Result};
use crate::manifest;
use crate::options::{is_truthy, resolve_options, EffectiveOptions};
use crate::redirect::{expand_short_link, RedirectLookup};
use crate::repo_url::{extract_repo_domain, extract_repo_token, reassemble_repo_url, redact_credentials};

/// Fully resolved configuration of the publish step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    /// Docs source directory.
    pub src: String,
    /// Destination subdirectory on the hosting branch.
    pub dst: String,
    /// Commit message template.
    pub msg: String,
    /// Hosting branch.
    pub branch: String,
    /// Whether the repository lives on a self-hosted instance.
    pub enterprise: bool,
    /// Repository URL, token-embedded when it was reassembled.
    pub repo: Option<String>,
    /// Credential used for the push.
    pub token: Option<String>,
    /// Branch whose tags are propagated.
    pub pull_tags_branch: String,
    /// Pass-through publish flag: only add, never remove files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add: Option<bool>,
    /// Pass-through publish flag: include dotfiles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dotfiles: Option<bool>,
}

impl ResolvedConfig {
    /// Copy with the token and the URL credential masked, for display.
    pub fn redacted(&self) -> Self {
        Self {
            repo: self.repo.as_deref().map(redact_credentials),
            token: self.token.as_ref().map(|_| "***".to_string()),
            ..self.clone()
        }
    }
}

/// Resolve the credential token.
pub fn get_token(context: &Context, repo_url: Option<&str>) -> Option<String> {
    context
        .env_var("GH_TOKEN")
        .or_else(|| context.env_var("GITHUB_TOKEN"))
        .map(str::to_string)
        .or_else(|| repo_url.and_then(extract_repo_token))
}

/// Resolve the repository URL from the effective options, the global
/// options, the environment and the manifest.
///
/// Returns `Ok(None)` when no source yields a usable URL. Fails when the
/// short-link lookup fails, when the manifest is unreadable, or when
/// `enterprise` is set and the URL points at the public hosting domain.
pub async fn get_repo_url(
    effective: &EffectiveOptions,
    context: &Context,
    enterprise: bool,
    lookup: &dyn RedirectLookup,
) -> Result<Option<String>> {
    let from_step = effective.str_value("repositoryUrl");
    let from_options = context.option_str("repositoryUrl");
    let from_env = context.env_var("REPO_URL");
    let reassemble = from_step.is_some() || from_options.is_none();

    debug!("getRepoUrl:");
    debug!("urlFromStepOpts= {:?}", from_step.map(redact_credentials));
    debug!("urlFromOpts= {:?}", from_options.map(redact_credentials));
    debug!("urlFromEnv= {:?}", from_env.map(redact_credentials));

    let url = match from_step.or(from_options).or(from_env) {
        Some(url) => url.to_string(),
        None => {
            let from_manifest = manifest::read_repository_url(&context.cwd)?;
            debug!("urlFromPackage= {:?}", from_manifest.as_deref().map(redact_credentials));
            match from_manifest {
                Some(url) => url,
                None => return Ok(None),
            }
        }
    };

    let url = expand_short_link(&url, lookup).await?;

    let url = if reassemble {
        let token = get_token(context, Some(&url));
        match reassemble_repo_url(&url, token.as_deref()) {
            Some(url) => url,
            None => {
                debug!("cannot reassemble {}", redact_credentials(&url));
                return Ok(None);
            }
        }
    } else {
        url
    };

    if enterprise {
        if let Some(domain) = extract_repo_domain(&url).filter(|d| d == PUBLIC_DOMAIN) {
            return Err(Error::EnterpriseDomain { domain });
        }
    }

    Ok(Some(url))
}

/// Resolve the publish step configuration.
///
/// `path` defaults to [`PLUGIN_PATH`]. `step` selects the release step whose
/// override list is consulted; `None` skips step overrides.
pub async fn resolve_config(
    plugin_config: &Map<String, Value>,
    context: &Context,
    path: Option<&str>,
    step: Option<&str>,
    lookup: &dyn RedirectLookup,
) -> Result<ResolvedConfig> {
    let path = path.unwrap_or(PLUGIN_PATH);
    let opts = resolve_options(plugin_config, context, path, step);
    let enterprise = opts.flag("enterprise")
        || plugin_config.get("enterprise").is_some_and(is_truthy)
        || DEFAULT_ENTERPRISE;
    let repo = get_repo_url(&opts, context, enterprise, lookup).await?;
    let pull_tags_branch = opts
        .str_value("pullTagsBranch")
        .or_else(|| opts.branch_fallback())
        .unwrap_or(DEFAULT_PULL_TAGS_BRANCH)
        .to_string();
    let token = get_token(context, repo.as_deref());

    debug!("resolveConfig args:");
    debug!("path= {}", path);
    debug!("step= {:?}", step);
    debug!("pullTagsBranch= {}", pull_tags_branch);

    Ok(ResolvedConfig {
        src: opts.str_value("src").unwrap_or(DEFAULT_SRC).to_string(),
        dst: opts.str_value("dst").unwrap_or(DEFAULT_DST).to_string(),
        msg: opts.str_value("msg").unwrap_or(DEFAULT_MSG).to_string(),
        branch: opts.str_value("branch").unwrap_or(DEFAULT_BRANCH).to_string(),
        enterprise,
        repo,
        token,
        pull_tags_branch,
        add: opts.optional_flag("add"),
        dotfiles: opts.optional_flag("dotfiles"),
    })
}
