//! Default values for ghpages-release configuration.
//!
//! This module provides the built-in defaults that fill any field left unset
//! by the plugin config and the step overrides, plus the identity path used
//! to find this plugin's own entry inside a release step list.

/// Identity of the plugin inside the release config's step lists.
///
/// Step entries are matched by exact string comparison on their `path`.
pub const PLUGIN_PATH: &str = "@dougkulak/semantic-release-gh-pages-plugin";

/// Hosting branch the docs are pushed to.
pub const DEFAULT_BRANCH: &str = "gh-pages";

/// Docs source directory, relative to the working directory.
pub const DEFAULT_SRC: &str = "docs";

/// Destination subdirectory on the hosting branch.
pub const DEFAULT_DST: &str = ".";

/// Commit message template.
pub const DEFAULT_MSG: &str = "docs updated <%= nextRelease.gitTag %>";

/// Whether the repository lives on a self-hosted instance.
pub const DEFAULT_ENTERPRISE: bool = false;

/// Branch whose tags are propagated to the hosting branch.
pub const DEFAULT_PULL_TAGS_BRANCH: &str = "master";

/// The public hosting domain, which contradicts the enterprise flag.
pub const PUBLIC_DOMAIN: &str = "github.com";

/// Step whose override block is consulted during verify and publish.
pub const PUBLISH_STEP: &str = "publish";

/// Release config files looked up in the working directory, in order.
pub const RELEASE_CONFIG_FILES: &[&str] = &[
    ".releaserc",
    ".releaserc.json",
    ".releaserc.yaml",
    ".releaserc.yml",
];
