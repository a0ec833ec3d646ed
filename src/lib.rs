//! # ghpages-release
//!
//! Configuration resolution for a release step that publishes a docs
//! directory to a pages branch of the project repository.
//!
//! The library figures out *where* and *how* to publish; the actual push is
//! left to an implementation of [`plugin::PagesPublisher`].
//!
//! ## Quick Example
//!
//! ```
//! use ghpages_release::repo_url::{extract_repo_name, reassemble_repo_url};
//!
//! let url = "git@github.com:owner/docs.git";
//! assert_eq!(extract_repo_name(url).as_deref(), Some("owner/docs"));
//! assert_eq!(
//!     reassemble_repo_url(url, Some("secret")).as_deref(),
//!     Some("https://secret@github.com/owner/docs.git")
//! );
//! ```
//!
//! ## Core Concepts
//!
//! - **Repository URLs (`repo_url`, `redirect`, `manifest`)**: parsing of
//!   every common git URL shape, short-link expansion and the
//!   `package.json` fallback.
//! - **Layered options (`options`)**: plugin config overlaid by the matching
//!   per-step override.
//! - **Resolution (`resolve`)**: defaults, token and repository URL folded
//!   into a single [`resolve::ResolvedConfig`].
//! - **Phases (`plugin`)**: the verify and publish entry points, linked by a
//!   [`plugin::Session`].
//!
//! ## Execution Flow
//!
//! 1.  **Verify**: resolve the config for the `publish` step and check the
//!     token, the repository URL and the docs directory.
//! 2.  **Publish**: resolve again, render the commit message, re-verify if the
//!     config changed and hand everything to the publisher.

pub mod config;
pub mod context;
pub mod defaults;
pub mod error;
pub mod manifest;
pub mod options;
pub mod output;
pub mod plugin;
pub mod redirect;
pub mod repo_url;
pub mod resolve;
pub mod template;

#[cfg(test)]
mod repo_url_proptest;
