//! # Error Handling
//!
//! This module defines the centralized error type for `ghpages-release`. It
//! uses the `thiserror` library to build an `Error` enum covering every
//! failure mode of configuration resolution, verification and publishing.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Each variant corresponds to one kind of
//!   failure and carries the context needed to act on it (the offending URL,
//!   the resolved path, the unknown template variable, ...).
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! None of these errors is retried anywhere in the crate. Every variant
//! describes a configuration problem the operator has to fix, with the
//! exception of `Network`, which wraps the transport failure of the
//! short-link lookup unchanged.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for ghpages-release operations
#[derive(Error, Debug)]
pub enum Error {
    /// No credential token could be resolved from the environment or from
    /// the repository URL.
    #[error("env.GH_TOKEN is required by gh-pages plugin")]
    TokenRequired,

    /// No usable repository URL could be resolved.
    #[error("package.json repository.url does not match github.com pattern")]
    RepositoryUrl,

    /// The `enterprise` flag is set but the repository lives on the public
    /// hosting domain.
    #[error("repo refers to `{domain}` but enterprise url is expected")]
    EnterpriseDomain { domain: String },

    /// The docs source directory is missing or is not a directory.
    #[error("docs source directory does not exist: {}", path.display())]
    SourceDirMissing { path: PathBuf },

    /// The short-link lookup failed at the transport level.
    #[error("Network operation error: {url} - {message}")]
    Network { url: String, message: String },

    /// The short-link lookup succeeded but did not yield a target URL.
    #[error("Redirect lookup error: {url} - {message}")]
    Redirect { url: String, message: String },

    /// The project manifest exists but could not be read or parsed.
    #[error("Manifest error in {}: {message}", path.display())]
    Manifest { path: PathBuf, message: String },

    /// An error occurred while rendering the commit message template.
    ///
    /// May include the name of the problematic variable when applicable.
    #[error("Template processing error: {message}{}", variable.as_ref().map(|v| format!(" (variable: {})", v)).unwrap_or_default())]
    Template {
        message: String,
        /// The template variable that caused the error, if applicable
        variable: Option<String>,
    },

    /// The release configuration file could not be parsed.
    ///
    /// This error includes the specific parsing issue and optionally a hint
    /// about how to fix it.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// The external pages publisher reported a failure.
    #[error("Publish error: {message}")]
    Publish { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON parsing error, wrapped from `serde_json::Error`.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
