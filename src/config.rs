//! # Release Configuration Loading
//!
//! The CLI needs the same inputs the release pipeline would hand to the
//! plugin: the global release options and the plugin's own config. Both come
//! from the project's release configuration file.
//!
//! ## Sources
//!
//! The first of these that exists in the working directory is used:
//!
//! 1. `.releaserc` (JSON or YAML)
//! 2. `.releaserc.json`
//! 3. `.releaserc.yaml` / `.releaserc.yml`
//! 4. the `release` key of `package.json`
//!
//! ## Plugin Config
//!
//! The plugin config is the options object of the `plugins` entry whose
//! name equals the plugin's identity path, in either the `[name, options]`
//! pair form or the `{ path, ...options }` object form.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::defaults::RELEASE_CONFIG_FILES;
use crate::error::{Error, Result};
use crate::manifest::MANIFEST_FILE;
use crate::options::find_step_override;

/// Serialization format of a release configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Strict JSON.
    Json,
    /// YAML, which also accepts JSON documents.
    Yaml,
}

impl Format {
    /// Guess the format from a file name. Unknown extensions read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Global release options loaded from a configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseConfig {
    /// Top-level options, including `plugins` and the step lists.
    pub options: Map<String, Value>,
}

impl ReleaseConfig {
    /// Parse release options from a string.
    pub fn parse(content: &str, format: Format) -> Result<Self> {
        let value: Value = match format {
            Format::Json => serde_json::from_str(content)?,
            Format::Yaml => serde_yaml::from_str(content)?,
        };

        match value {
            Value::Object(options) => Ok(Self { options }),
            Value::Null => Ok(Self::default()),
            other => Err(Error::ConfigParse {
                message: format!("expected a mapping of release options, found {}", kind(&other)),
                hint: Some("The release configuration must be an object at the top level".to_string()),
            }),
        }
    }

    /// Load release options from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content, Format::from_path(path))
    }

    /// Find and load the release configuration of the project in `cwd`.
    ///
    /// Returns `Ok(None)` when the project has none.
    pub fn discover(cwd: &Path) -> Result<Option<Self>> {
        for name in RELEASE_CONFIG_FILES {
            let path = cwd.join(name);
            if path.is_file() {
                log::debug!("loading release config from {}", path.display());
                return Self::from_file(&path).map(Some);
            }
        }

        let manifest = cwd.join(MANIFEST_FILE);
        if !manifest.is_file() {
            return Ok(None);
        }

        let content = fs::read_to_string(&manifest)?;
        let value: Value = serde_json::from_str(&content)?;
        match value.get("release") {
            Some(Value::Object(options)) => Ok(Some(Self {
                options: options.clone(),
            })),
            _ => Ok(None),
        }
    }

    /// The options of the `plugins` entry named `path`, without the name.
    pub fn plugin_config(&self, path: &str) -> Map<String, Value> {
        let Some(plugins) = self.options.get("plugins") else {
            return Map::new();
        };

        let mut config = find_step_override(plugins, path)
            .map(|entry| entry.into_options())
            .unwrap_or_default();
        config.remove("path");
        config
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
