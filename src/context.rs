//! Invocation context shared by the verify and publish phases.
//!
//! A [`Context`] bundles what the surrounding release pipeline hands to the
//! plugin: the environment, the global release options (including the step
//! lists that carry per-step overrides), the working directory, a logging
//! sink and the release metadata used to render the commit message.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::{Map, Value};

/// Side-effect sink for user-facing messages.
///
/// Mirrors the two-method logger the release pipeline provides. The values
/// are extra context appended to the message.
pub trait Logger: Send + Sync {
    /// Report progress.
    fn log(&self, message: &str, values: &[&dyn fmt::Display]);

    /// Report a failure.
    fn error(&self, message: &str, values: &[&dyn fmt::Display]);
}

/// [`Logger`] that forwards to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogLogger;

impl Logger for LogLogger {
    fn log(&self, message: &str, values: &[&dyn fmt::Display]) {
        log::info!("{}", join_message(message, values));
    }

    fn error(&self, message: &str, values: &[&dyn fmt::Display]) {
        log::error!("{}", join_message(message, values));
    }
}

fn join_message(message: &str, values: &[&dyn fmt::Display]) -> String {
    values.iter().fold(message.to_string(), |mut acc, value| {
        acc.push(' ');
        acc.push_str(&value.to_string());
        acc
    })
}

/// Everything one resolution reads besides the plugin config itself.
#[derive(Clone)]
pub struct Context {
    /// Environment variables (`GH_TOKEN`, `GITHUB_TOKEN`, `REPO_URL`, ...).
    pub env: BTreeMap<String, String>,
    /// Global release options, including step override lists.
    pub options: Map<String, Value>,
    /// Working directory; relative paths resolve against it.
    pub cwd: PathBuf,
    /// Where user-facing messages go.
    pub logger: Arc<dyn Logger>,
    /// Release metadata (`nextRelease`, `lastRelease`, ...) for templates.
    pub release: Value,
}

impl Context {
    /// Create a context with no options, no release metadata and a
    /// [`LogLogger`].
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            env: BTreeMap::new(),
            options: Map::new(),
            cwd: cwd.into(),
            logger: Arc::new(LogLogger),
            release: Value::Object(Map::new()),
        }
    }

    /// Replace the environment.
    pub fn with_env<I, K, V>(mut self, env: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env = env.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    /// Replace the global release options.
    pub fn with_options(mut self, options: Map<String, Value>) -> Self {
        self.options = options;
        self
    }

    /// Replace the logging sink.
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    /// Replace the release metadata.
    pub fn with_release(mut self, release: Value) -> Self {
        self.release = release;
        self
    }

    /// Look up a non-empty environment variable.
    pub fn env_var(&self, key: &str) -> Option<&str> {
        self.env.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }

    /// Look up a non-empty string in the global release options.
    pub fn option_str(&self, key: &str) -> Option<&str> {
        self.options
            .get(key)
            .and_then(Value::as_str)
            .filter(|v| !v.is_empty())
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Values may hold credentials.
        let env_keys: Vec<&String> = self.env.keys().collect();
        f.debug_struct("Context")
            .field("env", &env_keys)
            .field("options", &self.options)
            .field("cwd", &self.cwd)
            .field("release", &self.release)
            .finish_non_exhaustive()
    }
}
