//! # Config Layer Merging
//!
//! Merges the plugin-level config with this plugin's own override block from
//! a release step list.
//!
//! A release step (for example `publish`) lists the plugins that run during
//! that step. Each entry is either an object carrying a `path` key or a
//! `[path, options]` pair; a single object is accepted in place of a list.
//! The entry whose `path` equals the plugin's identity path overrides the
//! plugin config key by key.
//!
//! The plugin-level `branch` is removed from the merged map before the
//! override is applied. It is kept aside in
//! [`EffectiveOptions::branch_fallback`] and only used as the fallback for
//! `pullTagsBranch`, so a global `branch` setting never replaces the hosting
//! branch.

use serde_json::{Map, Value};

use crate::context::Context;

/// One entry of a release step list.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOverride {
    /// `{ "path": "...", ...options }`
    Object(Map<String, Value>),
    /// `["path", { ...options }]`
    Pair(String, Map<String, Value>),
}

impl StepOverride {
    /// Interpret a step list entry. Bare plugin names and other scalars are
    /// not overrides and yield `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self::Object(map.clone())),
            Value::Array(items) => {
                let path = items.first()?.as_str()?.to_string();
                let options = items
                    .get(1)
                    .and_then(Value::as_object)
                    .cloned()
                    .unwrap_or_default();
                Some(Self::Pair(path, options))
            }
            _ => None,
        }
    }

    /// The identity path of the entry, if it has one.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Object(map) => map.get("path").and_then(Value::as_str),
            Self::Pair(path, _) => Some(path),
        }
    }

    /// Normalize to a single options map that includes `path`.
    pub fn into_options(self) -> Map<String, Value> {
        match self {
            Self::Object(map) => map,
            Self::Pair(path, mut options) => {
                options.insert("path".to_string(), Value::String(path));
                options
            }
        }
    }
}

/// Find the first entry of a step list whose `path` equals `path`.
///
/// `step` may be a list of entries or a single entry.
pub fn find_step_override(step: &Value, path: &str) -> Option<StepOverride> {
    let entries: Vec<&Value> = match step {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    };

    entries
        .into_iter()
        .filter_map(StepOverride::from_value)
        .find(|entry| entry.path() == Some(path))
}

/// Plugin config merged with its step override, before defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectiveOptions {
    /// Merged options, without the plugin-level `branch`.
    pub values: Map<String, Value>,
    /// The plugin-level `branch`, kept for the `pullTagsBranch` fallback.
    pub branch_fallback: Option<Value>,
}

impl EffectiveOptions {
    /// Raw merged value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Non-empty string value.
    pub fn str_value(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
    }

    /// Truthiness of a value; absent is false.
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).is_some_and(is_truthy)
    }

    /// Truthiness of a value, keeping absence (or `null`) distinct.
    pub fn optional_flag(&self, key: &str) -> Option<bool> {
        self.get(key).filter(|v| !v.is_null()).map(is_truthy)
    }

    /// The plugin-level `branch`, if it was a non-empty string.
    pub fn branch_fallback(&self) -> Option<&str> {
        self.branch_fallback
            .as_ref()
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

/// Loose truthiness for config values written by hand.
///
/// `null`, `false`, `0` and the strings `""`, `"0"` and `"false"` (any case)
/// are false. Everything else is true.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => {
            let s = s.trim();
            !(s.is_empty() || s == "0" || s.eq_ignore_ascii_case("false"))
        }
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Merge the plugin config with the matching entry of `context.options[step]`.
///
/// When `step` is `None`, or the step has no entry for `path`, the result is
/// the plugin config minus `branch`.
pub fn resolve_options(
    plugin_config: &Map<String, Value>,
    context: &Context,
    path: &str,
    step: Option<&str>,
) -> EffectiveOptions {
    let mut values = plugin_config.clone();
    let branch_fallback = values.remove("branch");

    let extra = step
        .and_then(|step| context.options.get(step))
        .and_then(|entries| find_step_override(entries, path));

    if let Some(extra) = extra {
        values.extend(extra.into_options());
    }

    EffectiveOptions {
        values,
        branch_fallback,
    }
}
