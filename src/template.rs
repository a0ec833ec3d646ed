//! Commit message templating.
//!
//! Only variable substitution is supported. Both `<%= path.to.value %>` and
//! `${path.to.value}` placeholders are replaced with the value found at the
//! dotted path inside a JSON object; no expressions, loops or escaping.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;

use crate::context::Context;
use crate::error::{Error, Result};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<%=\s*(?P<erb>[^%]*?)\s*%>|\$\{\s*(?P<es>[^}]*?)\s*\}")
        .expect("placeholder pattern is valid")
});

/// Substitute every placeholder of `template` with values from `vars`.
///
/// # Errors
///
/// Returns `Error::Template` naming the first variable that cannot be found.
///
/// # Examples
///
/// ```
/// use ghpages_release::template::render;
/// use serde_json::json;
///
/// let vars = json!({"nextRelease": {"gitTag": "v1.2.0"}});
/// assert_eq!(
///     render("docs updated <%= nextRelease.gitTag %>", &vars).unwrap(),
///     "docs updated v1.2.0"
/// );
/// ```
pub fn render(template: &str, vars: &Value) -> Result<String> {
    let mut missing: Option<String> = None;

    let rendered = PLACEHOLDER.replace_all(template, |caps: &Captures| {
        let name = caps
            .name("erb")
            .or_else(|| caps.name("es"))
            .map_or("", |m| m.as_str());

        match lookup(vars, name) {
            Some(value) => display(value),
            None => {
                missing.get_or_insert_with(|| name.to_string());
                String::new()
            }
        }
    });

    match missing {
        Some(variable) => Err(Error::Template {
            message: "Undefined variable".to_string(),
            variable: Some(variable),
        }),
        None => Ok(rendered.into_owned()),
    }
}

/// Render `template` against the context's release metadata and options.
///
/// A rendering failure is reported on the context logger and the template
/// is returned unchanged.
pub fn render_or_raw(template: &str, context: &Context) -> String {
    let mut vars = match &context.release {
        Value::Object(map) => map.clone(),
        _ => serde_json::Map::new(),
    };
    vars.entry("options")
        .or_insert_with(|| Value::Object(context.options.clone()));

    match render(template, &Value::Object(vars)) {
        Ok(message) => message,
        Err(e) => {
            context
                .logger
                .error("commit message rendering failed:", &[&e]);
            template.to_string()
        }
    }
}

fn lookup<'a>(vars: &'a Value, name: &str) -> Option<&'a Value> {
    if name.is_empty() {
        return None;
    }

    name.split('.').try_fold(vars, |current, key| match current {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
