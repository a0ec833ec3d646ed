//! Project manifest (`package.json`) reader.
//!
//! Only the `repository` field is of interest. It may be a plain string or an
//! object with a `url` key, and plain strings may use the npm shorthands
//! (`owner/name`, `github:owner/name`, `gitlab:...`, `bitbucket:...`), which
//! are normalized to full `git+https` URLs.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// File name of the project manifest.
pub const MANIFEST_FILE: &str = "package.json";

#[derive(Debug, Default, Deserialize)]
struct Manifest {
    #[serde(default)]
    repository: Option<Value>,
}

/// Read the repository URL declared in `<cwd>/package.json`.
///
/// A missing manifest, or a manifest without a usable `repository` field,
/// yields `Ok(None)`. A manifest that cannot be read or parsed is an error.
pub fn read_repository_url(cwd: &Path) -> Result<Option<String>> {
    let path = cwd.join(MANIFEST_FILE);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(Error::Manifest {
                path,
                message: e.to_string(),
            })
        }
    };

    let manifest: Manifest = serde_json::from_str(&content).map_err(|e| Error::Manifest {
        path: path.clone(),
        message: e.to_string(),
    })?;

    Ok(manifest.repository.as_ref().and_then(repository_url))
}

/// Extract the URL from a `repository` value (string or `{ url }`).
pub fn repository_url(repository: &Value) -> Option<String> {
    let raw = match repository {
        Value::String(s) => s.as_str(),
        Value::Object(map) => map.get("url").and_then(Value::as_str)?,
        _ => return None,
    };

    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    Some(expand_shorthand(raw))
}

/// Expand npm repository shorthands into `git+https` URLs.
///
/// Anything that is not a recognized shorthand is returned unchanged.
pub fn expand_shorthand(raw: &str) -> String {
    let (host, rest) = match raw.split_once(':') {
        Some(("github", rest)) => ("github.com", rest),
        Some(("gitlab", rest)) => ("gitlab.com", rest),
        Some(("bitbucket", rest)) => ("bitbucket.org", rest),
        Some(_) => return raw.to_string(),
        None => ("github.com", raw),
    };

    let is_owner_name = rest
        .split_once('/')
        .is_some_and(|(owner, name)| is_shorthand_part(owner) && is_shorthand_part(name));

    if !is_owner_name {
        return raw.to_string();
    }

    let rest = rest.strip_suffix(".git").unwrap_or(rest);
    format!("git+https://{}/{}.git", host, rest)
}

fn is_shorthand_part(part: &str) -> bool {
    !part.is_empty()
        && part
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
