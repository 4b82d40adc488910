//! Context loading for frender.
//! Builds the name/value mapping available to templates from a single
//! configuration source, dispatching on the file extension.

use crate::error::{Error, Result};
use log::debug;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// The mapping made available to every rendered template.
pub type Context = Map<String, Value>;

/// Loads a context mapping from a configuration file.
///
/// The format is inferred from the lowercased file extension:
/// `.yaml`/`.yml`, `.json`, `.toml`, `.ini`, anything else is parsed as
/// line-oriented `KEY=VALUE`.
///
/// # Arguments
/// * `path` - Path to the context file (may not exist)
///
/// # Returns
/// * `Result<Context>` - The loaded mapping; empty when the file is absent
///
/// # Errors
/// * `Error::ContextParse` if the file exists but cannot be parsed
pub fn load_context<P: AsRef<Path>>(path: P) -> Result<Context> {
    let path = path.as_ref();
    if !path.exists() {
        debug!("Context file '{}' does not exist, using empty context", path.display());
        return Ok(Context::new());
    }

    let content = fs::read_to_string(path).map_err(|e| Error::ContextParse {
        path: path.display().to_string(),
        cause: e.to_string(),
    })?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let format = if extension.is_empty() { "env" } else { extension.as_str() };
    debug!("Loading context from '{}' (format: {})", path.display(), format);

    let parsed = match extension.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
        "json" => serde_json::from_str(&content).map_err(|e| e.to_string()),
        "toml" => toml::from_str(&content).map_err(|e| e.to_string()),
        "ini" => parse_ini(&content),
        _ => parse_env(&content),
    };

    parsed.map_err(|cause| Error::ContextParse { path: path.display().to_string(), cause })
}

/// Parses INI content into a two-level mapping of section name to
/// key/value mapping. Keys before the first section header land at the
/// top level.
fn parse_ini(content: &str) -> std::result::Result<Context, String> {
    let mut root = Context::new();
    let mut section: Option<String> = None;

    for (lineno, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if line.starts_with('[') {
            let name = line
                .strip_prefix('[')
                .and_then(|l| l.strip_suffix(']'))
                .ok_or_else(|| format!("malformed section header at line {}", lineno + 1))?;
            let name = name.trim().to_string();
            root.entry(name.clone()).or_insert_with(|| Value::Object(Map::new()));
            section = Some(name);
            continue;
        }
        let (key, value) = split_key_value(line)
            .ok_or_else(|| format!("expected key=value at line {}", lineno + 1))?;
        match &section {
            Some(name) => {
                if let Some(Value::Object(table)) = root.get_mut(name) {
                    table.insert(key, Value::String(value));
                }
            }
            None => {
                root.insert(key, Value::String(value));
            }
        }
    }

    Ok(root)
}

/// Parses dotenv-style `KEY=VALUE` lines. Blank lines, comments and lines
/// without a `=` separator are ignored; an `export ` prefix and matching
/// surrounding quotes on the value are stripped.
fn parse_env(content: &str) -> std::result::Result<Context, String> {
    let mut root = Context::new();

    for raw in content.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line).trim_start();
        if let Some((key, value)) = split_key_value(line) {
            root.insert(key, Value::String(value));
        } else {
            debug!("Skipping context line without '=': {}", line);
        }
    }

    Ok(root)
}

/// Splits a line on the first `=`, trimming both sides and stripping
/// matching surrounding quotes from the value.
fn split_key_value(line: &str) -> Option<(String, String)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    let value = value.trim();
    let value = if value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')))
    {
        &value[1..value.len() - 1]
    } else {
        value
    };
    Some((key.to_string(), value.to_string()))
}
