//! Template engine construction and per-file rendering for frender.
//! The engine is MiniJinja; this module wires up the search path, the
//! extension registry and the built-in `env_var` lookup.

use crate::context::Context;
use crate::error::{Error, Result};
use crate::extensions::ExtensionRegistry;
use minijinja::{AutoEscape, Environment, ErrorKind};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Returns the value of a process environment variable, or the given
/// default (empty string when omitted) if it is unset.
///
/// Available in every template as both a function and a filter, regardless
/// of context: `{{ env_var('HOME') }}`, `{{ 'PORT' | env_var('8080') }}`.
pub fn env_var(name: String, default: Option<String>) -> String {
    env::var(&name).unwrap_or_else(|_| default.unwrap_or_default())
}

/// Builds a template environment for files in `search_dir`.
///
/// The loader resolves template names (and `{% include %}` / `{% import %}`
/// references) against `search_dir` first, then against each extra
/// shared-templates directory in order. The registry's macros and filters
/// are applied, and the `env_var` built-in is registered last so it is
/// always present. Auto-escaping is disabled: rendered output is plain
/// text.
///
/// # Errors
/// * `Error::ExtensionLoad` if a registry source fails to evaluate
pub fn build_environment(
    search_dir: &Path,
    extra_dirs: &[PathBuf],
    registry: &ExtensionRegistry,
) -> Result<Environment<'static>> {
    let mut search_paths = Vec::with_capacity(extra_dirs.len() + 1);
    search_paths.push(search_dir.to_path_buf());
    search_paths.extend(extra_dirs.iter().cloned());

    let mut env = Environment::new();
    env.set_loader(move |name: &str| {
        for dir in &search_paths {
            let path = dir.join(name);
            if path.is_file() {
                return fs::read_to_string(&path).map(Some).map_err(|e| {
                    minijinja::Error::new(
                        ErrorKind::InvalidOperation,
                        format!("could not read template '{}': {}", path.display(), e),
                    )
                });
            }
        }
        Ok(None)
    });
    env.set_auto_escape_callback(|_| AutoEscape::None);
    registry.register(&mut env)?;
    env.add_function("env_var", env_var);
    env.add_filter("env_var", env_var);
    Ok(env)
}

/// Renders one input file against the shared context.
///
/// # Arguments
/// * `env` - Environment whose search path contains the file's directory
/// * `path` - The source file, already validated to exist
/// * `context` - The shared read-only context mapping
///
/// # Errors
/// * `Error::Render` carrying the source path and the engine's cause
pub fn render_file(
    env: &Environment<'static>,
    path: &Path,
    context: &Context,
) -> Result<String> {
    let wrap = |e: minijinja::Error| Error::Render {
        path: path.display().to_string(),
        cause: e.to_string(),
    };

    let name = path.file_name().and_then(|n| n.to_str()).ok_or_else(|| {
        Error::InputNotFound { path: path.display().to_string() }
    })?;

    let template = env.get_template(name).map_err(wrap)?;
    template.render(context).map_err(wrap)
}
