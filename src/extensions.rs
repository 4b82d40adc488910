//! Extension discovery and registration for frender.
//! Macro and filter extensions are MiniJinja sources discovered by a
//! recursive directory scan; their exported callables are copied into the
//! engine's global and filter tables.

use crate::error::{Error, Result};
use log::debug;
use minijinja::value::Rest;
use minijinja::{Environment, State, Value};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// One discovered extension file, ready to be added to an environment.
#[derive(Debug, Clone)]
struct ExtensionSource {
    /// Template name under which the source is registered (the file path)
    name: String,
    source: String,
}

/// The immutable set of macro and filter sources for a run.
///
/// Built once before any engine exists. Files are applied in lexicographic
/// path order, so name collisions resolve deterministically: the last file
/// in that order wins.
#[derive(Debug, Clone, Default)]
pub struct ExtensionRegistry {
    macros: Vec<ExtensionSource>,
    filters: Vec<ExtensionSource>,
}

impl ExtensionRegistry {
    /// Discovers extension sources beneath the given directories.
    ///
    /// Either directory may be absent; an absent directory contributes
    /// nothing. A file that cannot be read is a fatal error.
    pub fn discover(
        macros_dir: Option<&Path>,
        filters_dir: Option<&Path>,
    ) -> Result<Self> {
        Ok(Self {
            macros: read_sources(macros_dir)?,
            filters: read_sources(filters_dir)?,
        })
    }

    /// Registers every discovered extension into the environment.
    ///
    /// Macro exports become globals. Filter exports become both a pipeline
    /// filter and a global, so `{{ v | name }}` and `{{ name(v) }}` are
    /// equally valid. Partial registration never survives: the first file
    /// that fails to evaluate fails the whole run.
    pub fn register(&self, env: &mut Environment<'static>) -> Result<()> {
        for source in self.macros.iter().chain(self.filters.iter()) {
            env.add_template_owned(source.name.clone(), source.source.clone()).map_err(
                |e| Error::ExtensionLoad {
                    path: source.name.clone(),
                    cause: e.to_string(),
                },
            )?;
        }

        let mut globals = Vec::new();
        for source in &self.macros {
            globals.extend(harvest_exports(env, &source.name)?);
        }

        let mut callables = Vec::new();
        for source in &self.filters {
            callables.extend(harvest_exports(env, &source.name)?);
        }

        for (name, value) in globals {
            debug!("Registering macro '{}'", name);
            env.add_global(name, value);
        }

        for (name, value) in callables {
            debug!("Registering filter '{}'", name);
            let callable = value.clone();
            env.add_filter(
                name.clone(),
                move |state: &State, value: Value, args: Rest<Value>| {
                    let mut call_args = Vec::with_capacity(args.0.len() + 1);
                    call_args.push(value);
                    call_args.extend(args.0.iter().cloned());
                    callable.call(state, &call_args)
                },
            );
            env.add_global(name, value);
        }

        Ok(())
    }
}

/// Recursively collects regular files beneath `dir` in lexicographic path
/// order and reads their contents.
fn read_sources(dir: Option<&Path>) -> Result<Vec<ExtensionSource>> {
    let Some(dir) = dir else {
        return Ok(Vec::new());
    };
    if !dir.is_dir() {
        debug!("Extension directory '{}' does not exist, skipping", dir.display());
        return Ok(Vec::new());
    }

    let mut paths = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).display().to_string();
            Error::ExtensionLoad { path, cause: e.to_string() }
        })?;
        if entry.file_type().is_file() {
            paths.push(entry.path().to_path_buf());
        }
    }
    paths.sort();

    let mut sources = Vec::with_capacity(paths.len());
    for path in paths {
        let source = fs::read_to_string(&path).map_err(|e| Error::ExtensionLoad {
            path: path.display().to_string(),
            cause: e.to_string(),
        })?;
        sources.push(ExtensionSource { name: path.display().to_string(), source });
    }
    Ok(sources)
}

/// Evaluates a registered extension template and returns its public
/// exports. Names starting with `_` are treated as internal.
fn harvest_exports(
    env: &Environment<'static>,
    name: &str,
) -> Result<Vec<(String, Value)>> {
    let wrap = |e: minijinja::Error| Error::ExtensionLoad {
        path: name.to_string(),
        cause: e.to_string(),
    };

    let template = env.get_template(name).map_err(wrap)?;
    let state = template.eval_to_state(()).map_err(wrap)?;

    let mut exports = Vec::new();
    for export in state.exports() {
        if export.starts_with('_') {
            continue;
        }
        if let Some(value) = state.lookup(export) {
            exports.push((export.to_string(), value));
        }
    }
    Ok(exports)
}
