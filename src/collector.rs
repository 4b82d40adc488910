//! Input file collection for frender.
//! Resolves the CLI selection mode (single path, explicit list, list file or
//! directory) into an ordered list of existing regular files.

use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// The four mutually exclusive input selection modes.
#[derive(Debug, Clone)]
pub enum Selection {
    /// A single template file given as the positional argument
    Single(PathBuf),
    /// An explicit comma-separated list of template files
    List(Vec<PathBuf>),
    /// A file containing one template path per line
    ListFile(PathBuf),
    /// A directory of templates, walked either shallow or recursively
    Dir { root: PathBuf, recursive: bool },
}

impl Selection {
    /// Whether output placement always flattens to the file's basename.
    ///
    /// Single-path and explicit-list selections have no meaningful root to
    /// be relative to; directory and list-file selections preserve relative
    /// paths unless flattening is requested explicitly.
    pub fn always_flattens(&self) -> bool {
        matches!(self, Selection::Single(_) | Selection::List(_))
    }

    /// The directory the selection was rooted at, when there is one.
    pub fn root(&self) -> Option<&Path> {
        match self {
            Selection::Dir { root, .. } => Some(root),
            _ => None,
        }
    }
}

/// Compiles comma-delimited exclude patterns into a glob set matched
/// against file basenames.
///
/// # Errors
/// * `Error::Usage` if any pattern is not a valid glob
pub fn build_exclude_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(
            Glob::new(pattern)
                .map_err(|e| Error::Usage(format!("invalid exclude pattern '{}': {}", pattern, e)))?,
        );
    }
    builder
        .build()
        .map_err(|e| Error::Usage(format!("invalid exclude patterns: {}", e)))
}

/// Resolves a selection into an ordered list of existing regular files.
///
/// Validation is eager: every explicitly named file must exist as a regular
/// file and a named directory must exist as a directory, or the run fails
/// before anything is rendered. Directory results follow filesystem
/// enumeration order.
///
/// # Arguments
/// * `selection` - The input selection mode
/// * `excludes` - Basename glob patterns removed from directory walks
///
/// # Errors
/// * `Error::InputNotFound` for any missing file, directory or list file
pub fn collect_files(selection: &Selection, excludes: &GlobSet) -> Result<Vec<PathBuf>> {
    match selection {
        Selection::Single(path) => {
            validate_file(path)?;
            Ok(vec![path.clone()])
        }
        Selection::List(paths) => {
            let mut files: Vec<PathBuf> = Vec::with_capacity(paths.len());
            for path in paths {
                validate_file(path)?;
                if !files.contains(path) {
                    files.push(path.clone());
                }
            }
            Ok(files)
        }
        Selection::ListFile(list_path) => {
            if !list_path.is_file() {
                return Err(Error::InputNotFound { path: list_path.display().to_string() });
            }
            let content = fs::read_to_string(list_path).map_err(|e| Error::InputRead {
                path: list_path.display().to_string(),
                cause: e,
            })?;
            let mut files = Vec::new();
            for line in content.lines() {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let path = PathBuf::from(line);
                validate_file(&path)?;
                if !files.contains(&path) {
                    files.push(path);
                }
            }
            Ok(files)
        }
        Selection::Dir { root, recursive } => {
            if !root.is_dir() {
                return Err(Error::InputNotFound { path: root.display().to_string() });
            }
            walk_dir(root, *recursive, excludes)
        }
    }
}

fn validate_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(Error::InputNotFound { path: path.display().to_string() });
    }
    Ok(())
}

fn walk_dir(root: &Path, recursive: bool, excludes: &GlobSet) -> Result<Vec<PathBuf>> {
    let mut walker = WalkDir::new(root);
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).display().to_string();
            Error::InputRead { path, cause: e.into() }
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if excludes.is_match(entry.file_name()) {
            debug!("Excluding '{}'", entry.path().display());
            continue;
        }
        files.push(entry.path().to_path_buf());
    }
    Ok(files)
}
