//! Output placement for frender.
//! Routes each rendered string to stdout, back over the source file, or
//! beneath an output directory with optional flattening.

use crate::collector::Selection;
use crate::error::{Error, Result};
use log::debug;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// The destination strategy for rendered output, chosen once per run.
#[derive(Debug, Clone)]
pub enum Placement {
    /// Write rendered text to standard output (single-file runs only)
    Stdout,
    /// Write rendered text back over the source file
    Overwrite,
    /// Write beneath an output directory, preserving or flattening the
    /// path relative to the selection root
    OutputDir { dir: PathBuf, flatten: bool },
}

impl Placement {
    /// Validates the placement against the number of collected files.
    ///
    /// Standard-output placement is only valid for exactly one file; this
    /// is checked before anything is rendered.
    pub fn validate(&self, file_count: usize) -> Result<()> {
        if matches!(self, Placement::Stdout) && file_count > 1 {
            return Err(Error::Usage(
                "rendering multiple files requires --overwrite or an output directory"
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// Places one rendered file according to this placement mode.
    ///
    /// File destinations get their missing parent directories created and a
    /// one-line confirmation on stdout; stdout placement emits the rendered
    /// text verbatim and nothing else.
    pub fn route(&self, selection: &Selection, source: &Path, rendered: &str) -> Result<()> {
        match self {
            Placement::Stdout => {
                io::stdout().write_all(rendered.as_bytes()).map_err(Error::Io)
            }
            Placement::Overwrite => write_rendered(source, source, rendered),
            Placement::OutputDir { dir, flatten } => {
                let dest = dir.join(relative_component(selection, source, *flatten));
                write_rendered(source, &dest, rendered)
            }
        }
    }
}

/// Computes the path component under the output directory for one source
/// file.
///
/// Single-path and explicit-list selections always flatten to the basename,
/// as does any selection when the flatten flag is set. Directory selections
/// otherwise preserve the path relative to the searched root; list-file
/// entries keep their given relative path.
fn relative_component(selection: &Selection, source: &Path, flatten: bool) -> PathBuf {
    let basename = || {
        source
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| source.to_path_buf())
    };

    if flatten || selection.always_flattens() {
        return basename();
    }

    match selection.root() {
        Some(root) => {
            source.strip_prefix(root).map(PathBuf::from).unwrap_or_else(|_| basename())
        }
        // List-file mode: keep the path as given, unless it is absolute
        // and would escape the output directory.
        None if source.is_absolute() => basename(),
        None => source.to_path_buf(),
    }
}

fn write_rendered(source: &Path, dest: &Path, content: &str) -> Result<()> {
    let wrap = |e: io::Error| Error::Write { path: dest.display().to_string(), cause: e };

    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(wrap)?;
        }
    }
    debug!("Writing rendered output to '{}'", dest.display());
    fs::write(dest, content).map_err(wrap)?;
    println!("Rendered: '{}' -> '{}'", source.display(), dest.display());
    Ok(())
}
