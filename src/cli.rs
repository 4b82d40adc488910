//! Command-line interface implementation for frender.
//! Provides argument parsing, validation of the mutually exclusive
//! input-selection and output-placement modes, and the orchestration loop
//! over collected files.

use crate::collector::{build_exclude_set, collect_files, Selection};
use crate::constants::DEFAULT_ENV_FILE;
use crate::context::{load_context, Context};
use crate::error::{Error, Result};
use crate::extensions::ExtensionRegistry;
use crate::output::Placement;
use crate::renderer::{build_environment, render_file};
use crate::settings::{self, Settings};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Command-line arguments structure for frender.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "frender: batch renderer for MiniJinja templates",
    long_about = None,
    args_conflicts_with_subcommands = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Single template file to render
    #[arg(value_name = "INPUT_FILE", group = "input")]
    pub input_file: Option<PathBuf>,

    /// Comma-separated list of template files to render
    #[arg(short, long, value_name = "FILES", value_delimiter = ',', group = "input")]
    pub list: Vec<PathBuf>,

    /// File containing template paths to render, one per line
    #[arg(short, long, value_name = "LIST_FILE", group = "input")]
    pub file_list: Option<PathBuf>,

    /// Render every file in a directory
    #[arg(short, long, value_name = "DIR", group = "input")]
    pub dir: Option<PathBuf>,

    /// Recurse into subdirectories (directory mode only)
    #[arg(
        short,
        long,
        requires = "dir",
        conflicts_with_all = ["input_file", "list", "file_list"]
    )]
    pub recursive: bool,

    /// Comma-separated glob patterns excluded by basename, e.g. '*.bak'
    #[arg(
        short = 'x',
        long,
        value_name = "PATTERNS",
        value_delimiter = ',',
        requires = "dir",
        conflicts_with_all = ["input_file", "list", "file_list"]
    )]
    pub exclude: Vec<String>,

    /// Directory rendered output is written beneath
    #[arg(short, long, value_name = "OUTPUT_DIR", group = "placement")]
    pub output_dir: Option<PathBuf>,

    /// Overwrite each source file with its rendered output
    #[arg(long, group = "placement")]
    pub overwrite: bool,

    /// Flatten output paths to basenames inside the output directory
    #[arg(long, requires = "output_dir")]
    pub single_dir: bool,

    /// Additional directories searched for shared templates and partials
    /// (repeatable)
    #[arg(long, value_name = "TEMPLATES_DIR")]
    pub templates_dir: Vec<PathBuf>,

    /// Context file providing template variables (format inferred from
    /// the extension)
    #[arg(long, value_name = "ENV_FILE")]
    pub env_file: Option<PathBuf>,

    /// Directory of macro files registered as template globals
    #[arg(long, value_name = "MACROS_DIR")]
    pub macros_dir: Option<PathBuf>,

    /// Directory of filter files registered as filters and globals
    #[arg(long, value_name = "FILTERS_DIR")]
    pub filters_dir: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactively persist default context/macro/filter paths
    Setup,
}

impl Args {
    /// The input selection mode, or None when no input was named.
    ///
    /// clap's `input` group guarantees at most one mode is present.
    pub fn selection(&self) -> Option<Selection> {
        if let Some(path) = &self.input_file {
            return Some(Selection::Single(path.clone()));
        }
        if !self.list.is_empty() {
            return Some(Selection::List(self.list.clone()));
        }
        if let Some(path) = &self.file_list {
            return Some(Selection::ListFile(path.clone()));
        }
        self.dir.as_ref().map(|root| Selection::Dir {
            root: root.clone(),
            recursive: self.recursive,
        })
    }

    /// The output placement mode. Defaults to stdout when neither
    /// `--overwrite` nor `--output-dir` is given.
    pub fn placement(&self) -> Placement {
        if self.overwrite {
            return Placement::Overwrite;
        }
        match &self.output_dir {
            Some(dir) => Placement::OutputDir { dir: dir.clone(), flatten: self.single_dir },
            None => Placement::Stdout,
        }
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With clap's default error handling (exit code 2) on usage errors
pub fn get_args() -> Args {
    Args::parse()
}

/// Runs the interactive setup, persisting default paths to the per-user
/// configuration file.
pub fn run_setup() -> Result<()> {
    let config_path = settings::config_path().ok_or_else(|| {
        Error::Usage("cannot determine the home directory for the configuration file".to_string())
    })?;
    settings::run_setup(config_path)
}

/// Main application logic execution.
///
/// # Flow
/// 1. Resolves settings (CLI flag over persisted default over fallback)
/// 2. Collects and validates input files
/// 3. Validates the placement mode against the file count
/// 4. Loads the context mapping once
/// 5. Discovers macro/filter extensions once
/// 6. Renders each file and routes its output, failing fast on any error
pub fn run(args: Args) -> Result<()> {
    let persisted = settings::config_path().map(Settings::load).unwrap_or_default();

    let env_file = settings::resolve(
        args.env_file.clone(),
        persisted.env_file,
        Some(PathBuf::from(DEFAULT_ENV_FILE)),
    );
    let macros_dir = settings::resolve(args.macros_dir.clone(), persisted.macros_dir, None);
    let filters_dir = settings::resolve(args.filters_dir.clone(), persisted.filters_dir, None);

    let Some(selection) = args.selection() else {
        println!("No files to render.");
        return Ok(());
    };

    let excludes = build_exclude_set(&args.exclude)?;
    let files = collect_files(&selection, &excludes)?;
    if files.is_empty() {
        println!("No files to render.");
        return Ok(());
    }

    let placement = args.placement();
    placement.validate(files.len())?;

    let context = match &env_file {
        Some(path) => load_context(path)?,
        None => Context::new(),
    };
    let registry = ExtensionRegistry::discover(macros_dir.as_deref(), filters_dir.as_deref())?;

    for file in &files {
        let search_dir = file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let env = build_environment(search_dir, &args.templates_dir, &registry)?;
        let rendered = render_file(&env, file, &context)?;
        placement.route(&selection, file, &rendered)?;
    }

    Ok(())
}
