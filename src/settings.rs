//! Persisted per-user defaults for frender.
//! A `~/.frender/config` file holds default paths for the context file and
//! the macro/filter directories; CLI flags always win over it. The
//! interactive `setup` subcommand writes the file and is entirely separate
//! from the render path.

use crate::constants::{CONFIG_DIR, CONFIG_FILE};
use crate::error::{Error, Result};
use dialoguer::Input;
use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Persisted default paths, any of which may be unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub env_file: Option<PathBuf>,
    pub macros_dir: Option<PathBuf>,
    pub filters_dir: Option<PathBuf>,
}

/// Returns the first present value among CLI flag, persisted setting and
/// hard-coded fallback, in that precedence order.
pub fn resolve<T>(cli: Option<T>, persisted: Option<T>, fallback: Option<T>) -> Option<T> {
    cli.or(persisted).or(fallback)
}

/// Location of the per-user configuration file, when a home directory is
/// known.
pub fn config_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(CONFIG_DIR).join(CONFIG_FILE))
}

impl Settings {
    /// Loads persisted settings from the given path.
    ///
    /// A missing file yields empty defaults, never an error. Unknown keys
    /// and malformed lines are ignored; empty values mean unset.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let Ok(content) = fs::read_to_string(path) else {
            debug!("No persisted configuration at '{}'", path.display());
            return Settings::default();
        };

        let mut settings = Settings::default();
        for line in content.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim();
            let value = (!value.is_empty()).then(|| PathBuf::from(value));
            match key.trim() {
                "ENV_FILE" => settings.env_file = value,
                "MACROS_DIR" => settings.macros_dir = value,
                "FILTERS_DIR" => settings.filters_dir = value,
                _ => {}
            }
        }
        settings
    }

    /// Writes the settings to the given path, creating parent directories.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let wrap = |e: io::Error| Error::Write { path: path.display().to_string(), cause: e };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(wrap)?;
        }
        let display = |value: &Option<PathBuf>| {
            value.as_deref().map(|p| p.display().to_string()).unwrap_or_default()
        };
        let content = format!(
            "ENV_FILE={}\nMACROS_DIR={}\nFILTERS_DIR={}\n",
            display(&self.env_file),
            display(&self.macros_dir),
            display(&self.filters_dir),
        );
        fs::write(path, content).map_err(wrap)?;
        Ok(())
    }
}

/// Interactively prompts for the three default paths and persists them.
///
/// Existing values are offered as prompt defaults; entering nothing leaves
/// a value unset.
pub fn run_setup<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let config_path = config_path.as_ref();
    let current = Settings::load(config_path);

    let settings = Settings {
        env_file: prompt_path("Default context file", &current.env_file)?,
        macros_dir: prompt_path("Default macros directory", &current.macros_dir)?,
        filters_dir: prompt_path("Default filters directory", &current.filters_dir)?,
    };

    settings.save(config_path)?;
    println!("Configuration written to '{}'", config_path.display());
    Ok(())
}

fn prompt_path(prompt: &str, current: &Option<PathBuf>) -> Result<Option<PathBuf>> {
    let default = current.as_deref().map(|p| p.display().to_string()).unwrap_or_default();
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| Error::Io(io::Error::other(e.to_string())))?;

    let input = input.trim();
    Ok((!input.is_empty()).then(|| PathBuf::from(input)))
}
