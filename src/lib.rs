//! frender is a batch renderer for MiniJinja templates.
//! It substitutes values from external configuration sources (env-style,
//! JSON, YAML, TOML, INI) and optional macro/filter extension directories,
//! and places rendered output on stdout, in place, or under an output
//! directory.

/// Command-line interface module for the frender application
pub mod cli;

/// Input file collection
/// Resolves single-path, list, list-file and directory selections
pub mod collector;

/// Common constants (default context file, per-user config location)
pub mod constants;

/// Context loading from configuration files
/// Supports env-style, JSON, YAML, TOML and INI formats
pub mod context;

/// Error types and handling for the frender application
pub mod error;

/// Macro and filter extension discovery and registration
pub mod extensions;

/// Output placement (stdout, overwrite in place, output directory)
pub mod output;

/// Template engine construction and per-file rendering
pub mod renderer;

/// Persisted per-user defaults and interactive setup
pub mod settings;
