//! Error handling for the frender application.
//! Defines custom error types and results used throughout the application.

use std::io;
use thiserror::Error;

/// Custom error types for frender operations.
///
/// Each variant carries enough context (source path, cause) to be actionable
/// from the single diagnostic line printed on exit.
#[derive(Error, Debug)]
pub enum Error {
    /// A named input file, directory or list file does not exist
    #[error("Input not found: '{path}'.")]
    InputNotFound { path: String },

    /// An input list file or directory entry exists but could not be read
    #[error("Failed to read input '{path}': {cause}.")]
    InputRead { path: String, cause: io::Error },

    /// The context file exists but could not be parsed
    #[error("Failed to parse context file '{path}': {cause}.")]
    ContextParse { path: String, cause: String },

    /// A macro or filter extension file could not be loaded
    #[error("Failed to load extension '{path}': {cause}.")]
    ExtensionLoad { path: String, cause: String },

    /// Template expansion failed for one input file
    #[error("Failed to render '{path}': {cause}.")]
    Render { path: String, cause: String },

    /// The rendered output could not be written
    #[error("Failed to write '{path}': {cause}.")]
    Write { path: String, cause: io::Error },

    /// Conflicting or insufficient CLI selection, detected before any I/O
    #[error("Usage error: {0}.")]
    Usage(String),

    /// Represents unexpected errors during file system operations
    #[error("IO error: {0}.")]
    Io(#[from] io::Error),
}

impl Error {
    /// Process exit code for this error kind.
    ///
    /// Usage errors exit with 2 (matching clap), recognized run errors with 1,
    /// anything unexpected with 70.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Usage(_) => 2,
            Error::Io(_) => 70,
            _ => 1,
        }
    }
}

/// Convenience type alias for Results with frender's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// Prints a single diagnostic line to stderr and exits with the error's code.
pub fn default_error_handler(err: Error) -> ! {
    match &err {
        Error::Io(e) => eprintln!("frender: unexpected error: {}", e),
        _ => eprintln!("frender: {}", err),
    }
    std::process::exit(err.exit_code());
}
