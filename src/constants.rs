//! Common constants used throughout the frender application.

/// Default context file name, used when neither the CLI nor the persisted
/// configuration names one
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Per-user configuration directory name (under the home directory)
pub const CONFIG_DIR: &str = ".frender";

/// Persisted configuration file name inside [`CONFIG_DIR`]
pub const CONFIG_FILE: &str = "config";
