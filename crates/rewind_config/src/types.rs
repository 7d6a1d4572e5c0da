//! Configuration types deserialized from `rewind.toml`.

use serde::Deserialize;
use std::path::PathBuf;

/// The top-level configuration parsed from `rewind.toml`.
///
/// Every section is optional and falls back to its defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RewindConfig {
    /// Record database settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Reconciliation engine settings.
    #[serde(default)]
    pub engine: EngineConfig,
    /// Log output settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Where the record database lives.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Explicit database path. Relative paths are taken from the directory
    /// containing the configuration file. When absent, the path is derived
    /// from the build-description file.
    pub path: Option<PathBuf>,
}

/// How phase-three hashing is scheduled.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Worker count; `0` means one worker per CPU.
    #[serde(default)]
    pub jobs: usize,
    /// `false` forces sequential resolution.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_parallel() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            jobs: 0,
            parallel: default_parallel(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Default verbosity when no command-line flag is given.
    #[serde(default)]
    pub verbosity: Verbosity,
}

/// How much of the event stream is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Progress and decisions per file.
    #[default]
    Normal,
    /// Everything, including recorded timestamps and computed hashes.
    Verbose,
}
