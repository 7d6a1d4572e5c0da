//! Settings resolution: command line over configuration file over defaults.

use crate::types::{RewindConfig, Verbosity};
use rewind_store::default_database_path;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Values given on the command line, each overriding the configuration file.
#[derive(Debug, Default)]
pub struct Overrides {
    /// Explicit database path.
    pub database: Option<PathBuf>,
    /// Worker count; `Some(0)` means one worker per CPU.
    pub jobs: Option<usize>,
    /// Force sequential resolution.
    pub sequential: bool,
    /// Explicit verbosity.
    pub verbosity: Option<Verbosity>,
}

/// Fully resolved run settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSettings {
    /// Record database location.
    pub database: PathBuf,
    /// Worker count, or `None` for one per CPU.
    pub jobs: Option<NonZeroUsize>,
    /// Whether phase-three resolution may run in parallel.
    pub parallel: bool,
    /// Effective verbosity.
    pub verbosity: Verbosity,
}

/// Resolves run settings for `build_file`.
///
/// `config_dir` is the directory of the loaded configuration file; relative
/// `database.path` values are joined onto it.
pub fn resolve_settings(
    config: &RewindConfig,
    config_dir: Option<&Path>,
    build_file: &Path,
    overrides: &Overrides,
) -> ResolvedSettings {
    let database = match (&overrides.database, &config.database.path) {
        (Some(path), _) => path.clone(),
        (None, Some(path)) => match config_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.clone(),
        },
        (None, None) => default_database_path(build_file),
    };

    let jobs = overrides.jobs.unwrap_or(config.engine.jobs);

    ResolvedSettings {
        database,
        jobs: NonZeroUsize::new(jobs),
        parallel: config.engine.parallel && !overrides.sequential,
        verbosity: overrides.verbosity.unwrap_or(config.log.verbosity),
    }
}
