//! Shared helpers for CLI commands: configuration discovery and settings resolution.

use std::path::Path;

use rewind_config::{resolve_settings, Overrides, ResolvedSettings, RewindConfig, Verbosity};

use crate::GlobalArgs;

/// Loads the configuration for `project` and merges it with command-line overrides.
///
/// An explicit `--config` must exist. Otherwise a `rewind.toml` next to the
/// project file is used when present.
pub fn resolve_project_settings(
    global: &GlobalArgs,
    project: &Path,
    mut overrides: Overrides,
) -> Result<ResolvedSettings, Box<dyn std::error::Error>> {
    let config_path = match &global.config {
        Some(path) => Some(path.clone()),
        None => rewind_config::find_config(project),
    };

    let (config, config_dir) = match config_path {
        Some(path) => {
            let config = rewind_config::load_config(&path)
                .map_err(|e| format!("{}: {e}", path.display()))?;
            let dir = path.parent().map(Path::to_path_buf);
            (config, dir)
        }
        None => (RewindConfig::default(), None),
    };

    overrides.verbosity = verbosity_override(global);
    Ok(resolve_settings(
        &config,
        config_dir.as_deref(),
        project,
        &overrides,
    ))
}

/// Maps `-q`/`-v` to a verbosity, or `None` when neither is given.
pub fn verbosity_override(global: &GlobalArgs) -> Option<Verbosity> {
    if global.quiet {
        Some(Verbosity::Quiet)
    } else if global.verbose {
        Some(Verbosity::Verbose)
    } else {
        None
    }
}
