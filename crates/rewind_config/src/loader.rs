//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::RewindConfig;
use std::path::{Path, PathBuf};

/// File name of the configuration looked up next to the build file.
pub const CONFIG_FILE: &str = "rewind.toml";

/// Upper bound on `engine.jobs` and `--jobs`.
pub const MAX_JOBS: usize = 1024;

/// Returns the `rewind.toml` sitting next to `build_file`, if there is one.
pub fn find_config(build_file: &Path) -> Option<PathBuf> {
    let dir = build_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let candidate = dir.join(CONFIG_FILE);
    candidate.is_file().then_some(candidate)
}

/// Loads and validates a configuration file.
pub fn load_config(path: &Path) -> Result<RewindConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<RewindConfig, ConfigError> {
    let config: RewindConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that configuration values are usable.
fn validate_config(config: &RewindConfig) -> Result<(), ConfigError> {
    if let Some(path) = &config.database.path {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "database.path must not be empty".to_string(),
            ));
        }
    }
    if config.engine.jobs > MAX_JOBS {
        return Err(ConfigError::ValidationError(format!(
            "engine.jobs must be at most {MAX_JOBS}, got {}",
            config.engine.jobs
        )));
    }
    Ok(())
}
