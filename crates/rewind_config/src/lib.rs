//! Parsing and validation of `rewind.toml` configuration files.
//!
//! The configuration is optional. When present it sets the database location,
//! the worker pool size, and the default log verbosity. [`resolve_settings`]
//! merges it with command-line overrides and built-in defaults.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use loader::{find_config, load_config, load_config_from_str, CONFIG_FILE, MAX_JOBS};
pub use resolve::{resolve_settings, Overrides, ResolvedSettings};
pub use types::*;
