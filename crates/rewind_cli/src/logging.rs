//! Routing engine events into `tracing`.

use rewind_config::Verbosity;
use rewind_events::{Event, EventSink, Severity};
use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence over the verbosity setting.
pub fn init(verbosity: Verbosity) {
    let default = match verbosity {
        Verbosity::Quiet => "error",
        Verbosity::Normal => "info",
        Verbosity::Verbose => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

/// An [`EventSink`] that forwards each event to `tracing` at a matching level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: Event) {
        let kind = event.name();
        let path = event
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        match event.severity() {
            Severity::Detail => tracing::debug!(event = kind, path = %path, "{event}"),
            Severity::Info => tracing::info!(event = kind, path = %path, "{event}"),
            Severity::Warning => tracing::warn!(event = kind, path = %path, "{event}"),
            Severity::Error => tracing::error!(event = kind, path = %path, "{event}"),
        }
    }
}
