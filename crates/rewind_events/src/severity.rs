//! How much an event matters to someone watching a build.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The importance of a run event.
///
/// Quiet output shows only `Error`. Normal output adds `Info` and `Warning`:
/// one line per examined file plus the run summary. Verbose output adds
/// `Detail`, which carries the per-file outcome with recorded timestamps and
/// hashes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Per-file outcomes: created, updated, rewound, deleted, missing.
    Detail,
    /// Progress through the run.
    Info,
    /// The run degraded, for example to sequential hashing.
    Warning,
    /// A file or record was left out of this run's result.
    Error,
}

impl Severity {
    /// Returns `true` for [`Severity::Error`].
    pub fn is_error(self) -> bool {
        self == Severity::Error
    }

    /// The lowercase label used in log output.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Detail => "detail",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
