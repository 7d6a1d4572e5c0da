//! Per-run outcome counters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Counts of what a single reconciliation run did.
///
/// Every tracked path lands in exactly one of `missing`, `unreadable`,
/// `unchanged`, `created`, `updated`, `rewound`, or `failed`. `deleted` counts stored
/// records removed because their path was not carried into the new state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Distinct paths in the snapshot.
    pub tracked: usize,
    /// Tracked paths that did not exist on disk.
    pub missing: usize,
    /// Paths whose metadata could not be read; they were never hashed.
    pub unreadable: usize,
    /// Paths whose timestamp had not advanced; no hashing was done.
    pub unchanged: usize,
    /// Paths seen for the first time.
    pub created: usize,
    /// Paths whose content genuinely changed.
    pub updated: usize,
    /// Paths whose timestamp was rewound because content was identical.
    pub rewound: usize,
    /// Paths excluded from the result after a hashing or rewind failure.
    pub failed: usize,
    /// Stored records removed from the store.
    pub deleted: usize,
    /// Individual store operations that failed during finalization.
    pub store_write_failures: usize,
    /// Wall-clock time spent on the whole run.
    pub elapsed: Duration,
}

impl RunSummary {
    /// Number of files that required hashing in phase 3.
    pub fn hashed(&self) -> usize {
        self.created + self.updated + self.rewound + self.failed
    }

    /// Returns `true` if any file or store operation failed.
    pub fn has_failures(&self) -> bool {
        self.unreadable > 0 || self.failed > 0 || self.store_write_failures > 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} tracked, {} unchanged, {} rewound, {} updated, {} new, {} missing, {} failed, {} deleted in {:.3?}",
            self.tracked,
            self.unchanged,
            self.rewound,
            self.updated,
            self.created,
            self.missing,
            self.unreadable + self.failed,
            self.deleted,
            self.elapsed
        )
    }
}
