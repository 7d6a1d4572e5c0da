//! Typed events emitted while reconciling tracked files.

use crate::severity::Severity;
use crate::summary::RunSummary;
use rewind_common::{ContentHash, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// The filesystem operation that failed for a single file.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum FileOperation {
    /// Reading the file's metadata.
    Stat,
    /// Opening or reading the file to compute its content hash.
    Hash,
    /// Writing the file's modification timestamp.
    Rewind,
}

impl fmt::Display for FileOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileOperation::Stat => write!(f, "reading metadata of"),
            FileOperation::Hash => write!(f, "hashing"),
            FileOperation::Rewind => write!(f, "rewinding timestamp of"),
        }
    }
}

/// A single structured event from a reconciliation run.
///
/// Events are the engine's only output channel besides its return value and
/// its filesystem side effects. Each variant carries the data needed to
/// render a message; [`severity`](Self::severity) tells the sink how loud it is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// A run is starting against the given database.
    RunStarted {
        /// Location of the record store.
        database: PathBuf,
        /// Number of distinct tracked paths.
        tracked: usize,
    },
    /// A tracked file is being classified.
    Examined {
        /// The tracked path.
        path: PathBuf,
        /// Its currently observed modification time.
        observed: Timestamp,
    },
    /// A tracked path does not exist on disk and gets no record.
    Missing {
        /// The tracked path.
        path: PathBuf,
    },
    /// A tracked file has no stored record; one will be created.
    NoRecord {
        /// The tracked path.
        path: PathBuf,
    },
    /// The observed timestamp is newer than the recorded one; the file will be rehashed.
    TimestampAdvanced {
        /// The tracked path.
        path: PathBuf,
        /// Timestamp held in the stored record.
        recorded: Timestamp,
        /// Timestamp observed in this run.
        observed: Timestamp,
        /// Hash held in the stored record.
        recorded_hash: ContentHash,
    },
    /// The observed timestamp has not advanced; the stored record is kept as is.
    TimestampUnchanged {
        /// The tracked path.
        path: PathBuf,
        /// Timestamp held in the stored record.
        recorded: Timestamp,
        /// Timestamp observed in this run.
        observed: Timestamp,
    },
    /// A new record was resolved for a first-seen file.
    Created {
        /// The tracked path.
        path: PathBuf,
        /// The computed content hash.
        hash: ContentHash,
    },
    /// The file's content changed; its record takes the new timestamp and hash.
    Updated {
        /// The tracked path.
        path: PathBuf,
        /// Hash held in the stored record.
        previous: ContentHash,
        /// Hash computed in this run.
        current: ContentHash,
    },
    /// The file's content was unchanged, so its timestamp was set back.
    Rewound {
        /// The tracked path.
        path: PathBuf,
        /// The unchanged content hash.
        hash: ContentHash,
        /// The observed timestamp before rewinding.
        from: Timestamp,
        /// The recorded timestamp now on disk.
        to: Timestamp,
    },
    /// An I/O failure excluded the file from this run's persisted state.
    FileFailed {
        /// The tracked path.
        path: PathBuf,
        /// The operation that failed.
        operation: FileOperation,
        /// The underlying error message.
        reason: String,
    },
    /// A stored record was removed.
    RecordDeleted {
        /// The record's path.
        path: PathBuf,
    },
    /// A single insert, update, or delete against the store failed.
    StoreWriteFailed {
        /// The record's path.
        path: PathBuf,
        /// The underlying error message.
        reason: String,
    },
    /// A worker pool could not be created and files are resolved one by one.
    SequentialFallback {
        /// Why the pool was unavailable.
        reason: String,
    },
    /// The run completed.
    RunFinished {
        /// What the run did.
        summary: RunSummary,
    },
}

impl Event {
    /// Returns how significant this event is.
    pub fn severity(&self) -> Severity {
        match self {
            Event::FileFailed { .. } | Event::StoreWriteFailed { .. } => Severity::Error,
            Event::SequentialFallback { .. } => Severity::Warning,
            Event::RunStarted { .. }
            | Event::Examined { .. }
            | Event::NoRecord { .. }
            | Event::TimestampAdvanced { .. }
            | Event::TimestampUnchanged { .. }
            | Event::RunFinished { .. } => Severity::Info,
            Event::Missing { .. }
            | Event::Created { .. }
            | Event::Updated { .. }
            | Event::Rewound { .. }
            | Event::RecordDeleted { .. } => Severity::Detail,
        }
    }

    /// Returns a stable snake_case name for the event kind.
    pub fn name(&self) -> &'static str {
        match self {
            Event::RunStarted { .. } => "run_started",
            Event::Examined { .. } => "examined",
            Event::Missing { .. } => "missing",
            Event::NoRecord { .. } => "no_record",
            Event::TimestampAdvanced { .. } => "timestamp_advanced",
            Event::TimestampUnchanged { .. } => "timestamp_unchanged",
            Event::Created { .. } => "created",
            Event::Updated { .. } => "updated",
            Event::Rewound { .. } => "rewound",
            Event::FileFailed { .. } => "file_failed",
            Event::RecordDeleted { .. } => "record_deleted",
            Event::StoreWriteFailed { .. } => "store_write_failed",
            Event::SequentialFallback { .. } => "sequential_fallback",
            Event::RunFinished { .. } => "run_finished",
        }
    }

    /// Returns the file this event is about, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Event::Examined { path, .. }
            | Event::Missing { path }
            | Event::NoRecord { path }
            | Event::TimestampAdvanced { path, .. }
            | Event::TimestampUnchanged { path, .. }
            | Event::Created { path, .. }
            | Event::Updated { path, .. }
            | Event::Rewound { path, .. }
            | Event::FileFailed { path, .. }
            | Event::RecordDeleted { path }
            | Event::StoreWriteFailed { path, .. } => Some(path),
            Event::RunStarted { .. }
            | Event::SequentialFallback { .. }
            | Event::RunFinished { .. } => None,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::RunStarted { database, tracked } => {
                write!(f, "using database {} for {tracked} tracked file(s)", database.display())
            }
            Event::Examined { path, observed } => {
                write!(f, "source file {} (last write {observed})", path.display())
            }
            Event::Missing { path } => write!(
                f,
                "{} does not exist; it will not have a record in the database",
                path.display()
            ),
            Event::NoRecord { path } => write!(
                f,
                "{} has no record in the database; one will be created",
                path.display()
            ),
            Event::TimestampAdvanced {
                path,
                recorded,
                observed,
                recorded_hash,
            } => write!(
                f,
                "{} last write time changed ({recorded} -> {observed}, recorded hash {recorded_hash}); rehashing",
                path.display()
            ),
            Event::TimestampUnchanged { path, recorded, .. } => write!(
                f,
                "{} last write time not changed since {recorded}; skipping",
                path.display()
            ),
            Event::Created { path, hash } => {
                write!(f, "{} hashed to {hash}; creating a new record", path.display())
            }
            Event::Updated {
                path,
                previous,
                current,
            } => write!(
                f,
                "{} hash changed from {previous} to {current}; updating record",
                path.display()
            ),
            Event::Rewound { path, hash, from, to } => write!(
                f,
                "{} hash {hash} not changed; rewound last write time from {from} to {to}",
                path.display()
            ),
            Event::FileFailed {
                path,
                operation,
                reason,
            } => write!(
                f,
                "I/O error {operation} {}: {reason}; the file will not have a record in the database",
                path.display()
            ),
            Event::RecordDeleted { path } => {
                write!(f, "removed record for {}", path.display())
            }
            Event::StoreWriteFailed { path, reason } => {
                write!(f, "failed to store record for {}: {reason}", path.display())
            }
            Event::SequentialFallback { reason } => {
                write!(f, "worker pool unavailable ({reason}); hashing sequentially")
            }
            Event::RunFinished { summary } => {
                write!(f, "timestamp database update finished: {summary}")
            }
        }
    }
}
