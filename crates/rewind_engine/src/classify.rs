//! Phases one and two: index stored records and classify the snapshot.
//!
//! Classification only compares metadata. It produces an immutable work list
//! for phase three and never touches file contents.

use std::collections::HashMap;
use std::path::PathBuf;

use rewind_common::Timestamp;
use rewind_events::{Event, EventSink, FileOperation};
use rewind_store::FileRecord;

use crate::error::FileFailure;
use crate::snapshot::{Observed, Snapshot};

/// A file that needs its content hashed in phase three.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkItem {
    /// The tracked path.
    pub path: PathBuf,
    /// The timestamp observed in this run.
    pub observed: Timestamp,
    /// The stored record carried forward for a recheck; `None` for a new file.
    pub prior: Option<FileRecord>,
}

impl WorkItem {
    /// Returns `true` if the file has no stored record.
    pub fn is_new(&self) -> bool {
        self.prior.is_none()
    }
}

/// The outcome of phase two.
#[derive(Debug, Default)]
pub struct Classification {
    /// Stored records kept verbatim because their timestamp did not advance.
    pub unchanged: Vec<FileRecord>,
    /// New and rechecked files, in path order.
    pub pending: Vec<WorkItem>,
    /// Tracked paths that do not exist on disk.
    pub missing: Vec<PathBuf>,
    /// Tracked paths whose metadata could not be read.
    pub unreadable: Vec<FileFailure>,
}

/// Indexes stored records by path.
///
/// The store guarantees unique paths, so each path maps to exactly one record.
pub fn index_by_path(records: Vec<FileRecord>) -> HashMap<PathBuf, FileRecord> {
    records
        .into_iter()
        .map(|record| (record.path.clone(), record))
        .collect()
}

/// Classifies every snapshot entry against the stored records.
///
/// A path that no longer exists is dropped. A path without a record becomes
/// a new work item. A path whose observed timestamp is strictly newer than the
/// recorded one becomes a recheck carrying the stored record forward. Anything
/// else keeps its stored record unchanged.
pub fn classify(
    snapshot: &Snapshot,
    stored: &HashMap<PathBuf, FileRecord>,
    sink: &dyn EventSink,
) -> Classification {
    let mut out = Classification::default();

    for (path, observed) in snapshot.iter() {
        let observed = match observed {
            Observed::Present(ts) if path.exists() => *ts,
            Observed::Present(_) | Observed::Missing => {
                sink.emit(Event::Missing {
                    path: path.to_path_buf(),
                });
                out.missing.push(path.to_path_buf());
                continue;
            }
            Observed::Unreadable(reason) => {
                let failure = FileFailure::new(
                    path,
                    FileOperation::Stat,
                    std::io::Error::new(std::io::ErrorKind::Other, reason.clone()),
                );
                sink.emit(failure.to_event());
                out.unreadable.push(failure);
                continue;
            }
        };

        sink.emit(Event::Examined {
            path: path.to_path_buf(),
            observed,
        });

        match stored.get(path) {
            None => {
                sink.emit(Event::NoRecord {
                    path: path.to_path_buf(),
                });
                out.pending.push(WorkItem {
                    path: path.to_path_buf(),
                    observed,
                    prior: None,
                });
            }
            Some(record) if observed > record.last_write_time => {
                sink.emit(Event::TimestampAdvanced {
                    path: path.to_path_buf(),
                    recorded: record.last_write_time,
                    observed,
                    recorded_hash: record.hash,
                });
                out.pending.push(WorkItem {
                    path: path.to_path_buf(),
                    observed,
                    prior: Some(record.clone()),
                });
            }
            Some(record) => {
                sink.emit(Event::TimestampUnchanged {
                    path: path.to_path_buf(),
                    recorded: record.last_write_time,
                    observed,
                });
                out.unchanged.push(record.clone());
            }
        }
    }

    out
}
