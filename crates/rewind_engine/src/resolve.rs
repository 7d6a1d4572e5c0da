//! Phase three: hash one file and decide between rewinding and updating.
//!
//! Each call owns its work item end to end. It reads the file, hashes it,
//! and possibly rewrites that same file's timestamp, so parallel calls on
//! distinct paths never race.

use std::io;
use std::path::Path;

use rewind_common::Timestamp;
use rewind_events::{Event, EventSink, FileOperation};
use rewind_store::FileRecord;

use crate::classify::WorkItem;
use crate::error::FileFailure;
use crate::hasher::SourceHasher;
use crate::mtime;

/// The phase-three outcome for one file.
#[derive(Debug)]
pub enum Resolution {
    /// A first-seen file; the record has no id yet.
    Created(FileRecord),
    /// Content changed; the record keeps its id and takes the observed timestamp and new hash.
    Updated(FileRecord),
    /// Content unchanged; the file's timestamp was set back and the stored record is kept verbatim.
    Rewound(FileRecord),
    /// An I/O failure; the file is left out of the persisted state.
    Failed(FileFailure),
}

impl Resolution {
    /// The record to persist, unless the file failed.
    pub fn record(&self) -> Option<&FileRecord> {
        match self {
            Resolution::Created(r) | Resolution::Updated(r) | Resolution::Rewound(r) => Some(r),
            Resolution::Failed(_) => None,
        }
    }
}

/// Writes a file's modification time during a rewind.
pub(crate) type SetMtime = fn(&Path, Timestamp) -> io::Result<()>;

/// Resolves a single work item.
pub fn resolve(item: WorkItem, sink: &dyn EventSink) -> Resolution {
    resolve_with(item, sink, mtime::set_mtime)
}

pub(crate) fn resolve_with(
    item: WorkItem,
    sink: &dyn EventSink,
    set_mtime: SetMtime,
) -> Resolution {
    let hash = match SourceHasher::hash_file(&item.path) {
        Ok(hash) => hash,
        Err(e) => return fail(FileFailure::new(item.path, FileOperation::Hash, e), sink),
    };

    let Some(prior) = item.prior else {
        sink.emit(Event::Created {
            path: item.path.clone(),
            hash,
        });
        return Resolution::Created(FileRecord::new(item.path, item.observed, hash));
    };

    if hash != prior.hash {
        sink.emit(Event::Updated {
            path: item.path,
            previous: prior.hash,
            current: hash,
        });
        return Resolution::Updated(FileRecord {
            last_write_time: item.observed,
            hash,
            ..prior
        });
    }

    if let Err(e) = set_mtime(&item.path, prior.last_write_time) {
        return fail(FileFailure::new(item.path, FileOperation::Rewind, e), sink);
    }
    sink.emit(Event::Rewound {
        path: item.path,
        hash,
        from: item.observed,
        to: prior.last_write_time,
    });
    Resolution::Rewound(prior)
}

fn fail(failure: FileFailure, sink: &dyn EventSink) -> Resolution {
    sink.emit(failure.to_event());
    Resolution::Failed(failure)
}
