//! The persisted per-file record.

use std::fmt;
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};

use rewind_common::{ContentHash, Timestamp};
use serde::{Deserialize, Serialize};

/// A store-assigned record identifier.
///
/// Identifiers are never zero and are stable across updates of the same record.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct RecordId(NonZeroU64);

impl RecordId {
    /// Wraps a non-zero identifier.
    pub const fn new(id: NonZeroU64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The reconciled state of one tracked file.
///
/// `last_write_time` and `hash` always form a consistent pair once stored:
/// `hash` is the digest of the file's content as of `last_write_time`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Store-assigned identifier; `None` until the record is first persisted.
    pub id: Option<RecordId>,
    /// The tracked file path, unique across the store.
    pub path: PathBuf,
    /// The modification time the engine last reconciled and trusts.
    pub last_write_time: Timestamp,
    /// Content digest matching `last_write_time`.
    pub hash: ContentHash,
}

impl FileRecord {
    /// Creates a record that has not been persisted yet.
    pub fn new(path: impl Into<PathBuf>, last_write_time: Timestamp, hash: ContentHash) -> Self {
        Self {
            id: None,
            path: path.into(),
            last_write_time,
            hash,
        }
    }

    /// Returns the record's path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` once the store has assigned an identifier.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_is_not_persisted() {
        let record = FileRecord::new(
            "src/a.c",
            Timestamp::from_unix_parts(10, 0),
            ContentHash::from_bytes(b"a"),
        );
        assert!(!record.is_persisted());
        assert_eq!(record.path(), Path::new("src/a.c"));
    }

    #[test]
    fn record_id_display() {
        let id = RecordId::new(NonZeroU64::new(42).unwrap());
        assert_eq!(id.to_string(), "42");
        assert_eq!(id.get(), 42);
    }
}
