//! Single-file embedded record database.
//!
//! The whole collection lives in one file next to the build description. The
//! file starts with a 4-byte little-endian header length, followed by a
//! bincode-encoded [`DbHeader`] and the bincode-encoded record payload. The
//! header carries magic bytes, a format version, the next identifier to
//! allocate, and a checksum of the payload.

use std::path::{Path, PathBuf};

use rewind_common::ContentHash;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::record::{FileRecord, RecordId};
use crate::store::RecordStore;
use crate::table::RecordTable;

/// File extension of record databases derived from a build file.
pub const DATABASE_EXTENSION: &str = "hashdb";

/// Magic bytes identifying a rewind record database.
const DB_MAGIC: [u8; 4] = *b"RWND";

/// Current database format version. Increment on breaking changes to
/// the header or payload format.
const DB_FORMAT_VERSION: u32 = 1;

/// Header prepended to the record payload for validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DbHeader {
    /// Magic bytes: must be `b"RWND"`.
    magic: [u8; 4],

    /// Database format version.
    format_version: u32,

    /// The next identifier the store will hand out.
    next_id: u64,

    /// Content hash of the payload bytes.
    checksum: ContentHash,
}

/// Returns the default database location for a build-description file.
///
/// The build file's extension is replaced with [`DATABASE_EXTENSION`], so
/// `app.vcxproj` maps to `app.hashdb`. A file without an extension gets one
/// appended.
pub fn default_database_path(build_file: &Path) -> PathBuf {
    build_file.with_extension(DATABASE_EXTENSION)
}

/// A [`RecordStore`] persisted to a single database file.
///
/// The file is read once on [`open`](Self::open); mutations are applied in
/// memory and written back by [`flush`](RecordStore::flush) through a
/// temporary sibling file that is renamed over the database.
#[derive(Debug)]
pub struct DbFileStore {
    path: PathBuf,
    table: RecordTable,
    dirty: bool,
}

impl DbFileStore {
    /// Opens the database at `path`.
    ///
    /// A missing or zero-length file yields an empty store. Any other read
    /// failure, or a file that fails header, version, or checksum validation,
    /// is an error.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let raw = match std::fs::read(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(StoreError::Io {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };

        let table = if raw.is_empty() {
            RecordTable::new()
        } else {
            decode(path, &raw)?
        };

        Ok(Self {
            path: path.to_path_buf(),
            table,
            dirty: false,
        })
    }

    /// Returns the database file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the number of records held.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }

    /// Returns `true` if there are mutations not yet flushed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl RecordStore for DbFileStore {
    fn load_all(&self) -> Result<Vec<FileRecord>, StoreError> {
        Ok(self.table.records())
    }

    fn insert_many(&mut self, records: Vec<FileRecord>) -> Result<Vec<RecordId>, StoreError> {
        let ids = self.table.insert_many(records)?;
        self.dirty |= !ids.is_empty();
        Ok(ids)
    }

    fn update(&mut self, record: &FileRecord) -> Result<(), StoreError> {
        self.table.update(record)?;
        self.dirty = true;
        Ok(())
    }

    fn delete(&mut self, id: RecordId) -> Result<(), StoreError> {
        self.table.delete(id)?;
        self.dirty = true;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        if !self.dirty {
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let bytes = encode(&self.table)?;
        let temp = self.temp_path();
        std::fs::write(&temp, &bytes).map_err(|e| StoreError::Io {
            path: temp.clone(),
            source: e,
        })?;
        std::fs::rename(&temp, &self.path).map_err(|e| StoreError::Io {
            path: self.path.clone(),
            source: e,
        })?;

        self.dirty = false;
        Ok(())
    }
}

fn encode(table: &RecordTable) -> Result<Vec<u8>, StoreError> {
    let payload = bincode::serde::encode_to_vec(table.records(), bincode::config::standard())
        .map_err(|e| StoreError::Serialization {
            reason: e.to_string(),
        })?;

    let header = DbHeader {
        magic: DB_MAGIC,
        format_version: DB_FORMAT_VERSION,
        next_id: table.next_id(),
        checksum: ContentHash::from_bytes(&payload),
    };
    let header_bytes = bincode::serde::encode_to_vec(&header, bincode::config::standard())
        .map_err(|e| StoreError::Serialization {
            reason: e.to_string(),
        })?;

    // Write: 4-byte header length (little-endian) + header + payload
    let header_len = u32::try_from(header_bytes.len()).map_err(|_| StoreError::Serialization {
        reason: "database header too large".to_string(),
    })?;
    let mut output = Vec::with_capacity(4 + header_bytes.len() + payload.len());
    output.extend_from_slice(&header_len.to_le_bytes());
    output.extend_from_slice(&header_bytes);
    output.extend_from_slice(&payload);
    Ok(output)
}

fn decode(path: &Path, raw: &[u8]) -> Result<RecordTable, StoreError> {
    let invalid = |reason: &str| StoreError::InvalidHeader {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    let len_bytes: [u8; 4] = raw
        .get(..4)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| invalid("file too short for header length"))?;
    let header_len = u32::from_le_bytes(len_bytes) as usize;
    let header_bytes = raw
        .get(4..4 + header_len)
        .ok_or_else(|| invalid("file too short for header"))?;

    let (header, _): (DbHeader, usize) =
        bincode::serde::decode_from_slice(header_bytes, bincode::config::standard())
            .map_err(|e| invalid(&e.to_string()))?;

    if header.magic != DB_MAGIC {
        return Err(invalid("missing magic bytes"));
    }
    if header.format_version != DB_FORMAT_VERSION {
        return Err(StoreError::VersionMismatch {
            path: path.to_path_buf(),
            expected: DB_FORMAT_VERSION,
            actual: header.format_version,
        });
    }

    let payload = &raw[4 + header_len..];
    let actual = ContentHash::from_bytes(payload);
    if actual != header.checksum {
        return Err(StoreError::ChecksumMismatch {
            path: path.to_path_buf(),
            expected: header.checksum.to_string(),
            actual: actual.to_string(),
        });
    }

    let (records, _): (Vec<FileRecord>, usize) =
        bincode::serde::decode_from_slice(payload, bincode::config::standard()).map_err(|e| {
            StoreError::Serialization {
                reason: e.to_string(),
            }
        })?;

    RecordTable::from_records(records, header.next_id)
}
