//! Error types for record store operations.

use std::path::PathBuf;

use crate::record::RecordId;

/// Errors that can occur while opening, mutating, or persisting a record store.
///
/// Errors from opening or flushing a store are fatal to a run. Errors from a
/// single insert, update, or delete only concern that record.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An I/O error occurred while reading or writing the database file.
    #[error("record store I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The database file has an invalid or missing header.
    #[error("invalid database header in {path}: {reason}")]
    InvalidHeader {
        /// The database file path.
        path: PathBuf,
        /// Description of the header problem.
        reason: String,
    },

    /// The stored checksum does not match the computed checksum of the payload.
    #[error("checksum mismatch in {path}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// The database file path.
        path: PathBuf,
        /// The checksum recorded in the header.
        expected: String,
        /// The checksum computed from the payload.
        actual: String,
    },

    /// The database format version does not match the current version.
    #[error("version mismatch in {path}: expected {expected}, got {actual}")]
    VersionMismatch {
        /// The database file path.
        path: PathBuf,
        /// The expected format version.
        expected: u32,
        /// The format version found in the file.
        actual: u32,
    },

    /// A serialization or deserialization error occurred.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Description of the serialization failure.
        reason: String,
    },

    /// Two records would share the same path.
    #[error("a record for {path} already exists")]
    DuplicatePath {
        /// The contested path.
        path: PathBuf,
    },

    /// Two persisted records share the same identifier.
    #[error("record id {id} is used more than once")]
    DuplicateId {
        /// The repeated identifier.
        id: RecordId,
    },

    /// An update or delete referenced an identifier the store does not hold.
    #[error("unknown record id {id}")]
    UnknownId {
        /// The missing identifier.
        id: RecordId,
    },

    /// An update was given a record that was never persisted.
    #[error("record for {path} has no id")]
    MissingId {
        /// The record's path.
        path: PathBuf,
    },

    /// An insert was given a record that already carries an identifier.
    #[error("record for {path} already has id {id}")]
    AlreadyPersisted {
        /// The record's path.
        path: PathBuf,
        /// The identifier it carries.
        id: RecordId,
    },

    /// The store cannot allocate any more identifiers.
    #[error("record identifiers exhausted")]
    IdsExhausted,
}
