//! The record store contract required by the reconciliation engine.

use crate::error::StoreError;
use crate::record::{FileRecord, RecordId};

/// A path-keyed collection of [`FileRecord`]s.
///
/// A store is owned by a single run at a time; no cross-process locking is
/// implied. Mutations may be buffered until [`flush`](Self::flush), which is
/// the single durable write at the end of a run.
pub trait RecordStore {
    /// Returns every stored record, each carrying its identifier.
    fn load_all(&self) -> Result<Vec<FileRecord>, StoreError>;

    /// Inserts records that have no identifier yet and returns the assigned ids
    /// in input order.
    ///
    /// The batch is all-or-nothing: if any record is rejected, none is inserted.
    fn insert_many(&mut self, records: Vec<FileRecord>) -> Result<Vec<RecordId>, StoreError>;

    /// Replaces the stored record with the same identifier.
    fn update(&mut self, record: &FileRecord) -> Result<(), StoreError>;

    /// Removes the record with the given identifier.
    fn delete(&mut self, id: RecordId) -> Result<(), StoreError>;

    /// Durably persists all pending mutations.
    fn flush(&mut self) -> Result<(), StoreError>;
}
