//! A record store held entirely in memory.

use crate::error::StoreError;
use crate::record::{FileRecord, RecordId};
use crate::store::RecordStore;
use crate::table::RecordTable;

/// An in-memory [`RecordStore`].
///
/// Counts every successful insert, update, and delete so callers can verify
/// which runs touched the store.
#[derive(Debug)]
pub struct MemoryStore {
    table: RecordTable,
    writes: usize,
    flushes: usize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            table: RecordTable::new(),
            writes: 0,
            flushes: 0,
        }
    }

    /// Creates a store holding already persisted records.
    ///
    /// Every record must carry a unique id and a unique path.
    pub fn from_records(records: Vec<FileRecord>) -> Result<Self, StoreError> {
        Ok(Self {
            table: RecordTable::from_records(records, 1)?,
            writes: 0,
            flushes: 0,
        })
    }

    /// Returns the number of records held.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }

    /// Returns the number of records written by inserts, updates, and deletes.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Returns the number of times [`flush`](RecordStore::flush) was called.
    pub fn flush_count(&self) -> usize {
        self.flushes
    }
}

impl RecordStore for MemoryStore {
    fn load_all(&self) -> Result<Vec<FileRecord>, StoreError> {
        Ok(self.table.records())
    }

    fn insert_many(&mut self, records: Vec<FileRecord>) -> Result<Vec<RecordId>, StoreError> {
        let ids = self.table.insert_many(records)?;
        self.writes += ids.len();
        Ok(ids)
    }

    fn update(&mut self, record: &FileRecord) -> Result<(), StoreError> {
        self.table.update(record)?;
        self.writes += 1;
        Ok(())
    }

    fn delete(&mut self, id: RecordId) -> Result<(), StoreError> {
        self.table.delete(id)?;
        self.writes += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        self.flushes += 1;
        Ok(())
    }
}
