//! In-memory record table shared by the store implementations.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::num::NonZeroU64;
use std::path::PathBuf;

use crate::error::StoreError;
use crate::record::{FileRecord, RecordId};

/// Records indexed by id and by path, plus the next identifier to hand out.
#[derive(Debug)]
pub(crate) struct RecordTable {
    by_id: BTreeMap<RecordId, FileRecord>,
    by_path: HashMap<PathBuf, RecordId>,
    next_id: u64,
}

impl Default for RecordTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordTable {
    pub(crate) fn new() -> Self {
        Self {
            by_id: BTreeMap::new(),
            by_path: HashMap::new(),
            next_id: 1,
        }
    }

    /// Rebuilds a table from persisted records.
    ///
    /// Every record must carry an id, and ids and paths must be unique.
    /// `next_id` is raised above the largest id seen.
    pub(crate) fn from_records(records: Vec<FileRecord>, next_id: u64) -> Result<Self, StoreError> {
        let mut table = Self::new();
        table.next_id = next_id.max(1);
        for record in records {
            let id = record.id.ok_or_else(|| StoreError::MissingId {
                path: record.path.clone(),
            })?;
            if table.by_id.contains_key(&id) {
                return Err(StoreError::DuplicateId { id });
            }
            if table.by_path.contains_key(&record.path) {
                return Err(StoreError::DuplicatePath { path: record.path });
            }
            table.next_id = table.next_id.max(id.get().saturating_add(1));
            table.by_path.insert(record.path.clone(), id);
            table.by_id.insert(id, record);
        }
        Ok(table)
    }

    pub(crate) fn next_id(&self) -> u64 {
        self.next_id
    }

    pub(crate) fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Returns all records ordered by id.
    pub(crate) fn records(&self) -> Vec<FileRecord> {
        self.by_id.values().cloned().collect()
    }

    pub(crate) fn insert_many(
        &mut self,
        records: Vec<FileRecord>,
    ) -> Result<Vec<RecordId>, StoreError> {
        let mut batch_paths = HashSet::with_capacity(records.len());
        for record in &records {
            if let Some(id) = record.id {
                return Err(StoreError::AlreadyPersisted {
                    path: record.path.clone(),
                    id,
                });
            }
            if self.by_path.contains_key(&record.path) || !batch_paths.insert(&record.path) {
                return Err(StoreError::DuplicatePath {
                    path: record.path.clone(),
                });
            }
        }
        let needed = u64::try_from(records.len()).map_err(|_| StoreError::IdsExhausted)?;
        if self.next_id.checked_add(needed).is_none() {
            return Err(StoreError::IdsExhausted);
        }

        let mut ids = Vec::with_capacity(records.len());
        for mut record in records {
            let id = NonZeroU64::new(self.next_id)
                .map(RecordId::new)
                .ok_or(StoreError::IdsExhausted)?;
            self.next_id += 1;
            record.id = Some(id);
            self.by_path.insert(record.path.clone(), id);
            self.by_id.insert(id, record);
            ids.push(id);
        }
        Ok(ids)
    }

    pub(crate) fn update(&mut self, record: &FileRecord) -> Result<(), StoreError> {
        let id = record.id.ok_or_else(|| StoreError::MissingId {
            path: record.path.clone(),
        })?;
        let existing = self.by_id.get(&id).ok_or(StoreError::UnknownId { id })?;
        if existing.path != record.path {
            if self.by_path.contains_key(&record.path) {
                return Err(StoreError::DuplicatePath {
                    path: record.path.clone(),
                });
            }
            self.by_path.remove(&existing.path);
            self.by_path.insert(record.path.clone(), id);
        }
        self.by_id.insert(id, record.clone());
        Ok(())
    }

    pub(crate) fn delete(&mut self, id: RecordId) -> Result<(), StoreError> {
        let removed = self.by_id.remove(&id).ok_or(StoreError::UnknownId { id })?;
        self.by_path.remove(&removed.path);
        Ok(())
    }
}
