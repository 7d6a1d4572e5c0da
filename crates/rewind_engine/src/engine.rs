//! The reconciliation run orchestrator.

use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use rewind_events::{Event, EventSink, RunSummary};
use rewind_store::{FileRecord, RecordStore};

use crate::classify::{classify, index_by_path, WorkItem};
use crate::error::EngineError;
use crate::mtime;
use crate::resolve::{resolve_with, Resolution, SetMtime};
use crate::snapshot::Snapshot;

/// Scheduling options for phase three.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineOptions {
    /// Worker count; `None` uses one worker per CPU.
    pub jobs: Option<NonZeroUsize>,
    /// `false` resolves files one at a time on the calling thread.
    pub parallel: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            jobs: None,
            parallel: true,
        }
    }
}

/// Reconciles a snapshot of tracked files against a record store.
///
/// The engine holds no state between runs. Everything it reports goes to the
/// injected [`EventSink`].
pub struct Engine<'s> {
    sink: &'s dyn EventSink,
    options: EngineOptions,
    set_mtime: SetMtime,
}

impl<'s> Engine<'s> {
    /// Creates an engine reporting to `sink`.
    pub fn new(sink: &'s dyn EventSink, options: EngineOptions) -> Self {
        Self {
            sink,
            options,
            set_mtime: mtime::set_mtime,
        }
    }

    #[cfg(test)]
    fn with_set_mtime(mut self, set_mtime: SetMtime) -> Self {
        self.set_mtime = set_mtime;
        self
    }

    /// Runs all three phases and persists the result.
    ///
    /// Only store failures abort the run, and a failed load aborts it before
    /// any file is touched. Per-file I/O failures exclude that file's record
    /// and are reported as events.
    pub fn reconcile<S>(&self, snapshot: &Snapshot, store: &mut S) -> Result<RunSummary, EngineError>
    where
        S: RecordStore + ?Sized,
    {
        let started = Instant::now();

        // Phase 1: load and key by path
        let stored = index_by_path(store.load_all()?);

        // Phase 2: classify
        let classification = classify(snapshot, &stored, self.sink);

        let mut summary = RunSummary {
            tracked: snapshot.len(),
            missing: classification.missing.len(),
            unchanged: classification.unchanged.len(),
            unreadable: classification.unreadable.len(),
            ..RunSummary::default()
        };

        // Phase 3: resolve new and rechecked files
        let resolutions = self.resolve_all(classification.pending);

        let mut kept: HashSet<PathBuf> = classification
            .unchanged
            .iter()
            .map(|r| r.path.clone())
            .collect();
        let mut created = Vec::new();
        let mut updated = Vec::new();
        for resolution in resolutions {
            match resolution {
                Resolution::Created(record) => {
                    summary.created += 1;
                    kept.insert(record.path.clone());
                    created.push(record);
                }
                Resolution::Updated(record) => {
                    summary.updated += 1;
                    kept.insert(record.path.clone());
                    updated.push(record);
                }
                Resolution::Rewound(record) => {
                    summary.rewound += 1;
                    kept.insert(record.path);
                }
                Resolution::Failed(_) => summary.failed += 1,
            }
        }

        // Finalization
        self.delete_stale(store, &stored, &kept, &mut summary);
        for record in &updated {
            if let Err(e) = store.update(record) {
                self.store_write_failed(&record.path, &e, &mut summary);
            }
        }
        self.insert_created(store, created, &mut summary);
        store.flush()?;

        summary.elapsed = started.elapsed();
        self.sink.emit(Event::RunFinished {
            summary: summary.clone(),
        });
        Ok(summary)
    }

    fn resolve_all(&self, pending: Vec<WorkItem>) -> Vec<Resolution> {
        if !self.options.parallel || pending.len() < 2 {
            return self.resolve_sequential(pending);
        }

        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(jobs) = self.options.jobs {
            builder = builder.num_threads(jobs.get());
        }
        match builder.build() {
            Ok(pool) => {
                let (sink, set_mtime) = (self.sink, self.set_mtime);
                pool.install(|| {
                    pending
                        .into_par_iter()
                        .map(|item| resolve_with(item, sink, set_mtime))
                        .collect()
                })
            }
            Err(e) => {
                self.sink.emit(Event::SequentialFallback {
                    reason: e.to_string(),
                });
                self.resolve_sequential(pending)
            }
        }
    }

    fn resolve_sequential(&self, pending: Vec<WorkItem>) -> Vec<Resolution> {
        pending
            .into_iter()
            .map(|item| resolve_with(item, self.sink, self.set_mtime))
            .collect()
    }

    /// Deletes every stored record whose path was not carried into the new state.
    fn delete_stale<S>(
        &self,
        store: &mut S,
        stored: &HashMap<PathBuf, FileRecord>,
        kept: &HashSet<PathBuf>,
        summary: &mut RunSummary,
    ) where
        S: RecordStore + ?Sized,
    {
        let mut stale: Vec<&FileRecord> = stored
            .values()
            .filter(|r| !kept.contains(&r.path))
            .collect();
        stale.sort_by(|a, b| a.path.cmp(&b.path));

        for record in stale {
            let Some(id) = record.id else {
                continue;
            };
            match store.delete(id) {
                Ok(()) => {
                    summary.deleted += 1;
                    self.sink.emit(Event::RecordDeleted {
                        path: record.path.clone(),
                    });
                }
                Err(e) => self.store_write_failed(&record.path, &e, summary),
            }
        }
    }

    /// Inserts new records as one batch, retrying one by one if the batch is rejected.
    fn insert_created<S>(&self, store: &mut S, created: Vec<FileRecord>, summary: &mut RunSummary)
    where
        S: RecordStore + ?Sized,
    {
        if created.is_empty() || store.insert_many(created.clone()).is_ok() {
            return;
        }
        for record in created {
            let path = record.path.clone();
            if let Err(e) = store.insert_many(vec![record]) {
                self.store_write_failed(&path, &e, summary);
            }
        }
    }

    fn store_write_failed(
        &self,
        path: &Path,
        error: &rewind_store::StoreError,
        summary: &mut RunSummary,
    ) {
        summary.store_write_failures += 1;
        self.sink.emit(Event::StoreWriteFailed {
            path: path.to_path_buf(),
            reason: error.to_string(),
        });
    }
}
