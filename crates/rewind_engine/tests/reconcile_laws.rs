//! End-to-end reconciliation runs against real files.
//!
//! Each test lays out source files in a scratch directory, pins their
//! modification times, and checks the on-disk timestamps and the stored
//! records after one or more runs.

use std::path::{Path, PathBuf};

use rewind_common::{ContentHash, Timestamp};
use rewind_engine::mtime::{read_mtime, set_mtime};
use rewind_engine::{Engine, EngineOptions, RunSummary, Snapshot};
use rewind_events::{Event, MemorySink, NullSink};
use rewind_store::{DbFileStore, FileRecord, MemoryStore, RecordStore};
use tempfile::TempDir;

const T0: i64 = 1_600_000_000;
const T1: i64 = 1_600_000_500;
const T2: i64 = 1_600_001_000;

fn ts(secs: i64) -> Timestamp {
    Timestamp::from_unix_parts(secs, 0)
}

fn write(dir: &Path, name: &str, content: &str, secs: i64) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    set_mtime(&path, ts(secs)).unwrap();
    path
}

fn run(paths: &[&PathBuf], store: &mut impl RecordStore) -> RunSummary {
    Engine::new(&NullSink, EngineOptions::default())
        .reconcile(&Snapshot::capture(paths.iter().copied()), store)
        .unwrap()
}

fn record_for(store: &impl RecordStore, path: &Path) -> Option<FileRecord> {
    store
        .load_all()
        .unwrap()
        .into_iter()
        .find(|r| r.path == path)
}

/// A store holding `{a.c, T0, hash(content)}` for a file now stamped `T1`.
fn seeded_a(dir: &TempDir, stored_content: &str, current_content: &str) -> (PathBuf, MemoryStore) {
    let a = write(dir.path(), "a.c", current_content, T1);
    let mut store = MemoryStore::new();
    store
        .insert_many(vec![FileRecord::new(
            &a,
            ts(T0),
            ContentHash::from_bytes(stored_content.as_bytes()),
        )])
        .unwrap();
    (a, store)
}

#[test]
fn touched_but_unchanged_file_is_rewound() {
    let dir = tempfile::tempdir().unwrap();
    let (a, mut store) = seeded_a(&dir, "int a;", "int a;");
    let before = record_for(&store, &a).unwrap();
    let writes_before = store.write_count();

    let summary = run(&[&a], &mut store);

    assert_eq!(summary.rewound, 1);
    assert_eq!(read_mtime(&a).unwrap(), ts(T0));
    assert_eq!(record_for(&store, &a), Some(before));
    assert_eq!(store.write_count(), writes_before);
}

#[test]
fn changed_file_updates_record_and_keeps_timestamp() {
    let dir = tempfile::tempdir().unwrap();
    let (a, mut store) = seeded_a(&dir, "int a;", "int a = 42;");
    let id = record_for(&store, &a).unwrap().id;

    let summary = run(&[&a], &mut store);

    assert_eq!(summary.updated, 1);
    assert_eq!(read_mtime(&a).unwrap(), ts(T1));
    let record = record_for(&store, &a).unwrap();
    assert_eq!(record.id, id);
    assert_eq!(record.last_write_time, ts(T1));
    assert_eq!(record.hash, ContentHash::from_bytes(b"int a = 42;"));
}

#[test]
fn untracked_record_is_deleted() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.c", "int a;", T0);
    let b = write(dir.path(), "b.c", "int b;", T0);

    let mut store = MemoryStore::new();
    run(&[&a, &b], &mut store);
    assert_eq!(store.len(), 2);

    let summary = run(&[&a], &mut store);

    assert_eq!(summary.deleted, 1);
    assert!(record_for(&store, &b).is_none());
    assert!(record_for(&store, &a).is_some());
}

#[test]
fn new_file_gets_record() {
    let dir = tempfile::tempdir().unwrap();
    let c = write(dir.path(), "c.c", "int c;", T2);

    let mut store = MemoryStore::new();
    let summary = run(&[&c], &mut store);

    assert_eq!(summary.created, 1);
    let record = record_for(&store, &c).unwrap();
    assert!(record.id.is_some());
    assert_eq!(record.last_write_time, ts(T2));
    assert_eq!(record.hash, ContentHash::from_bytes(b"int c;"));
}

#[test]
fn unchanged_timestamp_skips_hashing_and_writes() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.c", "int a;", T0);
    let mut store = MemoryStore::new();
    run(&[&a], &mut store);
    let writes = store.write_count();

    // Content changes but the timestamp is pinned back to the recorded value.
    std::fs::write(&a, "int a = 1;").unwrap();
    set_mtime(&a, ts(T0)).unwrap();

    let sink = MemorySink::new();
    let summary = Engine::new(&sink, EngineOptions::default())
        .reconcile(&Snapshot::capture([&a]), &mut store)
        .unwrap();

    assert_eq!(summary.unchanged, 1);
    assert_eq!(summary.hashed(), 0);
    assert_eq!(store.write_count(), writes);
    assert_eq!(
        record_for(&store, &a).unwrap().hash,
        ContentHash::from_bytes(b"int a;")
    );
    assert!(!sink.events().iter().any(|e| matches!(
        e,
        Event::Created { .. } | Event::Updated { .. } | Event::Rewound { .. }
    )));
}

#[test]
fn second_run_without_changes_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.c", "int a;", T0);
    let b = write(dir.path(), "b.c", "int b;", T1);

    let mut store = MemoryStore::new();
    run(&[&a, &b], &mut store);
    let records = store.load_all().unwrap();
    let writes = store.write_count();

    let summary = run(&[&a, &b], &mut store);

    assert_eq!(summary.unchanged, 2);
    assert_eq!(summary.rewound, 0);
    assert_eq!(store.write_count(), writes);
    assert_eq!(store.load_all().unwrap(), records);
    assert_eq!(read_mtime(&a).unwrap(), ts(T0));
    assert_eq!(read_mtime(&b).unwrap(), ts(T1));
}

#[test]
fn rewound_file_is_unchanged_on_next_run() {
    let dir = tempfile::tempdir().unwrap();
    let (a, mut store) = seeded_a(&dir, "int a;", "int a;");

    assert_eq!(run(&[&a], &mut store).rewound, 1);
    let summary = run(&[&a], &mut store);
    assert_eq!(summary.unchanged, 1);
    assert_eq!(summary.rewound, 0);
}

#[test]
fn missing_file_loses_its_record() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.c", "int a;", T0);
    let mut store = MemoryStore::new();
    run(&[&a], &mut store);

    std::fs::remove_file(&a).unwrap();
    let summary = run(&[&a], &mut store);

    assert_eq!(summary.missing, 1);
    assert_eq!(summary.deleted, 1);
    assert!(store.is_empty());
}

#[test]
fn failing_file_does_not_abort_siblings() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.c", "int a;", T0);
    let broken = dir.path().join("broken.c");
    std::fs::create_dir(&broken).unwrap();

    let mut snapshot = Snapshot::capture([&a]);
    snapshot.insert(&broken, ts(T0));

    let sink = MemorySink::new();
    let mut store = MemoryStore::new();
    let summary = Engine::new(&sink, EngineOptions::default())
        .reconcile(&snapshot, &mut store)
        .unwrap();

    assert_eq!(summary.created, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(sink.error_count(), 1);
    assert!(record_for(&store, &a).is_some());
    assert!(record_for(&store, &broken).is_none());
}

#[test]
fn mixed_run_against_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("app.hashdb");
    let a = write(dir.path(), "a.c", "int a;", T0);
    let b = write(dir.path(), "b.c", "int b;", T0);
    let d = write(dir.path(), "d.c", "int d;", T0);

    {
        let mut store = DbFileStore::open(&db).unwrap();
        let summary = run(&[&a, &b, &d], &mut store);
        assert_eq!(summary.created, 3);
    }

    // a.c touched, b.c edited, d.c dropped from the build, c.c added.
    set_mtime(&a, ts(T1)).unwrap();
    std::fs::write(&b, "int b = 2;").unwrap();
    set_mtime(&b, ts(T1)).unwrap();
    let c = write(dir.path(), "c.c", "int c;", T2);

    {
        let mut store = DbFileStore::open(&db).unwrap();
        let summary = run(&[&a, &b, &c], &mut store);
        assert_eq!(summary.rewound, 1);
        assert_eq!(summary.updated, 1);
        assert_eq!(summary.created, 1);
        assert_eq!(summary.deleted, 1);
    }

    let store = DbFileStore::open(&db).unwrap();
    assert_eq!(store.len(), 3);
    assert_eq!(read_mtime(&a).unwrap(), ts(T0));
    assert_eq!(record_for(&store, &a).unwrap().last_write_time, ts(T0));
    assert_eq!(record_for(&store, &b).unwrap().last_write_time, ts(T1));
    assert_eq!(record_for(&store, &c).unwrap().last_write_time, ts(T2));
    assert!(record_for(&store, &d).is_none());
}

#[test]
fn corrupt_database_aborts_before_touching_files() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("app.hashdb");
    std::fs::write(&db, b"definitely not a database").unwrap();
    let a = write(dir.path(), "a.c", "int a;", T1);

    assert!(DbFileStore::open(&db).is_err());
    assert_eq!(read_mtime(&a).unwrap(), ts(T1));
}
