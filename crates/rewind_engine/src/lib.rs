//! Timestamp reconciliation for incremental builds.
//!
//! Build systems decide staleness from modification times, so a checkout or a
//! copy that touches a file without changing it triggers a needless rebuild.
//! This crate keeps a ledger of each tracked file's last trusted timestamp and
//! content hash. When a file's timestamp moves forward but its content hash is
//! unchanged, the file's timestamp is rewound to the recorded value.
//!
//! A run has three phases:
//! 1. Load every stored record and index it by path.
//! 2. Classify each snapshot entry as missing, unchanged, new, or needing a recheck.
//! 3. Hash new and rechecked files in parallel, then rewind or update each one.
//!
//! The results are merged once and written back to the [`RecordStore`] in a
//! single batch.
//!
//! [`RecordStore`]: rewind_store::RecordStore

#![warn(missing_docs)]

pub mod classify;
pub mod engine;
pub mod error;
pub mod hasher;
pub mod mtime;
pub mod resolve;
pub mod snapshot;

pub use classify::{classify, Classification, WorkItem};
pub use engine::{Engine, EngineOptions};
pub use error::{EngineError, FileFailure};
pub use hasher::SourceHasher;
pub use resolve::{resolve, Resolution};
pub use rewind_events::RunSummary;
pub use snapshot::{Observed, Snapshot};
