//! Persistent ledger of reconciled file timestamps and content hashes.
//!
//! The store maps each tracked path to a [`FileRecord`] holding the last
//! modification time the engine trusts and the digest of the content that
//! produced it. [`RecordStore`] is the contract the engine needs;
//! [`DbFileStore`] keeps the ledger in a single checksummed database file and
//! [`MemoryStore`] keeps it in memory.

#![warn(missing_docs)]

pub mod db_file;
pub mod error;
pub mod memory;
pub mod record;
pub mod store;
mod table;

pub use db_file::{default_database_path, DbFileStore, DATABASE_EXTENSION};
pub use error::StoreError;
pub use memory::MemoryStore;
pub use record::{FileRecord, RecordId};
pub use store::RecordStore;
