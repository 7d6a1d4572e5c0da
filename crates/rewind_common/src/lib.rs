//! Shared value types used across the rewind workspace.
//!
//! This crate provides the 64-bit [`ContentHash`] used to decide whether a
//! file's bytes really changed, and the timezone-independent [`Timestamp`]
//! used for every modification-time comparison and for storage.

#![warn(missing_docs)]

pub mod hash;
pub mod timestamp;

pub use hash::ContentHash;
pub use timestamp::Timestamp;
