//! Structured run events, severity levels, and the sinks that receive them.
//!
//! The reconciliation engine never writes to a global logger. It emits typed
//! [`Event`]s into an injected [`EventSink`]; the caller decides what to keep,
//! how verbose to be, and how to format. [`MemorySink`] accumulates events for
//! inspection.

#![warn(missing_docs)]

pub mod event;
pub mod severity;
pub mod sink;
pub mod summary;

pub use event::{Event, FileOperation};
pub use severity::Severity;
pub use sink::{EventSink, MemorySink, NullSink};
pub use summary::RunSummary;
