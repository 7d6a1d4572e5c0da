//! Error types for reconciliation runs.

use std::path::PathBuf;

use rewind_events::{Event, FileOperation};
use rewind_store::StoreError;

/// A run-fatal failure.
///
/// Only the record store can abort a run. Per-file problems are reported as
/// [`FileFailure`]s and events instead.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The record store could not be read or written.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// An I/O failure confined to one tracked file.
#[derive(Debug, thiserror::Error)]
#[error("I/O error {operation} {}: {source}", path.display())]
pub struct FileFailure {
    /// The tracked path.
    pub path: PathBuf,
    /// What was being done when the error occurred.
    pub operation: FileOperation,
    /// The underlying I/O error.
    pub source: std::io::Error,
}

impl FileFailure {
    /// Creates a failure for `path`.
    pub fn new(path: impl Into<PathBuf>, operation: FileOperation, source: std::io::Error) -> Self {
        Self {
            path: path.into(),
            operation,
            source,
        }
    }

    /// Converts the failure into the event that reports it.
    pub fn to_event(&self) -> Event {
        Event::FileFailed {
            path: self.path.clone(),
            operation: self.operation,
            reason: self.source.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_failure_display() {
        let failure = FileFailure::new(
            "src/a.c",
            FileOperation::Hash,
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(failure.to_string(), "I/O error hashing src/a.c: denied");
    }

    #[test]
    fn file_failure_event() {
        let failure = FileFailure::new(
            "src/a.c",
            FileOperation::Rewind,
            std::io::Error::new(std::io::ErrorKind::Other, "read-only"),
        );
        match failure.to_event() {
            Event::FileFailed {
                path,
                operation,
                reason,
            } => {
                assert_eq!(path, PathBuf::from("src/a.c"));
                assert_eq!(operation, FileOperation::Rewind);
                assert_eq!(reason, "read-only");
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn store_error_is_transparent() {
        let err = EngineError::from(StoreError::IdsExhausted);
        assert_eq!(err.to_string(), "record identifiers exhausted");
    }
}
