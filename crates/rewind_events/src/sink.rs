//! Injected event sinks.

use crate::event::Event;
use crate::severity::Severity;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Receives events emitted during a run.
///
/// Sinks are shared with the worker threads that resolve files in parallel,
/// so implementations must be `Send + Sync` and tolerate concurrent `emit`
/// calls. Ordering between events of different files is unspecified.
pub trait EventSink: Send + Sync {
    /// Delivers a single event.
    fn emit(&self, event: Event);
}

impl<S: EventSink + ?Sized> EventSink for &S {
    fn emit(&self, event: Event) {
        (**self).emit(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for Arc<S> {
    fn emit(&self, event: Event) {
        (**self).emit(event);
    }
}

/// A sink that discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: Event) {}
}

/// A thread-safe accumulator for events.
///
/// The error count is tracked atomically for fast `has_errors` checks without
/// locking the event vector.
pub struct MemorySink {
    events: Mutex<Vec<Event>>,
    error_count: AtomicUsize,
}

impl MemorySink {
    /// Creates a new empty sink.
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            error_count: AtomicUsize::new(0),
        }
    }

    /// Returns `true` if any error-severity events have been emitted.
    pub fn has_errors(&self) -> bool {
        self.error_count.load(Ordering::Relaxed) > 0
    }

    /// Returns the number of error-severity events emitted so far.
    pub fn error_count(&self) -> usize {
        self.error_count.load(Ordering::Relaxed)
    }

    /// Takes all accumulated events, leaving the sink empty.
    pub fn take_all(&self) -> Vec<Event> {
        let mut events = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *events)
    }

    /// Returns a snapshot of all accumulated events without draining.
    pub fn events(&self) -> Vec<Event> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the accumulated events at or above `min` severity.
    pub fn at_least(&self, min: Severity) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|event| event.severity() >= min)
            .collect()
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: Event) {
        if event.severity() == Severity::Error {
            self.error_count.fetch_add(1, Ordering::Relaxed);
        }
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::FileOperation;
    use std::path::PathBuf;

    fn make_error() -> Event {
        Event::FileFailed {
            path: PathBuf::from("a.c"),
            operation: FileOperation::Hash,
            reason: "denied".to_string(),
        }
    }

    fn make_detail() -> Event {
        Event::Missing {
            path: PathBuf::from("b.c"),
        }
    }

    #[test]
    fn empty_sink() {
        let sink = MemorySink::new();
        assert!(!sink.has_errors());
        assert_eq!(sink.error_count(), 0);
        assert!(sink.take_all().is_empty());
    }

    #[test]
    fn emit_error() {
        let sink = MemorySink::new();
        sink.emit(make_error());
        assert!(sink.has_errors());
        assert_eq!(sink.error_count(), 1);
    }

    #[test]
    fn emit_detail_not_error() {
        let sink = MemorySink::new();
        sink.emit(make_detail());
        assert!(!sink.has_errors());
        assert_eq!(sink.events().len(), 1);
    }

    #[test]
    fn at_least_filters() {
        let sink = MemorySink::new();
        sink.emit(make_detail());
        sink.emit(make_error());
        assert_eq!(sink.at_least(Severity::Warning), vec![make_error()]);
        assert_eq!(sink.at_least(Severity::Detail).len(), 2);
    }

    #[test]
    fn take_all_drains() {
        let sink = MemorySink::new();
        sink.emit(make_error());
        sink.emit(make_detail());
        assert_eq!(sink.take_all().len(), 2);
        assert!(sink.take_all().is_empty());
        // The counter survives draining.
        assert_eq!(sink.error_count(), 1);
    }

    #[test]
    fn shared_through_references() {
        let sink = Arc::new(MemorySink::new());
        let by_ref: &dyn EventSink = &sink;
        by_ref.emit(make_detail());
        NullSink.emit(make_error());
        assert_eq!(sink.events().len(), 1);
    }

    #[test]
    fn thread_safety() {
        use std::thread;

        let sink = Arc::new(MemorySink::new());
        let mut handles = Vec::new();

        for _ in 0..8 {
            let sink = Arc::clone(&sink);
            handles.push(thread::spawn(move || {
                for _ in 0..50 {
                    sink.emit(make_error());
                }
            }));
        }

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(sink.error_count(), 400);
        assert_eq!(sink.events().len(), 400);
    }
}
