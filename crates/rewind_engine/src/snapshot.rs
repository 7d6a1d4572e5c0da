//! The per-run snapshot of tracked files and their observed timestamps.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rewind_common::Timestamp;

use crate::mtime;

/// What was observed for one tracked path when the snapshot was taken.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Observed {
    /// The file exists with this modification time.
    Present(Timestamp),
    /// The file does not exist.
    Missing,
    /// The file's metadata could not be read.
    Unreadable(String),
}

/// Tracked paths mapped to their observed state, ordered by path.
///
/// A path appears at most once; inserting it again replaces the earlier
/// observation.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    entries: BTreeMap<PathBuf, Observed>,
}

impl Snapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a snapshot by reading the modification time of each path.
    pub fn capture<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut snapshot = Self::new();
        for path in paths {
            let path = path.into();
            let observed = match mtime::read_mtime(&path) {
                Ok(ts) => Observed::Present(ts),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Observed::Missing,
                Err(e) => Observed::Unreadable(e.to_string()),
            };
            snapshot.entries.insert(path, observed);
        }
        snapshot
    }

    /// Records an observed timestamp supplied by the caller.
    pub fn insert(&mut self, path: impl Into<PathBuf>, observed: Timestamp) {
        self.entries.insert(path.into(), Observed::Present(observed));
    }

    /// Records a tracked path that does not exist.
    pub fn insert_missing(&mut self, path: impl Into<PathBuf>) {
        self.entries.insert(path.into(), Observed::Missing);
    }

    /// Records a tracked path whose metadata could not be read.
    pub fn insert_unreadable(&mut self, path: impl Into<PathBuf>, reason: impl Into<String>) {
        self.entries
            .insert(path.into(), Observed::Unreadable(reason.into()));
    }

    /// Returns the observation for `path`.
    pub fn get(&self, path: &Path) -> Option<&Observed> {
        self.entries.get(path)
    }

    /// Returns `true` if `path` is tracked.
    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    /// Number of distinct tracked paths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &Observed)> {
        self.entries.iter().map(|(p, o)| (p.as_path(), o))
    }
}

impl<P: Into<PathBuf>> FromIterator<(P, Timestamp)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (P, Timestamp)>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for (path, observed) in iter {
            snapshot.insert(path, observed);
        }
        snapshot
    }
}
