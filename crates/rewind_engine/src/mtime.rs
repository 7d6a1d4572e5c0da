//! Reading and writing file modification times as [`Timestamp`]s.

use std::path::Path;

use filetime::FileTime;
use rewind_common::Timestamp;

/// Converts a `filetime` value into a [`Timestamp`].
pub fn from_file_time(time: FileTime) -> Timestamp {
    Timestamp::from_unix_parts(time.unix_seconds(), time.nanoseconds())
}

/// Converts a [`Timestamp`] into a `filetime` value.
pub fn to_file_time(timestamp: Timestamp) -> FileTime {
    FileTime::from_unix_time(timestamp.unix_seconds(), timestamp.subsec_nanos())
}

/// Reads the last modification time of `path`, following symlinks.
pub fn read_mtime(path: &Path) -> std::io::Result<Timestamp> {
    let metadata = std::fs::metadata(path)?;
    Ok(from_file_time(FileTime::from_last_modification_time(&metadata)))
}

/// Sets the last modification time of `path`, leaving the access time alone.
pub fn set_mtime(path: &Path, timestamp: Timestamp) -> std::io::Result<()> {
    filetime::set_file_mtime(path, to_file_time(timestamp))
}
