//! Streaming content hashing of source files.

use std::io::Read;
use std::path::Path;

use rewind_common::ContentHash;
use xxhash_rust::xxh3::Xxh3;

/// Read buffer size for streaming a file through the hasher.
const CHUNK_SIZE: usize = 64 * 1024;

/// Utility for computing content hashes of source files.
pub struct SourceHasher;

impl SourceHasher {
    /// Computes the XXH3-64 content hash of a file.
    ///
    /// The file is streamed in fixed-size chunks; the result equals
    /// [`ContentHash::from_bytes`] over the whole content.
    pub fn hash_file(path: &Path) -> std::io::Result<ContentHash> {
        let file = std::fs::File::open(path)?;
        Self::hash_reader(file)
    }

    /// Computes the content hash of everything `reader` yields.
    pub fn hash_reader<R: Read>(mut reader: R) -> std::io::Result<ContentHash> {
        let mut hasher = Xxh3::new();
        let mut buf = vec![0u8; CHUNK_SIZE];
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            hasher.update(&buf[..n]);
        }
        Ok(ContentHash::from_digest(hasher.digest()))
    }
}
