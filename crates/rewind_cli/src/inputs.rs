//! Collecting the tracked file list handed over by the host build.

use std::io::Read;
use std::path::{Path, PathBuf};

/// Combines paths given as arguments with those read from `files_from`.
///
/// `files_from` of `-` reads standard input.
pub fn collect_tracked(
    files: &[PathBuf],
    files_from: Option<&Path>,
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut tracked = files.to_vec();
    if let Some(list) = files_from {
        let content = if list == Path::new("-") {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        } else {
            std::fs::read_to_string(list)
                .map_err(|e| format!("failed to read file list {}: {e}", list.display()))?
        };
        tracked.extend(parse_list(&content));
    }
    Ok(tracked)
}

/// Parses a newline-separated path list, skipping blank lines and `#` comments.
pub fn parse_list(content: &str) -> Vec<PathBuf> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(PathBuf::from)
        .collect()
}
