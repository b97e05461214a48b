//! Per-file summaries and repository maps for Swift sources.
//!
//! The host indexing flow normally represents each file by its tag
//! list; for Swift files that representation is replaced with the
//! structural outline concatenated under the file's path header. The
//! walker here is gitignore-aware and never fails: unreadable files
//! are logged and skipped, and parse failures inside a file degrade to
//! the fail-soft error text from `outline_or_error`.

use crate::outline::outline_or_error;
use ignore::WalkBuilder;
use log::{debug, warn};
use serde::Serialize;
use std::path::Path;

/// One file's entry in a repository map.
#[derive(Debug, Clone, Serialize)]
pub struct MapEntry {
    #[serde(rename = "filePath")]
    pub file_path: String,
    pub outline: String,
}

/// Whether a path names a Swift source file, by extension.
pub fn is_swift_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("swift"))
}

/// Summary for a single already-read file: the outline under the
/// file's path header for Swift sources, `None` for everything else
/// (the caller's normal representation applies).
pub fn summarize_file(path: &Path, content: &str) -> Option<String> {
    if !is_swift_file(path) {
        return None;
    }
    Some(format!("{}:\n{}", path.display(), outline_or_error(content)))
}

/// Walk a directory tree (honoring gitignore rules) and outline every
/// Swift file, in sorted path order. Paths in the result are relative
/// to `root`.
pub fn collect_map(root: &Path) -> Vec<MapEntry> {
    let mut paths = Vec::new();
    for entry in WalkBuilder::new(root).build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("[map] skipping unreadable entry: {err}");
                continue;
            }
        };
        if entry.file_type().is_some_and(|t| t.is_file()) && is_swift_file(entry.path()) {
            paths.push(entry.into_path());
        }
    }
    paths.sort();
    debug!(
        "[map] found {} Swift files under {}",
        paths.len(),
        root.display()
    );

    let mut entries = Vec::new();
    for path in paths {
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                warn!("[map] failed to read {}: {err}", path.display());
                continue;
            }
        };
        let file_path = path
            .strip_prefix(root)
            .unwrap_or(&path)
            .display()
            .to_string();
        entries.push(MapEntry {
            file_path,
            outline: outline_or_error(&content),
        });
    }
    entries
}

/// Render a whole repository map as one string, files separated by
/// blank lines.
pub fn map_directory(root: &Path) -> String {
    collect_map(root)
        .iter()
        .map(|entry| format!("{}:\n{}", entry.file_path, entry.outline))
        .collect::<Vec<_>>()
        .join("\n\n")
}
