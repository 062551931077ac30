//! Path search: regex over the full root-joined path of each walked entry.
use regex::Regex;
use std::path::Path;
use tracing::info;

use crate::config::SearchConfig;
use crate::errors::SearchResult;
use crate::results::MatchRecord;
use crate::walker::{is_dir_entry, is_file_entry, walk_entries};

/// Lists non-ignored regular files whose path matches `pattern`.
///
/// The pattern sees the whole path (`root/sub/name.ext`), not just the file
/// name, so anchor with `/name$` to match a base name. No content is read.
pub fn glob_files(
    root: &Path,
    pattern: &str,
    config: &SearchConfig,
) -> SearchResult<Vec<MatchRecord>> {
    glob_entries(root, pattern, config, EntryKind::File)
}

/// Lists non-ignored directories below `root` whose path matches `pattern`
pub fn glob_directories(
    root: &Path,
    pattern: &str,
    config: &SearchConfig,
) -> SearchResult<Vec<MatchRecord>> {
    glob_entries(root, pattern, config, EntryKind::Directory)
}

#[derive(Debug, Clone, Copy)]
enum EntryKind {
    File,
    Directory,
}

fn glob_entries(
    root: &Path,
    pattern: &str,
    config: &SearchConfig,
    kind: EntryKind,
) -> SearchResult<Vec<MatchRecord>> {
    info!("Globbing {:?} {:?} in {}", kind, pattern, root.display());

    let regex = Regex::new(pattern)?;
    let records: Vec<MatchRecord> = walk_entries(root, config)?
        .filter(|entry| match kind {
            EntryKind::File => is_file_entry(entry),
            EntryKind::Directory => is_dir_entry(entry),
        })
        .filter(|entry| regex.is_match(&entry.path().to_string_lossy()))
        .map(|entry| MatchRecord::path_only(entry.into_path()))
        .collect();

    info!("Glob complete. Found {} paths", records.len());
    Ok(records)
}
