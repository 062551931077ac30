//! Ignore-aware depth-first traversal of a search root.
//!
//! The rule set comes from a single rule file in the root (`.gitignore` by
//! default) plus any extra lines from the config. Nested rule files, global
//! git excludes and hidden-file filtering are deliberately not applied: only
//! the root's rules decide what is skipped.
//!
//! Ignored directories are pruned before they are opened, so nothing below
//! them is ever listed.
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use ignore::{DirEntry, WalkBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, trace, warn};

use crate::config::SearchConfig;
use crate::errors::{SearchError, SearchResult};

/// Gitignore-style rules scoped to one traversal root
#[derive(Debug, Clone)]
pub struct IgnoreMatcher {
    rules: Gitignore,
}

impl IgnoreMatcher {
    /// Loads the root's rule file and the configured extra rules.
    ///
    /// A missing rule file yields no rules. A rule file that fails to parse is
    /// dropped entirely; the extra rules still apply.
    pub fn load(root: &Path, config: &SearchConfig) -> Self {
        let rule_file = root.join(&config.ignore_file);
        let mut builder = GitignoreBuilder::new(root);

        if rule_file.is_file() {
            if let Some(err) = builder.add(&rule_file) {
                warn!(
                    "Ignoring malformed rule file {}: {}",
                    rule_file.display(),
                    err
                );
                builder = GitignoreBuilder::new(root);
            } else {
                debug!("Loaded ignore rules from {}", rule_file.display());
            }
        }

        for line in &config.extra_ignore_patterns {
            if let Err(err) = builder.add_line(None, line) {
                warn!("Skipping invalid ignore pattern '{}': {}", line, err);
            }
        }

        let rules = builder.build().unwrap_or_else(|err| {
            warn!("Failed to build ignore rules for {}: {}", root.display(), err);
            Gitignore::empty()
        });

        Self { rules }
    }

    /// Number of rules loaded
    pub fn len(&self) -> u64 {
        self.rules.num_ignores() + self.rules.num_whitelists()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns true if the root-relative path, or any directory above it, is excluded
    pub fn is_ignored(&self, rel_path: &Path, is_dir: bool) -> bool {
        if rel_path.as_os_str().is_empty() {
            return false;
        }
        self.rules
            .matched_path_or_any_parents(rel_path, is_dir)
            .is_ignore()
    }
}

/// Verifies the root can be opened; the only walk failure that is surfaced.
pub(crate) fn check_root(root: &Path) -> SearchResult<()> {
    let metadata = fs::metadata(root).map_err(|e| SearchError::from_root_io(root, e))?;
    if metadata.is_dir() {
        fs::read_dir(root).map_err(|e| SearchError::from_root_io(root, e))?;
    }
    Ok(())
}

/// Walks every non-ignored entry below `root`, files and directories alike.
///
/// The root directory itself is not yielded; a root that is a file yields
/// that file. Entries that cannot be read are skipped.
pub fn walk_entries(
    root: &Path,
    config: &SearchConfig,
) -> SearchResult<impl Iterator<Item = DirEntry>> {
    check_root(root)?;

    let matcher = Arc::new(IgnoreMatcher::load(root, config));
    debug!(
        "Walking {} with {} ignore rules",
        root.display(),
        matcher.len()
    );

    let prefix: PathBuf = root.to_path_buf();
    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .follow_links(config.follow_links)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            if entry.depth() == 0 {
                return true;
            }
            let rel = entry.path().strip_prefix(&prefix).unwrap_or(entry.path());
            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
            let ignored = matcher.is_ignored(rel, is_dir);
            if ignored {
                trace!("Pruned by ignore rules: {}", rel.display());
            }
            !ignored
        });

    Ok(builder
        .build()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                debug!("Skipping unreadable entry: {}", err);
                None
            }
        })
        .filter(|entry| !(entry.depth() == 0 && is_dir_entry(entry))))
}

/// Walks the regular files below `root`, in depth-first file-name order.
pub fn walk(root: &Path, config: &SearchConfig) -> SearchResult<impl Iterator<Item = PathBuf>> {
    Ok(walk_entries(root, config)?
        .filter(is_file_entry)
        .map(DirEntry::into_path))
}

/// A regular file, or an unfollowed symlink whose target is one
pub(crate) fn is_file_entry(entry: &DirEntry) -> bool {
    match entry.file_type() {
        Some(ft) if ft.is_symlink() => fs::metadata(entry.path()).is_ok_and(|m| m.is_file()),
        Some(ft) => ft.is_file(),
        None => false,
    }
}

pub(crate) fn is_dir_entry(entry: &DirEntry) -> bool {
    entry.file_type().is_some_and(|ft| ft.is_dir())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn relative_files(root: &Path, config: &SearchConfig) -> Vec<String> {
        walk(root, config)
            .unwrap()
            .map(|p| {
                p.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_ignore_matcher_rules() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".gitignore"), "ignored/\n*.bin\n!keep.bin\n").unwrap();

        let matcher = IgnoreMatcher::load(dir.path(), &SearchConfig::default());
        assert!(matcher.is_ignored(Path::new("ignored"), true));
        assert!(matcher.is_ignored(Path::new("ignored/b.txt"), false));
        assert!(matcher.is_ignored(Path::new("c.bin"), false));
        assert!(matcher.is_ignored(Path::new("deep/nested/c.bin"), false));
        assert!(!matcher.is_ignored(Path::new("keep.bin"), false));
        assert!(!matcher.is_ignored(Path::new("a.txt"), false));
        // Trailing-slash rules only apply to directories
        assert!(!matcher.is_ignored(Path::new("ignored"), false));
    }

    #[test]
    fn test_missing_rule_file_is_empty() {
        let dir = tempdir().unwrap();
        let matcher = IgnoreMatcher::load(dir.path(), &SearchConfig::default());
        assert!(matcher.is_empty());
        assert!(!matcher.is_ignored(Path::new("anything.txt"), false));
    }

    #[test]
    fn test_extra_patterns_apply() {
        let dir = tempdir().unwrap();
        let config = SearchConfig {
            extra_ignore_patterns: vec!["vendor/".to_string()],
            ..SearchConfig::default()
        };
        let matcher = IgnoreMatcher::load(dir.path(), &config);
        assert!(matcher.is_ignored(Path::new("vendor/lib.go"), false));
        assert!(!matcher.is_ignored(Path::new("src/lib.go"), false));
    }

    #[test]
    fn test_walk_prunes_and_sorts() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write(root, ".gitignore", "ignored/\n*.bin\n");
        write(root, "b.txt", "b");
        write(root, "a.txt", "a");
        write(root, "ignored/secret.txt", "secret");
        write(root, "sub/c.txt", "c");
        write(root, "sub/d.bin", "d");
        write(root, ".hidden/e.txt", "e");

        let files = relative_files(root, &SearchConfig::default());
        assert_eq!(
            files,
            vec![".gitignore", ".hidden/e.txt", "a.txt", "b.txt", "sub/c.txt"]
        );
    }

    #[test]
    fn test_walk_entries_includes_directories() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write(root, "src/lib.go", "package lib");
        write(root, "build/out.txt", "out");
        write(root, ".gitignore", "build/\n");

        let dirs: Vec<PathBuf> = walk_entries(root, &SearchConfig::default())
            .unwrap()
            .filter(is_dir_entry)
            .map(DirEntry::into_path)
            .collect();
        assert_eq!(dirs, vec![root.join("src")]);
    }

    #[test]
    fn test_walk_missing_root_fails() {
        let result = walk(Path::new("/nonexistent/directory/path"), &SearchConfig::default());
        assert!(matches!(result, Err(SearchError::RootNotFound(_))));
    }

    #[test]
    fn test_walk_file_root_yields_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("single.txt");
        fs::write(&file, "content").unwrap();

        let files: Vec<PathBuf> = walk(&file, &SearchConfig::default()).unwrap().collect();
        assert_eq!(files, vec![file]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_not_followed_by_default() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write(root, "real/file.txt", "x");
        std::os::unix::fs::symlink(root.join("real"), root.join("link")).unwrap();

        let files = relative_files(root, &SearchConfig::default());
        assert_eq!(files, vec!["real/file.txt"]);

        let following = SearchConfig {
            follow_links: true,
            ..SearchConfig::default()
        };
        let files = relative_files(root, &following);
        assert_eq!(files, vec!["link/file.txt", "real/file.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_file_is_walked() {
        let outside = tempdir().unwrap();
        let target = outside.path().join("real.txt");
        fs::write(&target, "hello").unwrap();

        let dir = tempdir().unwrap();
        let root = dir.path();
        write(root, "plain.txt", "x");
        std::os::unix::fs::symlink(&target, root.join("link.txt")).unwrap();
        std::os::unix::fs::symlink(root.join("gone.txt"), root.join("dangling.txt")).unwrap();

        let files = relative_files(root, &SearchConfig::default());
        assert_eq!(files, vec!["link.txt", "plain.txt"]);
    }
}
