//! In-place textual and symbol-scoped replacement.
//!
//! Each file is read whole, rewritten line by line in memory, and written
//! back only if some line changed. There is no backup, dry run or atomic
//! rename; a crash mid-write can leave a file partially rewritten.
use std::borrow::Cow;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn};

use crate::config::SearchConfig;
use crate::errors::{SearchError, SearchResult};
use crate::filters::is_binary_file;
use crate::results::ChangeRecord;
use crate::search::matcher::PatternMatcher;
use crate::search::processor::split_lines;
use crate::symbols::{extract_symbols, is_word_byte, Language};
use crate::walker::walk;

/// A pattern and its literal replacement, applied to one line at a time
#[derive(Debug, Clone)]
pub struct ReplacementTask {
    matcher: PatternMatcher,
    replacement: Vec<u8>,
    /// Only hits not flanked by identifier bytes are replaced
    whole_token: bool,
    /// Family deciding identifier bytes, strings and line comments
    language: Option<Language>,
}

impl ReplacementTask {
    pub fn new(matcher: PatternMatcher, replacement: &str) -> Self {
        Self {
            matcher,
            replacement: replacement.as_bytes().to_vec(),
            whole_token: false,
            language: None,
        }
    }

    /// A whole-token rename of `old_name`; neither name may be empty.
    ///
    /// Until [`in_language`](Self::in_language) is called, identifiers are
    /// letters, digits and `_`.
    pub fn rename(old_name: &str, new_name: &str) -> SearchResult<Self> {
        if new_name.is_empty() {
            return Err(SearchError::invalid_pattern("new symbol name cannot be empty"));
        }
        Ok(Self {
            whole_token: true,
            ..Self::new(PatternMatcher::literal(old_name)?, new_name)
        })
    }

    /// Uses `language`'s identifier bytes for token boundaries and leaves
    /// matches inside its string literals and line comments alone
    pub fn in_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Rewrites one line, borrowing it back when nothing changed
    pub fn apply<'a>(&self, line: &'a [u8]) -> Cow<'a, [u8]> {
        if !self.whole_token && self.language.is_none() {
            return self.matcher.replace_all(line, &self.replacement);
        }

        let literals = self
            .language
            .map(|language| language.literal_ranges(line))
            .unwrap_or_default();
        let mut output = Vec::new();
        let mut last = 0;
        let mut replaced = false;

        for found in self.matcher.find_ranges(line) {
            if literals.iter().any(|literal| literal.contains(&found.start)) {
                continue;
            }
            if self.whole_token && !self.is_whole_token(line, &found) {
                continue;
            }
            output.extend_from_slice(&line[last..found.start]);
            output.extend_from_slice(&self.replacement);
            last = found.end;
            replaced = true;
        }

        if !replaced {
            return Cow::Borrowed(line);
        }
        output.extend_from_slice(&line[last..]);
        Cow::Owned(output)
    }

    fn is_whole_token(&self, line: &[u8], found: &Range<usize>) -> bool {
        let is_ident = |byte: &u8| match self.language {
            Some(language) => language.is_ident_byte(*byte),
            None => is_word_byte(*byte),
        };
        let before = found.start.checked_sub(1).and_then(|i| line.get(i));
        let after = line.get(found.end);
        !before.is_some_and(is_ident) && !after.is_some_and(is_ident)
    }
}

/// The rewritten content of one file and the lines that changed
#[derive(Debug)]
pub struct FileReplacementPlan {
    pub file_path: PathBuf,
    pub new_content: Vec<u8>,
    pub changes: Vec<ChangeRecord>,
}

impl FileReplacementPlan {
    /// Reads `file_path` and plans the rewrite.
    ///
    /// Returns `None` when no line would change.
    pub fn build(file_path: &Path, task: &ReplacementTask) -> SearchResult<Option<Self>> {
        let bytes = fs::read(file_path)?;
        Ok(Self::from_bytes(file_path, &bytes, task))
    }

    /// Plans the rewrite of already-read content.
    ///
    /// Terminators are copied through untouched, so `\r\n` endings and a
    /// missing final newline survive.
    pub fn from_bytes(file_path: &Path, bytes: &[u8], task: &ReplacementTask) -> Option<Self> {
        let mut new_content = Vec::with_capacity(bytes.len());
        let mut changes = Vec::new();

        for line in split_lines(bytes) {
            let rewritten = task.apply(line.content);
            if let Cow::Owned(after) = &rewritten {
                if after.as_slice() != line.content {
                    changes.push(ChangeRecord {
                        path: file_path.to_path_buf(),
                        line: line.number,
                        before: String::from_utf8_lossy(line.content).into_owned(),
                        after: String::from_utf8_lossy(after).into_owned(),
                    });
                }
            }
            new_content.extend_from_slice(&rewritten);
            new_content.extend_from_slice(line.terminator);
        }

        if changes.is_empty() {
            return None;
        }
        Some(Self {
            file_path: file_path.to_path_buf(),
            new_content,
            changes,
        })
    }

    /// Writes the new content over the file
    pub fn apply(&self) -> SearchResult<()> {
        trace!(
            "Rewriting {} ({} lines changed)",
            self.file_path.display(),
            self.changes.len()
        );
        fs::write(&self.file_path, &self.new_content)?;
        Ok(())
    }
}

/// Writes a plan and hands back its change records; a failed write reports nothing.
fn commit(plan: FileReplacementPlan) -> Vec<ChangeRecord> {
    match plan.apply() {
        Ok(()) => plan.changes,
        Err(e) => {
            warn!("Failed to write {}: {}", plan.file_path.display(), e);
            Vec::new()
        }
    }
}

/// Replaces every match of `pattern` with the literal `replacement` in all
/// non-ignored text files under `root`.
///
/// One change record is returned per modified line. Files without a match
/// are not written.
pub fn replace(
    root: &Path,
    pattern: &str,
    replacement: &str,
    config: &SearchConfig,
) -> SearchResult<Vec<ChangeRecord>> {
    info!(
        "Replacing {:?} with {:?} in {}",
        pattern,
        replacement,
        root.display()
    );

    let task = ReplacementTask::new(PatternMatcher::new(pattern)?, replacement);
    let mut changes = Vec::new();
    let mut files_changed = 0usize;

    for path in walk(root, config)? {
        if is_binary_file(&path) {
            debug!("Skipping binary file: {}", path.display());
            continue;
        }
        match FileReplacementPlan::build(&path, &task) {
            Ok(Some(plan)) => {
                let committed = commit(plan);
                if !committed.is_empty() {
                    files_changed += 1;
                }
                changes.extend(committed);
            }
            Ok(None) => {}
            Err(e) => debug!("Skipping unreadable file {}: {}", path.display(), e),
        }
    }

    info!(
        "Replace complete. Changed {} lines in {} files",
        changes.len(),
        files_changed
    );
    Ok(changes)
}

/// Renames `old_name` to `new_name` in the supported source files that define it.
///
/// A file takes part only if its recognizer reports a symbol named exactly
/// `old_name`. Within it, every whole-token occurrence outside string
/// literals and line comments is rewritten. Other files are left alone even
/// if they use the name.
pub fn replace_symbol(
    root: &Path,
    old_name: &str,
    new_name: &str,
    config: &SearchConfig,
) -> SearchResult<Vec<ChangeRecord>> {
    info!(
        "Renaming symbol {:?} to {:?} in {}",
        old_name,
        new_name,
        root.display()
    );

    let rename = ReplacementTask::rename(old_name, new_name)?;

    let mut changes = Vec::new();
    for path in walk(root, config)? {
        let Some(language) = Language::from_path(&path) else {
            continue;
        };
        if is_binary_file(&path) {
            debug!("Skipping binary file: {}", path.display());
            continue;
        }
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!("Skipping unreadable file {}: {}", path.display(), e);
                continue;
            }
        };

        let content = String::from_utf8_lossy(&bytes);
        let defines = extract_symbols(&path, &content)
            .iter()
            .any(|symbol| symbol.name == old_name);
        if !defines {
            continue;
        }
        debug!("{} defines {}", path.display(), old_name);

        let task = rename.clone().in_language(language);
        if let Some(plan) = FileReplacementPlan::from_bytes(&path, &bytes, &task) {
            changes.extend(commit(plan));
        }
    }

    info!("Rename complete. Changed {} lines", changes.len());
    Ok(changes)
}
