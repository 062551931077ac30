//! Record types produced by treescout operations and their text rendering.
//!
//! Every record is owned and transient: an operation builds a `Vec` of them,
//! hands it back, and keeps nothing. Paths are stored exactly as the walker
//! produced them (root-joined), so rendering `.` as root yields `./a.txt`.
use serde::Serialize;
use std::fmt::{self, Write as _};
use std::path::PathBuf;

/// A single line-level hit from content search, symbol search or glob
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    /// The file (or directory, for glob) the hit belongs to
    pub path: PathBuf,
    /// 1-based line number; 0 for glob hits
    pub line: usize,
    /// 0-based byte offset within the line; 0 for glob hits
    pub column: usize,
    /// Full line text, symbol name, or empty for glob hits
    pub matched_text: String,
}

impl MatchRecord {
    pub fn new(path: PathBuf, line: usize, column: usize, matched_text: String) -> Self {
        Self {
            path,
            line,
            column,
            matched_text,
        }
    }

    /// A path-only record as produced by the glob operations
    pub fn path_only(path: PathBuf) -> Self {
        Self {
            path,
            line: 0,
            column: 0,
            matched_text: String::new(),
        }
    }
}

impl fmt::Display for MatchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}",
            self.path.display(),
            self.line,
            self.column,
            self.matched_text
        )
    }
}

/// Category of a heuristically recognized symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Function,
    Type,
    Variable,
    Table,
    View,
    Class,
    Method,
}

impl SymbolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::Function => "function",
            SymbolKind::Type => "type",
            SymbolKind::Variable => "variable",
            SymbolKind::Table => "table",
            SymbolKind::View => "view",
            SymbolKind::Class => "class",
            SymbolKind::Method => "method",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named code construct found on one line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolRecord {
    pub name: String,
    /// 1-based line number
    pub line: usize,
    /// Byte offset of the name within the line
    pub column: usize,
    pub kind: SymbolKind,
}

/// One modified line, as reported by the replace operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeRecord {
    pub path: PathBuf,
    /// 1-based line number
    pub line: usize,
    /// Line text before the rewrite, terminator stripped
    pub before: String,
    /// Line text after the rewrite, terminator stripped
    pub after: String,
}

/// Formats records as `path:line:column: matched_text`, one per line, in input order
pub fn render(records: &[MatchRecord]) -> String {
    let mut output = String::new();
    for record in records {
        // Writing into a String cannot fail.
        let _ = writeln!(output, "{}", record);
    }
    output
}

/// Formats only the path of each record, one per line
pub fn render_paths(records: &[MatchRecord]) -> String {
    let mut output = String::new();
    for record in records {
        let _ = writeln!(output, "{}", record.path.display());
    }
    output
}

/// Formats change records as `path:line: before -> after`, one per line
pub fn render_changes(changes: &[ChangeRecord]) -> String {
    let mut output = String::new();
    for change in changes {
        let _ = writeln!(
            output,
            "{}:{}: {} -> {}",
            change.path.display(),
            change.line,
            change.before,
            change.after
        );
    }
    output
}
