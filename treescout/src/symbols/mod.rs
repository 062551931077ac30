//! Heuristic, line-oriented symbol recognition.
//!
//! Each supported language family has its own submodule holding an ordered
//! list of anchored patterns. A file is routed to exactly one family by its
//! extension; anything else is never opened for symbol purposes.
//!
//! There is no parsing here. Every line is tried against every rule of its
//! family independently, so a line like `const handler = () => {}` produces
//! both a function and a variable record. Multi-line signatures, nesting and
//! scope are invisible to the recognizers.

mod go;
mod javascript;
mod python;
mod sql;
mod typescript;

use regex::Regex;
use std::ops::Range;
use std::path::Path;

use crate::results::{SymbolKind, SymbolRecord};

/// Language families with a symbol recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Go,
    TypeScript,
    JavaScript,
    Python,
    Sql,
}

/// Recognizer signature shared by every family
type Recognizer = fn(&str) -> Vec<SymbolRecord>;

impl Language {
    /// Gets the family for a file extension.
    ///
    /// Matching is exact and case-sensitive; `TEST.GO` is not a Go file.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "go" => Some(Language::Go),
            "ts" | "tsx" => Some(Language::TypeScript),
            "js" | "jsx" => Some(Language::JavaScript),
            "py" => Some(Language::Python),
            "sql" => Some(Language::Sql),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// File extensions routed to this family
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::Go => &["go"],
            Language::TypeScript => &["ts", "tsx"],
            Language::JavaScript => &["js", "jsx"],
            Language::Python => &["py"],
            Language::Sql => &["sql"],
        }
    }

    fn recognizer(&self) -> Recognizer {
        match self {
            Language::Go => go::extract,
            Language::TypeScript => typescript::extract,
            Language::JavaScript => javascript::extract,
            Language::Python => python::extract,
            Language::Sql => sql::extract,
        }
    }

    /// Runs this family's recognizer over `content`
    pub fn extract(&self, content: &str) -> Vec<SymbolRecord> {
        (self.recognizer())(content)
    }

    /// Whether `byte` can be part of an identifier in this family.
    ///
    /// `$` is an identifier byte in TypeScript and JavaScript, and `@` in SQL
    /// (`@total`). A token only counts as whole when neither neighbor is one.
    pub fn is_ident_byte(&self, byte: u8) -> bool {
        if is_word_byte(byte) {
            return true;
        }
        match self {
            Language::TypeScript | Language::JavaScript => byte == b'$',
            Language::Sql => byte == b'@',
            Language::Go | Language::Python => false,
        }
    }

    pub fn line_comment(&self) -> &'static str {
        match self {
            Language::Go | Language::TypeScript | Language::JavaScript => "//",
            Language::Python => "#",
            Language::Sql => "--",
        }
    }

    /// Bytes that open and close a string literal.
    ///
    /// SQL double quotes delimit identifiers, not strings.
    pub fn string_quotes(&self) -> &'static [u8] {
        match self {
            Language::Go | Language::TypeScript | Language::JavaScript => b"\"'`",
            Language::Python => b"\"'",
            Language::Sql => b"'",
        }
    }

    /// Byte ranges of `line` covered by string literals or a trailing line comment.
    ///
    /// Works on one line at a time; a string left open runs to the end of the
    /// line, and block comments are not recognized.
    pub fn literal_ranges(&self, line: &[u8]) -> Vec<Range<usize>> {
        let comment = self.line_comment().as_bytes();
        let quotes = self.string_quotes();
        let escapes = *self != Language::Sql;

        let mut ranges = Vec::new();
        let mut i = 0;
        while i < line.len() {
            if line[i..].starts_with(comment) {
                ranges.push(i..line.len());
                break;
            }
            let quote = line[i];
            if !quotes.contains(&quote) {
                i += 1;
                continue;
            }
            let start = i;
            i += 1;
            while i < line.len() && line[i] != quote {
                if escapes && line[i] == b'\\' {
                    i += 1;
                }
                i += 1;
            }
            i = (i + 1).min(line.len());
            ranges.push(start..i);
        }
        ranges
    }
}

/// ASCII letters, digits, `_`, and any non-ASCII byte.
///
/// Non-ASCII bytes count so a multi-byte letter never acts as a boundary.
pub(crate) fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || !byte.is_ascii()
}

/// Lists all extensions that have a recognizer.
pub fn supported_extensions() -> &'static [&'static str] {
    &[
        "go", // Go
        "ts", "tsx", // TypeScript
        "js", "jsx", // JavaScript
        "py",  // Python
        "sql", // SQL
    ]
}

/// Checks if a file's extension has a recognizer
pub fn is_supported_symbol_file(path: &Path) -> bool {
    Language::from_path(path).is_some()
}

/// Extracts symbols from `content`, dispatching on the extension of `path`.
///
/// Unsupported extensions yield no symbols.
pub fn extract_symbols(path: &Path, content: &str) -> Vec<SymbolRecord> {
    match Language::from_path(path) {
        Some(language) => language.extract(content),
        None => Vec::new(),
    }
}

/// One anchored pattern of a recognizer.
///
/// The pattern must capture the symbol name in a group called `name`.
pub(crate) struct Rule {
    kind: SymbolKind,
    regex: Regex,
    rejected: &'static [&'static str],
}

impl Rule {
    pub(crate) fn new(kind: SymbolKind, pattern: &str) -> Self {
        Self {
            kind,
            regex: Regex::new(pattern).expect("recognizer patterns are valid"),
            rejected: &[],
        }
    }

    /// Names that disqualify a match, e.g. control-flow keywords that look like calls
    pub(crate) fn rejecting(mut self, names: &'static [&'static str]) -> Self {
        self.rejected = names;
        self
    }

    fn recognize(&self, line: &str, line_number: usize) -> Option<SymbolRecord> {
        let name = self.regex.captures(line)?.name("name")?;
        if self.rejected.contains(&name.as_str()) {
            return None;
        }
        Some(SymbolRecord {
            name: name.as_str().to_string(),
            line: line_number,
            column: name.start(),
            kind: self.kind,
        })
    }
}

/// Applies every rule to every line, in rule order within a line
pub(crate) fn scan_lines(content: &str, rules: &[Rule]) -> Vec<SymbolRecord> {
    content
        .lines()
        .enumerate()
        .flat_map(move |(index, line)| {
            rules
                .iter()
                .filter_map(move |rule| rule.recognize(line, index + 1))
        })
        .collect()
}
