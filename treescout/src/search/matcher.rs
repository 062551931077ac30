use regex::bytes::{NoExpand, Regex};
use std::borrow::Cow;
use std::ops::Range;

use crate::errors::{SearchError, SearchResult};

/// Compiled content pattern, applied to raw line bytes
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    regex: Regex,
}

impl PatternMatcher {
    /// Compiles `pattern` as a regular expression.
    ///
    /// Patterns that fail to compile are reported as [`SearchError::InvalidPattern`]
    /// before any file is touched.
    pub fn new(pattern: &str) -> SearchResult<Self> {
        let regex = Regex::new(pattern)?;
        Ok(Self { regex })
    }

    /// Builds a matcher for `token` taken literally.
    ///
    /// No boundaries are added; callers decide what may sit next to a hit.
    pub fn literal(token: &str) -> SearchResult<Self> {
        if token.is_empty() {
            return Err(SearchError::invalid_pattern("symbol name cannot be empty"));
        }
        Self::new(&regex::escape(token))
    }

    /// Byte offset of the leftmost match in `line`, if any
    pub fn first_match(&self, line: &[u8]) -> Option<usize> {
        self.regex.find(line).map(|m| m.start())
    }

    pub fn is_match(&self, line: &[u8]) -> bool {
        self.regex.is_match(line)
    }

    /// Byte ranges of every non-overlapping match in `line`, left to right
    pub fn find_ranges<'a>(&'a self, line: &'a [u8]) -> impl Iterator<Item = Range<usize>> + 'a {
        self.regex.find_iter(line).map(|m| m.range())
    }

    /// Replaces every non-overlapping match in `line` with `replacement`.
    ///
    /// The replacement is literal; `$1` is inserted as the two bytes `$1`.
    /// Returns `Cow::Borrowed` when nothing matched.
    pub fn replace_all<'a>(&self, line: &'a [u8], replacement: &[u8]) -> Cow<'a, [u8]> {
        self.regex.replace_all(line, NoExpand(replacement))
    }
}
