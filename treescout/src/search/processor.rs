use std::path::Path;
use tracing::trace;

use super::matcher::PatternMatcher;
use crate::errors::SearchResult;
use crate::results::MatchRecord;

/// One line of a file, split off its terminator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based line number
    pub number: usize,
    /// Line bytes without `\n` or `\r\n`
    pub content: &'a [u8],
    /// The stripped terminator, empty for a final line with no newline
    pub terminator: &'a [u8],
}

/// Splits `bytes` into lines, keeping each terminator so the file can be
/// reassembled byte for byte.
pub fn split_lines(bytes: &[u8]) -> impl Iterator<Item = Line<'_>> {
    bytes
        .split_inclusive(|&b| b == b'\n')
        .enumerate()
        .map(|(index, raw)| {
            let content_len = if raw.ends_with(b"\r\n") {
                raw.len() - 2
            } else if raw.ends_with(b"\n") {
                raw.len() - 1
            } else {
                raw.len()
            };
            Line {
                number: index + 1,
                content: &raw[..content_len],
                terminator: &raw[content_len..],
            }
        })
}

/// Scans files line by line with one compiled pattern
#[derive(Debug)]
pub struct FileProcessor {
    matcher: PatternMatcher,
}

impl FileProcessor {
    pub fn new(matcher: PatternMatcher) -> Self {
        Self { matcher }
    }

    /// Produces one record per matching line of an in-memory buffer.
    ///
    /// The column is the byte offset of the first match on that line.
    pub fn scan_bytes(&self, path: &Path, bytes: &[u8]) -> Vec<MatchRecord> {
        split_lines(bytes)
            .filter_map(|line| {
                let column = self.matcher.first_match(line.content)?;
                Some(MatchRecord::new(
                    path.to_path_buf(),
                    line.number,
                    column,
                    String::from_utf8_lossy(line.content).into_owned(),
                ))
            })
            .collect()
    }

    /// Reads and scans a file.
    ///
    /// Read failures are returned to the caller, which decides whether to skip.
    pub fn process_file(&self, path: &Path) -> SearchResult<Vec<MatchRecord>> {
        trace!("Scanning file: {}", path.display());
        let bytes = std::fs::read(path)?;
        Ok(self.scan_bytes(path, &bytes))
    }
}
