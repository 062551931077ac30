use std::path::Path;
use tracing::{debug, info, trace};

use super::matcher::PatternMatcher;
use super::processor::FileProcessor;
use crate::config::SearchConfig;
use crate::errors::SearchResult;
use crate::filters::is_binary_file;
use crate::results::MatchRecord;
use crate::symbols::{extract_symbols, is_supported_symbol_file};
use crate::walker::walk;

/// Searches every non-ignored text file under `root` for `pattern`.
///
/// Returns one record per matching line, in walk order. The pattern is
/// compiled before the tree is touched, so an invalid pattern never reads
/// a file.
pub fn search(root: &Path, pattern: &str, config: &SearchConfig) -> SearchResult<Vec<MatchRecord>> {
    info!("Starting search for {:?} in {}", pattern, root.display());

    let processor = FileProcessor::new(PatternMatcher::new(pattern)?);
    let mut records = Vec::new();
    let mut files_searched = 0usize;

    for path in walk(root, config)? {
        if is_binary_file(&path) {
            debug!("Skipping binary file: {}", path.display());
            continue;
        }
        match processor.process_file(&path) {
            Ok(found) => {
                files_searched += 1;
                records.extend(found);
            }
            Err(e) => debug!("Skipping unreadable file {}: {}", path.display(), e),
        }
    }

    info!(
        "Search complete. Found {} matches in {} files",
        records.len(),
        files_searched
    );
    Ok(records)
}

/// Searches symbol names in every supported source file under `root`.
///
/// `pattern` is matched against each symbol's name, not the line it sits on.
/// Records carry the symbol name as `matched_text` and its byte offset as
/// `column`. A line defining several kinds of symbol yields one record each.
pub fn search_symbols(
    root: &Path,
    pattern: &str,
    config: &SearchConfig,
) -> SearchResult<Vec<MatchRecord>> {
    info!("Starting symbol search for {:?} in {}", pattern, root.display());

    let matcher = PatternMatcher::new(pattern)?;
    let mut records = Vec::new();

    for path in walk(root, config)? {
        if !is_supported_symbol_file(&path) {
            continue;
        }
        if is_binary_file(&path) {
            debug!("Skipping binary file: {}", path.display());
            continue;
        }
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!("Skipping unreadable file {}: {}", path.display(), e);
                continue;
            }
        };
        trace!("Extracting symbols from {}", path.display());

        let content = String::from_utf8_lossy(&bytes);
        records.extend(
            extract_symbols(&path, &content)
                .into_iter()
                .filter(|symbol| matcher.is_match(symbol.name.as_bytes()))
                .map(|symbol| MatchRecord::new(path.clone(), symbol.line, symbol.column, symbol.name)),
        );
    }

    info!("Symbol search complete. Found {} symbols", records.len());
    Ok(records)
}
