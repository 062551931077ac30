//! Go recognizer.
//!
//! Only top-level declarations that start at column 0 are seen. Grouped
//! `var (` / `const (` / `type (` blocks are not expanded.

use once_cell::sync::Lazy;

use super::{scan_lines, Rule};
use crate::results::{SymbolKind, SymbolRecord};

static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new(
            SymbolKind::Function,
            r"^func\s+(?P<name>[A-Za-z_]\w*)\s*[\[(]",
        ),
        Rule::new(
            SymbolKind::Method,
            r"^func\s*\([^)]*\)\s*(?P<name>[A-Za-z_]\w*)\s*[\[(]",
        ),
        Rule::new(SymbolKind::Type, r"^type\s+(?P<name>[A-Za-z_]\w*)"),
        Rule::new(
            SymbolKind::Variable,
            r"^(?:var|const)\s+(?P<name>[A-Za-z_]\w*)",
        ),
    ]
});

pub(super) fn extract(content: &str) -> Vec<SymbolRecord> {
    scan_lines(content, &RULES)
}
