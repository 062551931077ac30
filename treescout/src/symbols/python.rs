//! Python recognizer.
//!
//! `def` at column 0 is a function, an indented `def` is a method. Only
//! column-0 assignments count as variables.

use once_cell::sync::Lazy;

use super::{scan_lines, Rule};
use crate::results::{SymbolKind, SymbolRecord};

const STATEMENT_KEYWORDS: &[&str] = &[
    "if", "elif", "else", "for", "while", "with", "try", "except", "finally", "return", "lambda",
    "not", "and", "or", "assert", "del", "print",
];

static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new(
            SymbolKind::Function,
            r"^(?:async\s+)?def\s+(?P<name>[A-Za-z_]\w*)\s*\(",
        ),
        Rule::new(
            SymbolKind::Method,
            r"^\s+(?:async\s+)?def\s+(?P<name>[A-Za-z_]\w*)\s*\(",
        ),
        Rule::new(SymbolKind::Class, r"^\s*class\s+(?P<name>[A-Za-z_]\w*)"),
        Rule::new(
            SymbolKind::Variable,
            r"^(?P<name>[A-Za-z_]\w*)\s*(?::[^=]+)?=[^=]",
        )
        .rejecting(STATEMENT_KEYWORDS),
    ]
});

pub(super) fn extract(content: &str) -> Vec<SymbolRecord> {
    scan_lines(content, &RULES)
}
