//! SQL recognizer.
//!
//! Keywords are case-insensitive. Names may be schema-qualified and may sit
//! behind an opening quote, bracket or backtick; the recorded name excludes it.

use once_cell::sync::Lazy;

use super::{scan_lines, Rule};
use crate::results::{SymbolKind, SymbolRecord};

static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new(
            SymbolKind::Function,
            r#"(?i)^\s*create\s+(?:or\s+replace\s+)?(?:function|procedure)\s+(?:if\s+not\s+exists\s+)?["`\[]?(?P<name>[\w.]+)"#,
        ),
        Rule::new(
            SymbolKind::Table,
            r#"(?i)^\s*create\s+(?:or\s+replace\s+)?(?:(?:global|local)\s+)?(?:(?:temp|temporary)\s+)?(?:unlogged\s+)?table\s+(?:if\s+not\s+exists\s+)?["`\[]?(?P<name>[\w.]+)"#,
        ),
        Rule::new(
            SymbolKind::View,
            r#"(?i)^\s*create\s+(?:or\s+replace\s+)?(?:(?:temp|temporary)\s+)?(?:materialized\s+)?view\s+(?:if\s+not\s+exists\s+)?["`\[]?(?P<name>[\w.]+)"#,
        ),
        Rule::new(
            SymbolKind::Type,
            r#"(?i)^\s*create\s+type\s+["`\[]?(?P<name>[\w.]+)"#,
        ),
        Rule::new(SymbolKind::Variable, r"(?i)^\s*declare\s+(?P<name>@?\w+)"),
    ]
});

pub(super) fn extract(content: &str) -> Vec<SymbolRecord> {
    scan_lines(content, &RULES)
}
