//! TypeScript recognizer (`.ts`, `.tsx`).

use once_cell::sync::Lazy;

use super::{scan_lines, Rule};
use crate::results::{SymbolKind, SymbolRecord};

/// Words that precede `(` and `{` on a line without naming a method
pub(super) const CONTROL_KEYWORDS: &[&str] = &[
    "if", "for", "while", "switch", "catch", "function", "return", "with", "else", "do", "await",
    "typeof", "new",
];

static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new(
            SymbolKind::Function,
            r"^\s*(?:export\s+)?(?:default\s+)?(?:declare\s+)?(?:async\s+)?function\s*\*?\s*(?P<name>[A-Za-z_$][\w$]*)",
        ),
        Rule::new(
            SymbolKind::Function,
            r"^\s*(?:export\s+)?(?:const|let|var)\s+(?P<name>[A-Za-z_$][\w$]*)\s*(?::[^=]+)?=\s*(?:async\s+)?(?:function\b|(?:<[^>]*>\s*)?(?:\([^)]*\)|[A-Za-z_$][\w$]*)\s*(?::[^=]+)?=>)",
        ),
        Rule::new(
            SymbolKind::Class,
            r"^\s*(?:export\s+)?(?:default\s+)?(?:declare\s+)?(?:abstract\s+)?class\s+(?P<name>[A-Za-z_$][\w$]*)",
        ),
        Rule::new(
            SymbolKind::Type,
            r"^\s*(?:export\s+)?(?:declare\s+)?(?:interface|type|(?:const\s+)?enum)\s+(?P<name>[A-Za-z_$][\w$]*)",
        ),
        Rule::new(
            SymbolKind::Variable,
            r"^(?:export\s+)?(?:declare\s+)?(?:const|let|var)\s+(?P<name>[A-Za-z_$][\w$]*)",
        )
        .rejecting(&["enum"]),
        Rule::new(
            SymbolKind::Method,
            r"^\s+(?:(?:public|private|protected|static|readonly|async|override|abstract|get|set)\s+)*(?P<name>[A-Za-z_$][\w$]*)\s*(?:<[^>]*>)?\s*\([^)]*\)\s*(?::\s*[^{;]+)?\{",
        )
        .rejecting(CONTROL_KEYWORDS),
    ]
});

pub(super) fn extract(content: &str) -> Vec<SymbolRecord> {
    scan_lines(content, &RULES)
}
