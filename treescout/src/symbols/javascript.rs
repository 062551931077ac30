//! JavaScript recognizer (`.js`, `.jsx`).
//!
//! Same shapes as TypeScript minus type declarations and access modifiers.

use once_cell::sync::Lazy;

use super::typescript::CONTROL_KEYWORDS;
use super::{scan_lines, Rule};
use crate::results::{SymbolKind, SymbolRecord};

static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new(
            SymbolKind::Function,
            r"^\s*(?:export\s+)?(?:default\s+)?(?:async\s+)?function\s*\*?\s*(?P<name>[A-Za-z_$][\w$]*)",
        ),
        Rule::new(
            SymbolKind::Function,
            r"^\s*(?:export\s+)?(?:const|let|var)\s+(?P<name>[A-Za-z_$][\w$]*)\s*=\s*(?:async\s+)?(?:function\b|(?:\([^)]*\)|[A-Za-z_$][\w$]*)\s*=>)",
        ),
        Rule::new(
            SymbolKind::Class,
            r"^\s*(?:export\s+)?(?:default\s+)?class\s+(?P<name>[A-Za-z_$][\w$]*)",
        ),
        Rule::new(
            SymbolKind::Variable,
            r"^(?:export\s+)?(?:const|let|var)\s+(?P<name>[A-Za-z_$][\w$]*)",
        ),
        Rule::new(
            SymbolKind::Method,
            r"^\s+(?:(?:static|async|get|set)\s+)*\*?(?P<name>[A-Za-z_$][\w$]*)\s*\([^)]*\)\s*\{",
        )
        .rejecting(CONTROL_KEYWORDS),
    ]
});

pub(super) fn extract(content: &str) -> Vec<SymbolRecord> {
    scan_lines(content, &RULES)
}
