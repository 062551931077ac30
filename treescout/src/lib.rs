//! treescout: gitignore-aware source tree search, light symbol indexing and
//! in-place replacement.
//!
//! Every operation walks the tree from scratch, honoring the root's ignore
//! file, and keeps nothing between calls.
pub mod config;
pub mod errors;
pub mod filters;
pub mod glob;
pub mod replace;
pub mod results;
pub mod search;
pub mod symbols;
pub mod walker;

pub use config::{CliOverrides, SearchConfig};
pub use errors::{SearchError, SearchResult};
pub use filters::{is_binary_content, is_binary_file};
pub use glob::{glob_directories, glob_files};
pub use replace::{replace, replace_symbol};
pub use results::{
    render, render_changes, render_paths, ChangeRecord, MatchRecord, SymbolKind, SymbolRecord,
};
pub use search::{search, search_symbols};
pub use symbols::{extract_symbols, is_supported_symbol_file, Language};
pub use walker::{walk, IgnoreMatcher};
