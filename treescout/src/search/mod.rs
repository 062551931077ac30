//! Content and symbol search over a walked tree.
//!
//! Both searches are a single sequential pass: the pattern is compiled once,
//! the tree is walked in sorted depth-first order, binary files are dropped,
//! and each remaining file is read whole and scanned.
//!
//! - [`search`] matches the pattern against every line of every text file and
//!   reports one record per matching line.
//! - [`search_symbols`] runs the language recognizers over supported source
//!   files and matches the pattern against symbol names only.
//!
//! ```rust,ignore
//! use std::path::Path;
//! use treescout::{render, search, SearchConfig};
//!
//! let records = search(Path::new("."), r"fn\s+main", &SearchConfig::default())?;
//! print!("{}", render(&records));
//! ```

pub mod engine;
pub mod matcher;
pub mod processor;

pub use engine::{search, search_symbols};
pub use matcher::PatternMatcher;
pub use processor::{split_lines, FileProcessor, Line};
