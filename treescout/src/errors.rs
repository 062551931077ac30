//! Error types for treescout operations.
//!
//! Only two kinds of failure ever abort an operation: a pattern that does not
//! compile and a root that cannot be opened. Everything that goes wrong while
//! walking the tree (unreadable files, entries deleted mid-walk, failed
//! writes) is logged and skipped, so callers see it as "no matches".
//!
//! ```rust,ignore
//! match treescout::search(root, "TODO", &config) {
//!     Ok(records) => print!("{}", treescout::render(&records)),
//!     Err(SearchError::InvalidPattern(msg)) => eprintln!("bad pattern: {msg}"),
//!     Err(SearchError::RootNotFound(path)) => eprintln!("no such dir: {}", path.display()),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for treescout operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur during search and replace operations
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Directory does not exist: {0}")]
    RootNotFound(PathBuf),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl SearchError {
    pub fn root_not_found(path: impl Into<PathBuf>) -> Self {
        Self::RootNotFound(path.into())
    }

    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied(path.into())
    }

    pub fn invalid_pattern(msg: impl Into<String>) -> Self {
        Self::InvalidPattern(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Maps an I/O failure on the traversal root to the matching fail-fast variant
    pub(crate) fn from_root_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::root_not_found(path),
            io::ErrorKind::PermissionDenied => Self::permission_denied(path),
            _ => Self::IoError(err),
        }
    }
}

impl From<config::ConfigError> for SearchError {
    fn from(err: config::ConfigError) -> Self {
        Self::ConfigError(err.to_string())
    }
}

impl From<regex::Error> for SearchError {
    fn from(err: regex::Error) -> Self {
        Self::InvalidPattern(err.to_string())
    }
}
