use config::{Config as ConfigBuilder, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{SearchError, SearchResult};

/// Settings shared by every treescout operation.
///
/// Nothing here changes *what* an operation matches; the pattern and root are
/// always explicit arguments. The config only shapes the traversal: which
/// rule file is read, extra rules layered on top, and symlink handling.
///
/// # Configuration Locations
///
/// Loaded from YAML in order of increasing precedence:
/// 1. Global `$CONFIG_DIR/treescout/config.yaml`
/// 2. Local `.treescout.yaml` in the current directory
/// 3. Custom file given via `--config`
///
/// # Configuration Format
///
/// ```yaml
/// # Rule file read from the search root (gitignore syntax)
/// ignore_file: ".gitignore"
///
/// # Additional rules appended after the rule file
/// extra_ignore_patterns:
///   - "node_modules/"
///   - "*.min.js"
///
/// # Follow symlinked directories while walking
/// follow_links: false
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "warn"
/// ```
///
/// `SearchConfig::default()` reads `.gitignore` only and never follows links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Name of the rule file looked up in the search root
    #[serde(default = "default_ignore_file")]
    pub ignore_file: String,

    /// Gitignore-syntax lines appended after the rule file's own rules
    #[serde(default)]
    pub extra_ignore_patterns: Vec<String>,

    /// Whether symlinked directories are descended into
    #[serde(default)]
    pub follow_links: bool,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_ignore_file() -> String {
    ".gitignore".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            ignore_file: default_ignore_file(),
            extra_ignore_patterns: Vec::new(),
            follow_links: false,
            log_level: default_log_level(),
        }
    }
}

/// Settings given on the command line.
///
/// `None` leaves the file value in place; any `Some` wins, even when it
/// equals the default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub ignore_file: Option<String>,
    /// Appended after the file's extra patterns
    pub extra_ignore_patterns: Vec<String>,
    /// `true` turns link following on; there is no flag to turn it off
    pub follow_links: bool,
    pub log_level: Option<String>,
}

impl SearchConfig {
    /// Loads configuration from the default locations
    pub fn load() -> SearchResult<Self> {
        Self::load_from(None)
    }

    /// Loads configuration, layering an explicit file over the default locations.
    ///
    /// The default locations are optional; an explicit file must exist.
    pub fn load_from(config_path: Option<&Path>) -> SearchResult<Self> {
        let mut builder = ConfigBuilder::builder();

        let defaults = [
            dirs::config_dir().map(|p| p.join("treescout/config.yaml")),
            Some(PathBuf::from(".treescout.yaml")),
        ];
        for path in defaults.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        if let Some(path) = config_path {
            if !path.exists() {
                return Err(SearchError::config_error(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(File::from(path));
        }

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Merges CLI arguments with configuration file values
    pub fn merge_with_cli(mut self, cli: CliOverrides) -> Self {
        if let Some(ignore_file) = cli.ignore_file {
            self.ignore_file = ignore_file;
        }
        self.extra_ignore_patterns.extend(cli.extra_ignore_patterns);
        if cli.follow_links {
            self.follow_links = true;
        }
        if let Some(log_level) = cli.log_level {
            self.log_level = log_level;
        }
        self
    }
}
