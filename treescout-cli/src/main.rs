use clap::{Parser, Subcommand};
use colored::Colorize;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use treescout::{
    glob_directories, glob_files, render, render_paths, replace, replace_symbol, search,
    search_symbols, ChangeRecord, CliOverrides, SearchConfig, SearchError,
};

type Result<T> = std::result::Result<T, SearchError>;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file layered over the global and local ones
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit records as a JSON array instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Rule file read from the search root instead of .gitignore
    #[arg(long, global = true)]
    ignore_file: Option<String>,

    /// Extra gitignore-style rule (can be specified multiple times)
    #[arg(short, long = "ignore", global = true)]
    ignore: Vec<String>,

    /// Follow symlinked directories
    #[arg(long, global = true)]
    follow_links: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search file contents, or symbol names with --symbols
    Find {
        /// Match the pattern against symbol names instead of lines
        #[arg(short, long)]
        symbols: bool,

        /// Regular expression to search for
        pattern: String,

        /// Root directory to search in
        #[arg(default_value = ".")]
        dir: PathBuf,
    },

    /// List files (or directories with --dirs) whose path matches a pattern
    Glob {
        /// Match directories instead of files
        #[arg(short, long)]
        dirs: bool,

        /// Regular expression matched against the full path
        pattern: String,

        #[arg(default_value = ".")]
        dir: PathBuf,
    },

    /// Replace every match of a pattern with literal text, in place
    Replace {
        pattern: String,

        /// Inserted literally; `$1` is not expanded
        replacement: String,

        #[arg(default_value = ".")]
        dir: PathBuf,
    },

    /// Rename a symbol in the files that define it
    Rename {
        old: String,
        new: String,

        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let overrides = CliOverrides {
        ignore_file: cli.ignore_file,
        extra_ignore_patterns: cli.ignore,
        follow_links: cli.follow_links,
        log_level: cli.log_level,
    };
    let config = SearchConfig::load_from(cli.config.as_deref())?.merge_with_cli(overrides);

    init_logging(&config.log_level);
    debug!("Effective configuration: {:?}", config);

    match cli.command {
        Commands::Find {
            symbols,
            pattern,
            dir,
        } => {
            let records = if symbols {
                search_symbols(&dir, &pattern, &config)?
            } else {
                search(&dir, &pattern, &config)?
            };
            if cli.json {
                print_json(serde_json::to_value(&records))
            } else {
                print!("{}", render(&records));
                Ok(())
            }
        }
        Commands::Glob { dirs, pattern, dir } => {
            let records = if dirs {
                glob_directories(&dir, &pattern, &config)?
            } else {
                glob_files(&dir, &pattern, &config)?
            };
            if cli.json {
                print_json(serde_json::to_value(&records))
            } else {
                print!("{}", render_paths(&records));
                Ok(())
            }
        }
        Commands::Replace {
            pattern,
            replacement,
            dir,
        } => {
            let changes = replace(&dir, &pattern, &replacement, &config)?;
            report_changes(&changes, cli.json)
        }
        Commands::Rename { old, new, dir } => {
            let changes = replace_symbol(&dir, &old, &new, &config)?;
            report_changes(&changes, cli.json)
        }
    }
}

/// Installs a stderr subscriber so stdout carries only results
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn print_json(value: serde_json::Result<serde_json::Value>) -> Result<()> {
    let json = value.and_then(|v| serde_json::to_string_pretty(&v));
    println!("{}", json.map_err(std::io::Error::from)?);
    Ok(())
}

fn report_changes(changes: &[ChangeRecord], json: bool) -> Result<()> {
    if json {
        return print_json(serde_json::to_value(changes));
    }

    if changes.is_empty() {
        println!("No changes made");
        return Ok(());
    }

    for change in changes {
        println!(
            "{}",
            format!("{}:{}", change.path.display(), change.line).blue()
        );
        println!("  - {}", change.before.red());
        println!("  + {}", change.after.green());
    }

    let files: BTreeSet<&PathBuf> = changes.iter().map(|c| &c.path).collect();
    println!(
        "\nChanged {} lines in {} files",
        changes.len(),
        files.len()
    );
    Ok(())
}
