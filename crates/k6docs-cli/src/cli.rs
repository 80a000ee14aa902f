//! # CLI Structure and Argument Parsing
//!
//! `k6docs` browses a prepared k6 documentation bundle. Positional words name a
//! topic; subcommands cover search, the best-practices guide and bundle
//! preparation.
//!
//! ```bash
//! # Table of contents
//! k6docs
//!
//! # A topic, in module shorthand or as an explicit path
//! k6docs http get
//! k6docs using-k6/scenarios
//!
//! # Listings
//! k6docs --list
//! k6docs --list browser
//!
//! # Search
//! k6docs search close context
//! k6docs search thresholds --format json
//!
//! # Build a bundle from a k6-docs checkout
//! k6docs prepare --docs-path ~/src/k6-docs --k6-version v1.5.0
//! ```
//!
//! Global options select the docs version and bundle location:
//!
//! - `--docs-version` / `K6_DOCS_VERSION`
//! - `--cache-dir` / `K6_DOCS_CACHE_DIR`
//! - `--config` / `K6DOCS_CONFIG`

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Main CLI structure for the `k6docs` command
#[derive(Parser, Clone, Debug)]
#[command(name = "k6docs")]
#[command(version)]
#[command(about = "k6docs - Browse k6 documentation from the terminal", long_about = None)]
#[command(
    override_usage = "k6docs [TOPIC]... [OPTIONS]\n       k6docs <COMMAND> [ARGS]... [OPTIONS]"
)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Topic words, e.g. `http get` or `using-k6/scenarios`
    #[arg(value_name = "TOPIC")]
    pub topic: Vec<String>,

    /// List subtopics instead of showing content
    #[arg(long, conflicts_with = "all")]
    pub list: bool,

    /// Print every section
    #[arg(long)]
    pub all: bool,

    /// Docs version to read, e.g. `v1.5.x` (detected from `k6 version` when unset)
    #[arg(long = "docs-version", global = true, value_name = "VERSION", env = "K6_DOCS_VERSION")]
    pub docs_version: Option<String>,

    /// Prepared bundle directory (overrides the per-version cache location)
    #[arg(long = "cache-dir", global = true, value_name = "DIR", env = "K6_DOCS_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Path to configuration file (overrides autodiscovery). Also via `K6DOCS_CONFIG`.
    #[arg(long, global = true, value_name = "FILE", env = "K6DOCS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for listings and search results
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable debug logging on stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable all ANSI colors in output (also respects `NO_COLOR` env)
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,
}

/// Available subcommands for the `k6docs` CLI
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Search titles, descriptions and page content
    Search {
        /// Search term; multiple words are joined with spaces
        #[arg(required = true, value_name = "TERM")]
        term: Vec<String>,
    },

    /// Print the k6 best-practices guide
    BestPractices,

    /// Build a bundle from a local k6-docs checkout
    Prepare {
        /// Root of the k6-docs repository checkout
        #[arg(long, value_name = "DIR")]
        docs_path: PathBuf,

        /// k6 version to prepare docs for, e.g. `v1.5.0` or `v1.5.x`
        #[arg(long, value_name = "VERSION")]
        k6_version: String,

        /// Where to write the bundle (defaults to the cache directory for the version)
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
}
