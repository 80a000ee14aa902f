//! # Output Formatting
//!
//! Documentation goes to stdout as plain markdown; diagnostics go to stderr.
//!
//! - [`text`]: aligned name/description lists and other plain-text helpers
//! - [`json`]: serialized sections for `--format json`
//! - [`render`]: the stdout sink, optionally piped through an external
//!   markdown renderer

pub mod json;
pub mod render;
pub mod text;

pub use render::OutputSink;

/// Output format for listings and search results.
///
/// ```bash
/// k6docs search thresholds                 # grouped text
/// k6docs search thresholds --format json   # array of sections
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text (default)
    #[default]
    Text,
    /// Pretty-printed JSON array of sections
    Json,
}
