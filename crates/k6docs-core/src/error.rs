//! Error types and handling for k6docs-core operations.
//!
//! This module provides a single error type covering every failure the
//! documentation core can report. Errors carry the slug or file they concern so
//! that the CLI can print actionable "topic not found" style messages.
//!
//! ## Error Categories
//!
//! - **Manifest Errors**: `sections.json` missing or malformed
//! - **Lookup Errors**: a resolved slug is absent from the index
//! - **Parse Errors**: frontmatter, YAML or version strings that cannot be read
//! - **Storage Errors**: cache layout problems, unprepared bundles
//! - **Configuration Errors**: invalid or unreadable config files
//!
//! Missing shared fragments are intentionally absent from this list: a fragment
//! that cannot be found renders as empty text and never surfaces as an error.
//!
//! ```rust
//! use k6docs_core::{Error, SectionIndex};
//!
//! match SectionIndex::from_json(b"{ not json") {
//!     Err(Error::ManifestParse { .. }) => eprintln!("bundle is corrupt"),
//!     Err(e) => eprintln!("{}: {e}", e.category()),
//!     Ok(_) => unreachable!(),
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for k6docs-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The manifest file does not exist or cannot be read.
    #[error("Manifest not found: {}", path.display())]
    ManifestNotFound {
        /// Location that was probed
        path: PathBuf,
        /// Underlying read failure
        #[source]
        source: std::io::Error,
    },

    /// The manifest exists but is not a valid section list.
    ///
    /// Also raised when a section entry lacks its required `slug` field.
    #[error("Failed to parse manifest {}: {source}", path.display())]
    ManifestParse {
        /// Manifest location, or `<memory>` for in-memory input
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// A slug is absent from the section index.
    #[error("Topic not found: {0}")]
    SectionNotFound(String),

    /// Text could not be parsed (frontmatter, version strings, tool output).
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Cache storage operation failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Documentation for a version has not been prepared locally.
    #[error("Docs for {version} are not cached at {}", path.display())]
    NotCached {
        /// Docs version that was requested
        version: String,
        /// Expected bundle directory
        path: PathBuf,
    },

    /// Generic error for cases not covered by specific variants.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Returns `true` when the error means "the thing the user asked for does
    /// not exist" rather than "something is broken".
    ///
    /// ```rust
    /// use k6docs_core::Error;
    ///
    /// assert!(Error::SectionNotFound("http/nope".into()).is_not_found());
    /// assert!(!Error::Config("bad".into()).is_not_found());
    /// ```
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ManifestNotFound { .. } | Self::SectionNotFound(_) | Self::NotCached { .. }
        )
    }

    /// Short, stable label for the error family, suitable for logs.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::ManifestNotFound { .. } | Self::ManifestParse { .. } => "manifest",
            Self::SectionNotFound(_) => "lookup",
            Self::Parse(_) => "parse",
            Self::Config(_) => "config",
            Self::Storage(_) | Self::NotCached { .. } => "storage",
            Self::Other(_) => "other",
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(format!("YAML error: {err}"))
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("TOML parse error: {err}"))
    }
}

/// Convenience type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;

    fn parse_error() -> Error {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        Error::ManifestParse {
            path: PathBuf::from("/cache/v1.5.x/sections.json"),
            source,
        }
    }

    #[test]
    fn test_error_display_names_the_file() {
        let err = parse_error();
        let msg = err.to_string();
        assert!(msg.starts_with("Failed to parse manifest /cache/v1.5.x/sections.json"));

        let err = Error::ManifestNotFound {
            path: PathBuf::from("/cache/sections.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.to_string(), "Manifest not found: /cache/sections.json");
    }

    #[test]
    fn test_error_display_names_the_slug() {
        let err = Error::SectionNotFound("javascript-api/k6-http/nope".into());
        assert_eq!(err.to_string(), "Topic not found: javascript-api/k6-http/nope");
    }

    #[test]
    fn test_error_chain_source() {
        let err = parse_error();
        assert!(err.source().is_some());

        let err = Error::Other("plain".into());
        assert!(err.source().is_none());
    }

    #[test]
    fn test_not_found_classification() {
        assert!(Error::SectionNotFound("x".into()).is_not_found());
        assert!(
            Error::NotCached {
                version: "v1.5.x".into(),
                path: PathBuf::from("/nowhere"),
            }
            .is_not_found()
        );
        assert!(!parse_error().is_not_found());
        assert!(!Error::Storage("x".into()).is_not_found());
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(parse_error().category(), "manifest");
        assert_eq!(Error::SectionNotFound("x".into()).category(), "lookup");
        assert_eq!(Error::Parse("x".into()).category(), "parse");
        assert_eq!(Error::Config("x".into()).category(), "config");
        assert_eq!(Error::Storage("x".into()).category(), "storage");
        assert_eq!(Error::Other("x".into()).category(), "other");
        assert_eq!(
            Error::Io(io::Error::new(io::ErrorKind::Other, "x")).category(),
            "io"
        );
    }

    #[test]
    fn test_from_toml_error_is_config() {
        let err: Error = toml::from_str::<toml::Value>("a = [").unwrap_err().into();
        assert!(matches!(err, Error::Config(msg) if msg.contains("TOML parse error")));
    }

    #[test]
    fn test_result_type_alias() {
        fn ok() -> Result<i32> {
            Ok(42)
        }
        fn fails() -> Result<i32> {
            Err(Error::Other("nope".into()))
        }
        assert_eq!(ok().unwrap(), 42);
        assert!(fails().is_err());
    }
}
