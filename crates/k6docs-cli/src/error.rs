//! CLI error handling with semantic exit codes.
//!
//! Errors are categorized so scripts can tell "topic does not exist" apart
//! from "the bundle is broken":
//!
//! | Code | Category | Description |
//! |------|----------|-------------|
//! | 0 | Success | Command completed successfully |
//! | 1 | `Internal` | Unexpected/internal error |
//! | 2 | `Usage` | Invalid arguments, configuration, or undetectable version |
//! | 3 | `NotFound` | Topic, manifest, or bundle not found |
//! | 7 | `Integrity` | Manifest or bundle data is corrupt |
//!
//! ```bash
//! k6docs http nope
//! case $? in
//!     0) echo "found" ;;
//!     3) echo "no such topic" ;;
//!     *) echo "other error" ;;
//! esac
//! ```

use std::fmt;
use std::process::ExitCode;

/// Semantic error category determining the exit code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Unexpected or internal error (exit code 1).
    Internal = 1,

    /// Invalid arguments or configuration (exit code 2).
    ///
    /// Also used when no docs version can be determined.
    Usage = 2,

    /// Requested resource not found (exit code 3).
    NotFound = 3,

    /// Local data is corrupt or unreadable (exit code 7).
    Integrity = 7,
}

impl ErrorCategory {
    /// Get the exit code for this category.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        self as u8
    }

    /// Create an `ExitCode` from this category.
    #[must_use]
    pub fn as_exit_code(self) -> ExitCode {
        ExitCode::from(self.exit_code())
    }

    /// Get a short description of this error category.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Internal => "internal error",
            Self::Usage => "usage error",
            Self::NotFound => "not found",
            Self::Integrity => "integrity error",
        }
    }

    /// Category for an error raised by `k6docs-core`.
    #[must_use]
    pub const fn from_core(err: &k6docs_core::Error) -> Self {
        use k6docs_core::Error;

        match err {
            Error::ManifestParse { .. } => Self::Integrity,
            Error::SectionNotFound(_) | Error::ManifestNotFound { .. } | Error::NotCached { .. } => {
                Self::NotFound
            },
            Error::Config(_) => Self::Usage,
            Error::Io(_) | Error::Parse(_) | Error::Storage(_) | Error::Other(_) => Self::Internal,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A CLI error with a semantic category for exit code mapping.
///
/// Wraps an `anyhow::Error` so context chains survive while the category
/// decides the process exit code.
#[derive(Debug)]
pub struct CliError {
    /// The semantic category of this error.
    pub category: ErrorCategory,
    /// The underlying error with full context.
    pub source: anyhow::Error,
}

impl CliError {
    /// Create a new CLI error with explicit category.
    pub fn new(category: ErrorCategory, source: impl Into<anyhow::Error>) -> Self {
        Self {
            category,
            source: source.into(),
        }
    }

    /// Create a usage error.
    pub fn usage(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::Usage, source)
    }

    /// Create a not-found error.
    pub fn not_found(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::NotFound, source)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.source()
    }
}

/// Determine the exit code from an `anyhow::Error`.
///
/// An explicit [`CliError`] anywhere in the chain wins. Otherwise the first
/// `k6docs_core::Error` in the chain is classified, and anything else is
/// internal.
#[must_use]
pub fn exit_code_from_error(err: &anyhow::Error) -> u8 {
    category_of(err).exit_code()
}

/// Category for an arbitrary error chain; see [`exit_code_from_error`].
#[must_use]
pub fn category_of(err: &anyhow::Error) -> ErrorCategory {
    for cause in err.chain() {
        if let Some(cli_err) = cause.downcast_ref::<CliError>() {
            return cli_err.category;
        }
        if let Some(core_err) = cause.downcast_ref::<k6docs_core::Error>() {
            return ErrorCategory::from_core(core_err);
        }
    }
    ErrorCategory::Internal
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::{Context, anyhow};
    use k6docs_core::Error;
    use std::path::PathBuf;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ErrorCategory::Internal.exit_code(), 1);
        assert_eq!(ErrorCategory::Usage.exit_code(), 2);
        assert_eq!(ErrorCategory::NotFound.exit_code(), 3);
        assert_eq!(ErrorCategory::Integrity.exit_code(), 7);
    }

    #[test]
    fn test_core_error_mapping() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let cases = [
            (
                Error::ManifestParse {
                    path: PathBuf::from("sections.json"),
                    source: parse,
                },
                ErrorCategory::Integrity,
            ),
            (Error::SectionNotFound("http/nope".into()), ErrorCategory::NotFound),
            (
                Error::NotCached {
                    version: "v1.5.x".into(),
                    path: PathBuf::from("/tmp/none"),
                },
                ErrorCategory::NotFound,
            ),
            (Error::Config("bad key".into()), ErrorCategory::Usage),
            (Error::Storage("disk".into()), ErrorCategory::Internal),
        ];

        for (err, expected) in cases {
            assert_eq!(ErrorCategory::from_core(&err), expected, "{err}");
        }
    }

    #[test]
    fn test_exit_code_from_wrapped_core_error() {
        // Given: a core error buried under context
        let err = Err::<(), _>(Error::SectionNotFound("x".into()))
            .context("load index")
            .unwrap_err();

        // Then: the core error still decides the code
        assert_eq!(exit_code_from_error(&err), 3);
    }

    #[test]
    fn test_exit_code_from_cli_error() {
        let err = anyhow::Error::new(CliError::usage(anyhow!("no version")));
        assert_eq!(exit_code_from_error(&err), 2);

        let err = anyhow::Error::new(CliError::not_found(anyhow!("topic not found: x")));
        assert_eq!(exit_code_from_error(&err), 3);
    }

    #[test]
    fn test_unknown_errors_are_internal() {
        assert_eq!(exit_code_from_error(&anyhow!("boom")), 1);
    }

    #[test]
    fn test_display_uses_source_message() {
        let err = CliError::not_found(anyhow!("topic not found: http nope"));
        assert_eq!(err.to_string(), "topic not found: http nope");
        assert_eq!(ErrorCategory::NotFound.to_string(), "not found");
    }
}
