//! Docs version handling.
//!
//! Documentation is published per minor release under a wildcard directory
//! such as `v1.5.x`. A concrete k6 version is mapped onto that form before it
//! is used to locate sources or a cached bundle.

use std::process::Command;
use std::sync::LazyLock;

use regex::Regex;
use semver::Version;
use tracing::{debug, instrument};

use crate::{Error, Result};

/// First `X.Y.Z` in `k6 version` output, optional `v` prefix.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"v?(\d+\.\d+\.\d+)").unwrap());

/// Map a semantic version to its docs wildcard form.
///
/// Pre-release and build metadata are dropped and the patch component becomes
/// `x`. Inputs that are not a full `major.minor.patch` version are returned
/// unchanged.
///
/// ```rust
/// use k6docs_core::map_to_wildcard;
///
/// assert_eq!(map_to_wildcard("v1.5.0"), "v1.5.x");
/// assert_eq!(map_to_wildcard("0.55.2-rc.1"), "v0.55.x");
/// assert_eq!(map_to_wildcard("v1.5"), "v1.5");
/// ```
pub fn map_to_wildcard(version: &str) -> String {
    let bare = version.strip_prefix('v').unwrap_or(version);
    match Version::parse(bare) {
        Ok(parsed) => format!("v{}.{}.x", parsed.major, parsed.minor),
        Err(_) => version.to_string(),
    }
}

/// Extract the wildcard docs version from `k6 version` output.
///
/// # Errors
///
/// Returns [`Error::Parse`] when the output carries no `X.Y.Z` version.
pub fn parse_k6_version_output(output: &str) -> Result<String> {
    let captures = VERSION_RE
        .captures(output)
        .ok_or_else(|| Error::Parse(format!("Could not parse version from k6 output: {}", output.trim())))?;

    let version_str = captures.get(1).map_or("", |m| m.as_str());
    Ok(map_to_wildcard(version_str))
}

/// Detect the docs version from the `k6` binary on `PATH`.
///
/// # Errors
///
/// Returns an error if `k6` cannot be run, exits unsuccessfully, or prints
/// no recognizable version.
#[instrument(level = "debug")]
pub fn detect_k6_version() -> Result<String> {
    let output = Command::new("k6").arg("version").output()?;

    if !output.status.success() {
        return Err(Error::Other(format!("`k6 version` exited with {}", output.status)));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let version = parse_k6_version_output(&stdout)?;
    debug!("Detected k6 docs version {version}");
    Ok(version)
}
