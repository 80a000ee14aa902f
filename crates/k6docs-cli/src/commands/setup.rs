//! Version, cache and index selection shared by the browsing commands.

use anyhow::{Context, Result, anyhow};
use k6docs_core::{Config, DocsCache, SectionIndex, default_cache_dir, detect_k6_version, map_to_wildcard};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::CliError;

/// A loaded documentation bundle and the version it is viewed as.
#[derive(Debug)]
pub struct Session {
    pub version: String,
    pub cache: DocsCache,
    pub index: SectionIndex,
}

impl Session {
    /// Resolve the version and bundle location, then load the index.
    ///
    /// `version_flag` and `cache_dir_flag` already include their environment
    /// fallbacks (`K6_DOCS_VERSION`, `K6_DOCS_CACHE_DIR`).
    pub fn open(version_flag: Option<&str>, cache_dir_flag: Option<&Path>, config: &Config) -> Result<Self> {
        let version = resolve_version(version_flag, config.version.as_deref(), detect_k6_version)?;
        let dir = resolve_cache_dir(cache_dir_flag, config.cache_dir.as_deref(), &version)?;
        Self::load(version, dir)
    }

    /// Load the bundle at `dir` for `version`.
    pub fn load(version: String, dir: PathBuf) -> Result<Self> {
        let cache = DocsCache::new(dir);
        cache.ensure_cached(&version)?;

        let index = cache
            .load_index()
            .with_context(|| format!("failed to load index from {}", cache.root().display()))?;
        info!("Loaded {} sections for {}", index.len(), index.version());

        Ok(Self { version, cache, index })
    }
}

/// Pick the docs version: flag or environment, then config, then `k6 version`.
///
/// Whatever the source, the result is mapped to the wildcard form.
pub fn resolve_version(
    flag: Option<&str>,
    config: Option<&str>,
    detect: impl FnOnce() -> k6docs_core::Result<String>,
) -> Result<String> {
    let explicit = non_blank(flag).or_else(|| non_blank(config));

    let version = match explicit {
        Some(version) => version.to_string(),
        None => detect().map_err(|e| {
            CliError::usage(anyhow!(
                "could not determine the docs version ({e}); pass --docs-version or set K6_DOCS_VERSION"
            ))
        })?,
    };

    let version = map_to_wildcard(&version);
    debug!("Using docs version {version}");
    Ok(version)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Pick the bundle directory: an explicit directory wins, otherwise the
/// per-version directory under the configured or default cache root.
pub fn resolve_cache_dir(flag: Option<&Path>, config_root: Option<&Path>, version: &str) -> Result<PathBuf> {
    if let Some(dir) = flag {
        debug!("Using cache directory {} from flag", dir.display());
        return Ok(dir.to_path_buf());
    }
    Ok(default_cache_dir(config_root, version)?)
}
