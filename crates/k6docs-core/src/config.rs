//! User configuration for the k6docs CLI.
//!
//! Configuration is a small TOML file; every key is optional and unknown keys
//! are rejected:
//!
//! ```toml
//! renderer = "glow -"        # command that receives markdown on stdin
//! version = "v1.5.x"         # default docs version
//! cache_dir = "/srv/k6docs"  # root holding one prepared bundle per version
//! ```
//!
//! ## Location
//!
//! The first of these that is set wins:
//!
//! 1. an explicit path (`--config` or `K6DOCS_CONFIG`)
//! 2. `$K6DOCS_CONFIG_DIR/config.toml`
//! 3. `$XDG_CONFIG_HOME/k6docs/config.toml`
//! 4. the platform config directory (`directories::ProjectDirs`)
//!
//! A missing file is not an error. A malformed explicit file is; a malformed
//! discovered file is logged and ignored.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Name of the configuration file inside a config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Parsed `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Shell-style command line of an external markdown renderer.
    pub renderer: Option<String>,
    /// Docs version used when none is given on the command line.
    pub version: Option<String>,
    /// Root directory containing one bundle per docs version.
    pub cache_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration, honoring an explicit path when given.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if an explicit config file exists but cannot
    /// be read or parsed. Problems with an auto-discovered file are logged and
    /// the default config is returned instead.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        let Some(path) = discover_path(|key| std::env::var(key).ok()) else {
            debug!("No config directory available, using defaults");
            return Ok(Self::default());
        };

        match Self::load_from(&path) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!("Ignoring config at {}: {e}", path.display());
                Ok(Self::default())
            },
        }
    }

    /// Load configuration from `path`; a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the file when it cannot be read or
    /// is not valid config TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config {}: {e}", path.display())))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config {}: {e}", path.display())))?;

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// The renderer command split into program and arguments.
    ///
    /// Returns `None` when no renderer is configured or the value is blank.
    ///
    /// ```rust
    /// use k6docs_core::Config;
    ///
    /// let config = Config { renderer: Some("glow -s dark -".into()), ..Config::default() };
    /// assert_eq!(config.renderer_command(), Some(vec!["glow", "-s", "dark", "-"]));
    /// ```
    pub fn renderer_command(&self) -> Option<Vec<&str>> {
        let parts: Vec<&str> = self.renderer.as_deref()?.split_whitespace().collect();
        (!parts.is_empty()).then_some(parts)
    }
}

/// Locate the config file using `lookup` for environment variables.
///
/// Empty variables are treated as unset. Returns `None` only when no
/// variable is set and the platform has no config directory.
pub fn discover_path(lookup: impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(dir) = var("K6DOCS_CONFIG_DIR") {
        return Some(PathBuf::from(dir).join(CONFIG_FILE));
    }
    if let Some(xdg) = var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg).join("k6docs").join(CONFIG_FILE));
    }
    directories::ProjectDirs::from("io", "k6", "k6docs").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}
