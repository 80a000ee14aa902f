use crate::{ContentTransformer, Error, MANIFEST_FILE, Result, Section, SectionIndex, strip_frontmatter};
use directories::BaseDirs;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// Directory inside a bundle holding prepared markdown.
pub const MARKDOWN_DIR: &str = "markdown";

/// Best-practices guide stored at the bundle root.
pub const BEST_PRACTICES_FILE: &str = "best_practices.md";

/// A prepared documentation bundle on disk.
///
/// Layout:
///
/// ```text
/// <root>/
///   sections.json
///   best_practices.md
///   markdown/<rel_path>
/// ```
#[derive(Debug, Clone)]
pub struct DocsCache {
    root: PathBuf,
    transformer: ContentTransformer,
}

impl DocsCache {
    /// Open the bundle rooted at `root`. Nothing is read until asked for.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            transformer: ContentTransformer::default(),
        }
    }

    /// Use a custom transformer for rendered reads.
    #[must_use]
    pub fn with_transformer(mut self, transformer: ContentTransformer) -> Self {
        self.transformer = transformer;
        self
    }

    /// Returns the bundle root directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether a manifest is present.
    #[must_use]
    pub fn is_cached(&self) -> bool {
        is_cached(&self.root)
    }

    /// Fail with [`Error::NotCached`] unless the bundle has a manifest.
    pub fn ensure_cached(&self, version: &str) -> Result<()> {
        if self.is_cached() {
            Ok(())
        } else {
            Err(Error::NotCached {
                version: version.to_string(),
                path: self.root.clone(),
            })
        }
    }

    /// Load the bundle's section index.
    pub fn load_index(&self) -> Result<SectionIndex> {
        SectionIndex::load(&self.root)
    }

    /// Read raw prepared markdown for a section's `rel_path`.
    ///
    /// Invalid UTF-8 is replaced rather than rejected. Returns `None` for
    /// paths that would escape the markdown directory and for files that
    /// cannot be read.
    pub fn read_markdown(&self, rel_path: &str) -> Option<String> {
        let path = self.markdown_path(rel_path)?;
        match fs::read(&path) {
            Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No markdown at {}", path.display());
                None
            },
            Err(e) => {
                warn!("Cannot read {}: {e}", path.display());
                None
            },
        }
    }

    /// Read a section and apply view-time transforms for `version`.
    ///
    /// Missing or empty markdown yields an empty string.
    pub fn read_rendered(&self, section: &Section, version: &str) -> String {
        self.read_markdown(&section.rel_path)
            .map(|raw| self.transformer.transform(&raw, version))
            .unwrap_or_default()
    }

    /// The bundled best-practices guide, rendered for `version`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SectionNotFound`] if the bundle has no guide and
    /// [`Error::Storage`] naming the file if it exists but cannot be read.
    pub fn best_practices(&self, version: &str) -> Result<String> {
        let path = self.root.join(BEST_PRACTICES_FILE);
        let raw = match fs::read(&path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No best-practices guide at {}", path.display());
                return Err(Error::SectionNotFound("best-practices".to_string()));
            },
            Err(e) => return Err(read_error(&path, &e)),
        };
        Ok(self.transformer.transform(strip_frontmatter(&raw), version))
    }

    fn markdown_path(&self, rel_path: &str) -> Option<PathBuf> {
        let rel = Path::new(rel_path);
        let safe = !rel_path.is_empty()
            && rel
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !safe {
            debug!("Rejected markdown path {rel_path:?}");
            return None;
        }
        Some(self.root.join(MARKDOWN_DIR).join(rel))
    }
}

/// Read a text file, replacing invalid UTF-8.
///
/// # Errors
///
/// Returns [`Error::Storage`] naming `path` if it cannot be read.
pub(crate) fn read_text_lossy(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| read_error(path, &e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn read_error(path: &Path, e: &io::Error) -> Error {
    Error::Storage(format!("Failed to read {}: {e}", path.display()))
}

/// Whether `dir` holds a prepared bundle.
pub fn is_cached(dir: &Path) -> bool {
    dir.join(MANIFEST_FILE).is_file()
}

/// Bundle directory for `version` under the cache root.
///
/// The root is `root_override` when given, otherwise
/// `$XDG_DATA_HOME/k6docs/docs`, otherwise `~/.local/share/k6docs/docs`.
///
/// # Errors
///
/// Returns [`Error::Storage`] if no home directory can be determined.
pub fn default_cache_dir(root_override: Option<&Path>, version: &str) -> Result<PathBuf> {
    let root = match root_override {
        Some(root) => root.to_path_buf(),
        None => cache_root(|key| std::env::var(key).ok())?,
    };
    let dir = root.join(version);
    debug!("Using cache directory {}", dir.display());
    Ok(dir)
}

/// Default cache root, reading environment variables through `lookup`.
///
/// # Errors
///
/// Returns [`Error::Storage`] if `XDG_DATA_HOME` is unset and no home
/// directory can be determined.
pub fn cache_root(lookup: impl Fn(&str) -> Option<String>) -> Result<PathBuf> {
    if let Some(xdg) = lookup("XDG_DATA_HOME") {
        let trimmed = xdg.trim();
        if !trimmed.is_empty() {
            return Ok(PathBuf::from(trimmed).join("k6docs").join("docs"));
        }
    }

    let home = BaseDirs::new().ok_or_else(|| Error::Storage("Failed to determine home directory".into()))?;
    Ok(home
        .home_dir()
        .join(".local")
        .join("share")
        .join("k6docs")
        .join("docs"))
}
