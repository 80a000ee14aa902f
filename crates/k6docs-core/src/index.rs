//! In-memory catalog of documentation sections.
//!
//! A [`SectionIndex`] is built once from a manifest and never mutated
//! afterwards. Lookups go through a map from lowercased slug to the section's
//! position in the manifest, so children are plain slug strings resolved at
//! query time rather than an object graph.
//!
//! The index is `Send + Sync` and can be shared across threads for concurrent
//! reads without locking.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::search;
use crate::{Error, Manifest, Result, Section};

/// File name of the manifest inside a bundle directory.
pub const MANIFEST_FILE: &str = "sections.json";

/// Immutable section catalog with O(1) slug lookup.
#[derive(Debug, Clone)]
pub struct SectionIndex {
    version: String,
    sections: Vec<Section>,
    by_slug: HashMap<String, usize>,
}

impl SectionIndex {
    /// Build an index from an already-parsed manifest.
    ///
    /// Duplicate slugs are expected to have been resolved when the bundle was
    /// prepared. If one slips through, the first occurrence is kept in the
    /// lookup map and the later one is only reachable by iteration.
    pub fn from_manifest(manifest: Manifest) -> Self {
        let Manifest { version, sections } = manifest;

        let mut by_slug = HashMap::with_capacity(sections.len());
        for (pos, section) in sections.iter().enumerate() {
            match by_slug.entry(normalize_slug(&section.slug)) {
                Entry::Vacant(slot) => {
                    slot.insert(pos);
                },
                Entry::Occupied(_) => {
                    warn!("duplicate slug '{}' in manifest; keeping first", section.slug);
                },
            }
        }

        debug!("indexed {} sections for {}", sections.len(), version);
        Self {
            version,
            sections,
            by_slug,
        }
    }

    /// Parse manifest bytes (JSON) into an index.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Self::parse(bytes, PathBuf::from("<memory>"))
    }

    /// Load `sections.json` from a bundle directory.
    ///
    /// # Errors
    ///
    /// - [`Error::ManifestNotFound`] if the file cannot be read
    /// - [`Error::ManifestParse`] if it is not a valid manifest
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(MANIFEST_FILE);
        let bytes = fs::read(&path).map_err(|source| Error::ManifestNotFound {
            path: path.clone(),
            source,
        })?;
        let index = Self::parse(&bytes, path)?;
        info!(
            "loaded {} sections ({}) from {}",
            index.len(),
            index.version,
            dir.display()
        );
        Ok(index)
    }

    fn parse(bytes: &[u8], path: PathBuf) -> Result<Self> {
        let manifest: Manifest = serde_json::from_slice(bytes)
            .map_err(|source| Error::ManifestParse { path, source })?;
        Ok(Self::from_manifest(manifest))
    }

    /// Docs version recorded in the manifest.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// All sections in manifest order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the manifest had no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Case-insensitive exact slug lookup.
    ///
    /// ```rust
    /// use k6docs_core::SectionIndex;
    ///
    /// let index = SectionIndex::from_json(br#"{"version":"v1.5.x","sections":[{"slug":"using-k6"}]}"#)?;
    /// assert!(index.lookup("USING-K6").is_some());
    /// assert!(index.lookup("using").is_none());
    /// # Ok::<(), k6docs_core::Error>(())
    /// ```
    pub fn lookup(&self, slug: &str) -> Option<&Section> {
        self.by_slug
            .get(&normalize_slug(slug))
            .map(|&pos| &self.sections[pos])
    }

    /// Whether a slug exists in the index.
    pub fn contains(&self, slug: &str) -> bool {
        self.by_slug.contains_key(&normalize_slug(slug))
    }

    /// Like [`lookup`](Self::lookup), but reports a miss as an error naming the slug.
    pub fn get(&self, slug: &str) -> Result<&Section> {
        self.lookup(slug)
            .ok_or_else(|| Error::SectionNotFound(slug.to_string()))
    }

    /// Children of `slug` ordered by ascending weight.
    ///
    /// Child slugs missing from the index are skipped. Ties keep manifest
    /// order. Returns `None` when `slug` itself is unknown.
    pub fn children(&self, slug: &str) -> Option<Vec<&Section>> {
        let parent = self.lookup(slug)?;

        let mut children: Vec<&Section> = parent
            .children
            .iter()
            .filter_map(|child| {
                let found = self.lookup(child);
                if found.is_none() {
                    debug!("skipping dangling child '{}' of '{}'", child, parent.slug);
                }
                found
            })
            .collect();

        children.sort_by_key(|s| s.weight);
        Some(children)
    }

    /// Top-level categories (`category == slug`) ordered by ascending weight.
    pub fn top_level(&self) -> Vec<&Section> {
        let mut top: Vec<&Section> = self.sections.iter().filter(|s| s.is_top_level()).collect();
        top.sort_by_key(|s| s.weight);
        top
    }

    /// Free-text search over every section; see [`search::search`].
    pub fn search<'a>(
        &'a self,
        term: &str,
        read_content: Option<&dyn Fn(&str) -> String>,
    ) -> Vec<&'a Section> {
        search::search(term, &self.sections, read_content)
    }
}

fn normalize_slug(slug: &str) -> String {
    slug.to_lowercase()
}
