//! Build a documentation bundle from a local k6-docs checkout.
//!
//! The k6-docs repository keeps one source tree per minor release under
//! `docs/sources/k6/<vX.Y.x>/`. Preparation walks that tree, keeps the pages in
//! shipped categories, splices shared fragments into them and writes the
//! bundle layout read by [`DocsCache`](crate::DocsCache):
//!
//! ```text
//! <output>/
//!   sections.json
//!   best_practices.md
//!   markdown/<rel_path>
//! ```
//!
//! Only fragment splicing happens here. The remaining rewrites depend on the
//! version being viewed and run when a page is displayed.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::storage::{BEST_PRACTICES_FILE, MARKDOWN_DIR, read_text_lossy};
use crate::transform::split_frontmatter;
use crate::{CategorySet, ContentTransformer, Error, MANIFEST_FILE, Manifest, Result, Section, map_to_wildcard};

/// Guide shipped at the root of every bundle.
pub const BEST_PRACTICES: &str = include_str!("../assets/best_practices.md");

const SHARED_DIR: &str = "shared";
const INDEX_FILE: &str = "_index.md";

/// Page metadata read from YAML frontmatter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    /// Page title.
    pub title: String,
    /// One-line summary shown in listings.
    pub description: String,
    /// Sibling ordering key.
    pub weight: i64,
}

/// Outcome of a successful preparation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepareReport {
    /// Wildcard docs version the bundle was built for.
    pub version: String,
    /// Number of sections written to the manifest.
    pub sections: usize,
    /// Bundle directory.
    pub output_dir: PathBuf,
}

/// Turns a k6-docs checkout into a bundle.
#[derive(Debug, Clone, Default)]
pub struct BundleBuilder {
    categories: CategorySet,
    transformer: ContentTransformer,
}

impl BundleBuilder {
    /// Create a builder shipping `categories`.
    pub fn new(categories: CategorySet) -> Self {
        let transformer = ContentTransformer::new(categories.clone());
        Self {
            categories,
            transformer,
        }
    }

    /// Prepare the bundle for `k6_version` from the checkout at `docs_path`.
    ///
    /// `k6_version` may be exact (`v1.5.2`) or already a wildcard (`v1.5.x`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the version's source tree does not exist,
    /// a source file cannot be read, or the output cannot be written. Pages
    /// that are not valid UTF-8 are kept with the bad bytes replaced.
    pub fn prepare(&self, docs_path: &Path, k6_version: &str, output_dir: &Path) -> Result<PrepareReport> {
        let version = map_to_wildcard(k6_version);
        let root = version_root(docs_path, &version);
        if !root.is_dir() {
            return Err(Error::Storage(format!(
                "Version root not found: {}",
                root.display()
            )));
        }
        info!("Preparing k6 docs {version} from {}", root.display());

        let fragments = build_fragment_map(&root.join(SHARED_DIR))?;
        debug!("Loaded {} shared fragments", fragments.len());

        let mut sections = self.collect_sections(&root, &output_dir.join(MARKDOWN_DIR), &fragments)?;
        populate_children(&mut sections);

        let manifest = Manifest {
            version: version.clone(),
            sections,
        };
        write_manifest(output_dir, &manifest)?;
        write_file(&output_dir.join(BEST_PRACTICES_FILE), BEST_PRACTICES)?;

        info!(
            "Wrote {} sections to {}",
            manifest.sections.len(),
            output_dir.display()
        );
        Ok(PrepareReport {
            version,
            sections: manifest.sections.len(),
            output_dir: output_dir.to_path_buf(),
        })
    }

    fn collect_sections(
        &self,
        root: &Path,
        markdown_dir: &Path,
        fragments: &HashMap<String, String>,
    ) -> Result<Vec<Section>> {
        let mut sections: Vec<Section> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !(e.depth() == 1 && e.file_type().is_dir() && e.file_name() == SHARED_DIR));

        for entry in walker {
            let entry = entry.map_err(|e| Error::Storage(format!("Failed to walk {}: {e}", root.display())))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Some(rel) = relative_slash_path(root, entry.path()) else {
                continue;
            };
            if !rel.ends_with(".md") || rel == INDEX_FILE || !self.categories.is_included_path(&rel) {
                continue;
            }

            let content = read_text_lossy(entry.path())?;
            let frontmatter = parse_frontmatter(&content).unwrap_or_else(|e| {
                warn!("{rel}: {e}");
                Frontmatter::default()
            });

            let prepared = self.transformer.prepare(&content, fragments);
            write_file(&markdown_dir.join(&rel), &prepared)?;

            let slug = slug_from_rel_path(&rel);
            let section = Section {
                category: category_from_slug(&slug).to_string(),
                is_index: entry.file_name() == INDEX_FILE,
                rel_path: rel,
                title: frontmatter.title,
                description: frontmatter.description,
                weight: frontmatter.weight,
                children: Vec::new(),
                slug,
            };

            // A page and a directory index can share a slug; the index wins.
            match positions.get(&section.slug) {
                Some(&i) => {
                    if section.is_index && !sections[i].is_index {
                        debug!("Slug {} taken over by {}", section.slug, section.rel_path);
                        sections[i] = section;
                    }
                },
                None => {
                    positions.insert(section.slug.clone(), sections.len());
                    sections.push(section);
                },
            }
        }

        Ok(sections)
    }
}

/// Source tree for a wildcard `version` inside a k6-docs checkout.
pub fn version_root(docs_path: &Path, version: &str) -> PathBuf {
    docs_path.join("docs").join("sources").join("k6").join(version)
}

/// Read every `.md` file under `shared_dir`, keyed by forward-slash relative path.
///
/// A missing directory yields an empty map.
///
/// # Errors
///
/// Returns an error if the directory cannot be walked or a file cannot be read.
pub fn build_fragment_map(shared_dir: &Path) -> Result<HashMap<String, String>> {
    let mut fragments = HashMap::new();
    if !shared_dir.is_dir() {
        return Ok(fragments);
    }

    for entry in WalkDir::new(shared_dir) {
        let entry = entry.map_err(|e| Error::Storage(format!("Failed to walk {}: {e}", shared_dir.display())))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(rel) = relative_slash_path(shared_dir, entry.path()) else {
            continue;
        };
        if rel.ends_with(".md") {
            fragments.insert(rel, read_text_lossy(entry.path())?);
        }
    }
    Ok(fragments)
}

/// Read `title`, `description` and `weight` from a page's frontmatter.
///
/// Content without a frontmatter block yields the defaults. Repeated
/// top-level keys keep their first value. A numeric `weight` written with a
/// leading zero (`weight: 03`) is accepted.
///
/// # Errors
///
/// Returns [`Error::Parse`] when the block is not valid YAML.
pub fn parse_frontmatter(content: &str) -> Result<Frontmatter> {
    let Some((block, _)) = split_frontmatter(content) else {
        return Ok(Frontmatter::default());
    };

    let value: Value = serde_yaml::from_str(&dedup_yaml_keys(block))?;
    let field = |key: &str| value.get(key);
    let text = |key: &str| {
        field(key)
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_default()
    };

    let weight = match field("weight") {
        #[allow(clippy::cast_possible_truncation)]
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)).unwrap_or_default(),
        Some(Value::String(s)) => s.trim().parse().unwrap_or_default(),
        _ => 0,
    };

    Ok(Frontmatter {
        title: text("title"),
        description: text("description"),
        weight,
    })
}

/// Drop repeated top-level `key:` lines, keeping the first occurrence.
///
/// Indented lines and comments are never treated as keys.
///
/// ```rust
/// use k6docs_core::bundle::dedup_yaml_keys;
///
/// let yaml = "title: 'Hello'\ndescription: 'First'\ndescription: 'Second'";
/// assert_eq!(dedup_yaml_keys(yaml), "title: 'Hello'\ndescription: 'First'");
/// ```
pub fn dedup_yaml_keys(block: &str) -> String {
    let mut seen = HashSet::new();
    block
        .split('\n')
        .filter(|line| {
            if line.starts_with([' ', '\t', '#']) {
                return true;
            }
            match line.find(':') {
                Some(idx) if idx > 0 => seen.insert(line[..idx].trim()),
                _ => true,
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Slug for a page: the relative path without `.md`, or the directory of an
/// `_index.md`.
pub fn slug_from_rel_path(rel_path: &str) -> String {
    let rel = rel_path.replace('\\', "/");
    if rel == INDEX_FILE {
        return String::new();
    }
    if let Some(dir) = rel.strip_suffix(&format!("/{INDEX_FILE}")) {
        return dir.to_string();
    }
    rel.strip_suffix(".md").unwrap_or(&rel).to_string()
}

/// First segment of a slug.
pub fn category_from_slug(slug: &str) -> &str {
    slug.split_once('/').map_or(slug, |(first, _)| first)
}

/// Give each index section its direct children, ordered by weight.
///
/// A direct child's slug is the parent slug plus exactly one more segment.
/// Non-index sections end up with no children.
pub fn populate_children(sections: &mut [Section]) {
    let children: Vec<Vec<String>> = sections
        .iter()
        .map(|parent| {
            if !parent.is_index {
                return Vec::new();
            }
            let prefix = format!("{}/", parent.slug);
            let mut direct: Vec<&Section> = sections
                .iter()
                .filter(|s| {
                    s.slug
                        .strip_prefix(&prefix)
                        .is_some_and(|rest| !rest.is_empty() && !rest.contains('/'))
                })
                .collect();
            direct.sort_by_key(|s| s.weight);
            direct.into_iter().map(|s| s.slug.clone()).collect()
        })
        .collect();

    for (section, kids) in sections.iter_mut().zip(children) {
        section.children = kids;
    }
}

fn write_manifest(output_dir: &Path, manifest: &Manifest) -> Result<()> {
    let json = serde_json::to_string_pretty(manifest)
        .map_err(|e| Error::Storage(format!("Failed to serialize manifest: {e}")))?;
    write_file(&output_dir.join(MANIFEST_FILE), &json)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| Error::Storage(format!("Failed to create {}: {e}", parent.display())))?;
    }
    fs::write(path, content).map_err(|e| Error::Storage(format!("Failed to write {}: {e}", path.display())))
}

fn relative_slash_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}
