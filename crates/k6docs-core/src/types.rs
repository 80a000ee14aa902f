use serde::{Deserialize, Deserializer, Serialize};

/// One documentation page or directory-level landing page.
///
/// Field names match the `sections.json` manifest. Only `slug` is required;
/// every other field defaults when absent, and unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Unique, lowercase, `/`-delimited identifier, e.g. `javascript-api/k6-http/get`.
    pub slug: String,
    /// Markdown location relative to the bundle's `markdown/` directory.
    #[serde(default)]
    pub rel_path: String,
    /// Page title from frontmatter.
    #[serde(default)]
    pub title: String,
    /// One-line summary from frontmatter.
    #[serde(default)]
    pub description: String,
    /// Sibling ordering key, ascending.
    #[serde(default)]
    pub weight: i64,
    /// First slug segment; equal to `slug` for top-level categories.
    #[serde(default)]
    pub category: String,
    /// Child slugs. Never null in memory, even when the manifest says so.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub children: Vec<String>,
    /// Whether this section is a directory landing page (`_index.md`).
    #[serde(default)]
    pub is_index: bool,
}

impl Section {
    /// Whether this section is a top-level category (`category == slug`).
    #[must_use]
    pub fn is_top_level(&self) -> bool {
        self.category == self.slug
    }
}

/// Serialized form of the whole bundle index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// Docs version the bundle was prepared for.
    #[serde(default)]
    pub version: String,
    /// All sections, in preparation (walk) order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sections: Vec<Section>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
