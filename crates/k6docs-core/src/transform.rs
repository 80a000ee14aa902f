//! Markdown cleanup for Hugo-flavoured k6 documentation sources.
//!
//! Source pages are written for the grafana.com site and carry shortcodes,
//! MDX components, version placeholders and absolute links back to the site.
//! [`ContentTransformer`] rewrites them into plain markdown suitable for a
//! terminal or a markdown renderer.
//!
//! The pipeline is split in two. [`ContentTransformer::prepare`] splices
//! shared fragments into a page and runs once, when a bundle is built.
//! [`ContentTransformer::transform`] runs the remaining rewrites every time a
//! page is displayed, because it depends on the version being viewed.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use crate::CategorySet;

/// Placeholder replaced by the viewed docs version.
pub const VERSION_PLACEHOLDER: &str = "<K6_VERSION>";

/// Shared fragment include: `{{< docs/shared source="k6" lookup="x.md" >}}`.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static SHARED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{\{<\s*docs/shared\s+source="k6"\s+lookup="([^"]+)".*?>\}\}"#).unwrap()
});

/// `{{< code >}}` and `{{< /code >}}` wrappers around fenced blocks.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static CODE_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{<\s*/?\s*code\s*>\}\}").unwrap());

/// A whole admonition block; captures the type and the body.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static ADMONITION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)\{\{<\s*admonition\s+type="([^"]+)"\s*>\}\}\s*\n(.*?)\n\s*\{\{<\s*/admonition\s*>\}\}"#)
        .unwrap()
});

/// `{{< section >}}` listing directives.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{<\s*/?\s*section\b[^>]*>\}\}").unwrap());

/// Any remaining shortcode tag, opening or closing.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static SHORTCODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{<\s*/?\s*[^>]+>\}\}").unwrap());

/// PascalCase MDX components such as `<Glossary>` or `</DescriptionList>`.
///
/// The lowercase second letter keeps `<K6_VERSION>` intact.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static COMPONENT_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[A-Z][a-z][a-zA-Z]*[^>]*>").unwrap());

/// `<br>`, `<br/>` and `<br />`.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static BR_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<br\s*/?>").unwrap());

/// Markdown link into the versioned k6 docs site.
///
/// Link text may itself contain balanced brackets, e.g. `get( url, [params] )`.
/// Captures the text and the path after `/docs/k6/vX.Y.Z/`.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static INTERNAL_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[((?:[^\[\]]|\[[^\]]*\])*)\]\(https://grafana\.com/docs/k6/v[^/]+/([^)]*)\)").unwrap()
});

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static HTML_COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<!--[\s\S]*?-->").unwrap());

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static EXTRA_NEWLINES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Rewrites raw documentation markdown into clean markdown.
///
/// Stateless apart from the set of shipped categories, which decides which
/// site links can be reduced to their text. Safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct ContentTransformer {
    categories: CategorySet,
}

impl ContentTransformer {
    /// Create a transformer that flattens links into `categories`.
    pub const fn new(categories: CategorySet) -> Self {
        Self { categories }
    }

    /// Splice shared fragments into `raw`.
    ///
    /// Each include is replaced with the fragment's content minus its
    /// frontmatter. Includes naming an unknown fragment are removed.
    pub fn prepare(&self, raw: &str, fragments: &HashMap<String, String>) -> String {
        if raw.is_empty() {
            return String::new();
        }
        SHARED_RE
            .replace_all(raw, |caps: &Captures<'_>| {
                let key = &caps[1];
                fragments.get(key).map_or_else(
                    || {
                        debug!("Shared fragment not found: {key}");
                        String::new()
                    },
                    |fragment| strip_frontmatter(fragment).to_string(),
                )
            })
            .into_owned()
    }

    /// Apply the view-time rewrites for `version`.
    ///
    /// ```rust
    /// use k6docs_core::ContentTransformer;
    ///
    /// let raw = "---\ntitle: Checks\n---\n\n{{< admonition type=\"note\" >}}\nRequires <K6_VERSION>.\n{{< /admonition >}}\n";
    /// let out = ContentTransformer::default().transform(raw, "v1.5.x");
    /// assert_eq!(out, "\n> **Note:** Requires v1.5.x.\n\n");
    /// ```
    pub fn transform(&self, raw: &str, version: &str) -> String {
        if raw.is_empty() {
            return String::new();
        }
        let text = CODE_TAG_RE.replace_all(raw, "");
        let text = convert_admonitions(&text);
        let text = SECTION_RE.replace_all(&text, "");
        let text = SHORTCODE_RE.replace_all(&text, "");
        let text = COMPONENT_TAG_RE.replace_all(&text, "");
        let text = BR_TAG_RE.replace_all(&text, "");
        let text = text.replace(VERSION_PLACEHOLDER, version);
        let text = self.flatten_links(&text);
        let text = HTML_COMMENT_RE.replace_all(&text, "");
        let text = strip_frontmatter(&text);
        EXTRA_NEWLINES_RE.replace_all(text, "\n\n").into_owned()
    }

    /// Run [`prepare`](Self::prepare) then [`transform`](Self::transform).
    pub fn transform_with_fragments(
        &self,
        raw: &str,
        version: &str,
        fragments: &HashMap<String, String>,
    ) -> String {
        self.transform(&self.prepare(raw, fragments), version)
    }

    fn flatten_links(&self, text: &str) -> String {
        INTERNAL_LINK_RE
            .replace_all(text, |caps: &Captures<'_>| {
                let path = &caps[2];
                let path = path.split_once('#').map_or(path, |(before, _)| before);
                let path = path.trim_end_matches('/');
                let category = path.split_once('/').map_or(path, |(first, _)| first);

                if self.categories.contains(category) {
                    caps[1].to_string()
                } else {
                    caps[0].to_string()
                }
            })
            .into_owned()
    }
}

fn convert_admonitions(text: &str) -> String {
    ADMONITION_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let title = title_case(&caps[1]);
            let mut out = String::new();
            for (i, line) in caps[2]
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .enumerate()
            {
                if i == 0 {
                    out.push_str(&format!("> **{title}:** {line}\n"));
                } else {
                    out.push_str(&format!("> {line}\n"));
                }
            }
            out
        })
        .into_owned()
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Remove a leading `---` delimited YAML block.
///
/// The block opens with a first line of exactly `---` and closes with the next
/// line that is exactly `---`; the newline after the closing line is consumed.
/// Content without an opening line, or with no closing line, is returned
/// unchanged.
///
/// ```rust
/// use k6docs_core::strip_frontmatter;
///
/// assert_eq!(strip_frontmatter("---\ntitle: 'Test'\n---\n\n# Hello"), "\n# Hello");
/// assert_eq!(strip_frontmatter("---\ntitle: 'X'\n---"), "");
/// assert_eq!(strip_frontmatter("---\nunterminated"), "---\nunterminated");
/// assert_eq!(strip_frontmatter("# Title\n---\n"), "# Title\n---\n");
/// ```
pub fn strip_frontmatter(content: &str) -> &str {
    split_frontmatter(content).map_or(content, |(_, body)| body)
}

/// Split content into its frontmatter block and the body after it.
///
/// The block excludes both delimiter lines. Returns `None` under the same
/// conditions in which [`strip_frontmatter`] leaves content unchanged.
pub(crate) fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let body = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))?;

    let start = content.len() - body.len();
    let mut offset = start;
    for line in body.split_inclusive('\n') {
        if line.trim_end_matches(['\n', '\r']) == "---" {
            return Some((&content[start..offset], &content[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}
