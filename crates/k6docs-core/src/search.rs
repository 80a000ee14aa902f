//! Free-text search over documentation sections.
//!
//! A section matches when the term is found by either strategy:
//!
//! - **exact**: case-insensitive substring of the title or description
//! - **normalized**: after lowercasing and removing spaces and hyphens from
//!   both sides, substring of the title, description or slug
//!
//! so `"close context"`, `"close-context"` and `"closecontext"` all find a
//! section titled `CloseContext`. When neither matches and a content accessor
//! is supplied, both strategies are applied to the section body.
//!
//! Results come back in manifest order; grouping for display happens in the CLI.

use crate::Section;

/// Search `sections` for `term`.
///
/// An empty (or whitespace-only) term yields no results.
/// `read_content` receives a slug and returns the rendered body, or an empty
/// string when there is none.
///
/// ```rust
/// use k6docs_core::{Section, search};
///
/// let sections: Vec<Section> = serde_json::from_str(
///     r#"[{"slug": "javascript-api/k6-browser/browsercontext/close", "title": "close()"}]"#,
/// )?;
/// assert_eq!(search("browser context", &sections, None).len(), 1);
/// assert!(search("", &sections, None).is_empty());
/// # Ok::<(), serde_json::Error>(())
/// ```
pub fn search<'a>(
    term: &str,
    sections: &'a [Section],
    read_content: Option<&dyn Fn(&str) -> String>,
) -> Vec<&'a Section> {
    let Some(query) = Query::new(term) else {
        return Vec::new();
    };

    sections
        .iter()
        .filter(|section| {
            query.matches_exact(&section.title)
                || query.matches_exact(&section.description)
                || query.matches_normalized(&section.title)
                || query.matches_normalized(&section.description)
                || query.matches_normalized(&section.slug)
                || read_content.is_some_and(|read| {
                    let body = read(&section.slug);
                    !body.is_empty() && (query.matches_exact(&body) || query.matches_normalized(&body))
                })
        })
        .collect()
}

/// Lowercase and drop spaces and hyphens.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| *c != ' ' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

struct Query {
    lower: String,
    normalized: String,
}

impl Query {
    fn new(term: &str) -> Option<Self> {
        let term = term.trim();
        if term.is_empty() {
            return None;
        }
        Some(Self {
            lower: term.to_lowercase(),
            normalized: normalize(term),
        })
    }

    fn matches_exact(&self, field: &str) -> bool {
        field.to_lowercase().contains(&self.lower)
    }

    // A term made only of separators would match everything once normalized.
    fn matches_normalized(&self, field: &str) -> bool {
        !self.normalized.is_empty() && normalize(field).contains(&self.normalized)
    }
}
