//! Topic lookup and display.

use anyhow::Result;
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use k6docs_core::{Section, SectionIndex, SlugResolver};
use std::fmt;
use std::io::Write;
use tracing::debug;

use super::Session;
use crate::error::CliError;
use crate::output::text::{child_name, write_block};

/// Most "did you mean" suggestions shown for an unknown topic.
const MAX_SUGGESTIONS: usize = 3;

/// A topic that resolved to no section.
#[derive(Debug)]
pub struct TopicNotFound {
    pub topic: String,
    pub suggestions: Vec<String>,
}

impl fmt::Display for TopicNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "topic not found: {}", self.topic)?;
        if !self.suggestions.is_empty() {
            write!(f, "\n\nDid you mean:")?;
            for slug in &self.suggestions {
                write!(f, "\n  k6docs {slug}")?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for TopicNotFound {}

/// Resolve topic words to a section of the index.
///
/// # Errors
///
/// Returns a not-found [`CliError`] wrapping [`TopicNotFound`] when the
/// resolved slug is not in the index.
pub fn find_section<'a, S: AsRef<str>>(index: &'a SectionIndex, topic: &[S]) -> Result<&'a Section> {
    let exists = |slug: &str| index.contains(slug);
    let slug = SlugResolver::default().resolve_with_lookup(topic, Some(&exists));
    debug!("Resolved topic to '{slug}'");

    index.lookup(&slug).ok_or_else(|| {
        let topic = topic.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ");
        let suggestions = suggest(index, &topic, &slug);
        CliError::not_found(TopicNotFound { topic, suggestions }).into()
    })
}

/// Print a section's content, followed by its subtopics when it has any.
pub fn execute<S: AsRef<str>>(session: &Session, topic: &[S], out: &mut dyn Write) -> Result<()> {
    let section = find_section(&session.index, topic)?;
    write_section(session, section, out)
}

/// Write one section and its subtopic footer.
pub fn write_section(session: &Session, section: &Section, out: &mut dyn Write) -> Result<()> {
    let content = session.cache.read_rendered(section, &session.version);
    if !content.is_empty() {
        write_block(out, &content)?;
    }

    let children = session.index.children(&section.slug).unwrap_or_default();
    if !children.is_empty() {
        let names: Vec<&str> = children
            .iter()
            .map(|child| child_name(&child.slug, &section.slug))
            .collect();

        writeln!(out)?;
        writeln!(out, "---")?;
        writeln!(out, "Subtopics: {}", names.join(", "))?;
        writeln!(out, "Use: k6docs {} <subtopic>", section.slug)?;
    }
    Ok(())
}

/// Closest slugs to what the user typed, best first.
fn suggest(index: &SectionIndex, topic: &str, resolved: &str) -> Vec<String> {
    let matcher = SkimMatcherV2::default();
    let query = topic.trim().to_lowercase();
    let joined = query.replace(' ', "/");

    let mut scored: Vec<(i64, &str)> = index
        .sections()
        .iter()
        .filter_map(|section| {
            let slug = section.slug.as_str();
            [query.as_str(), joined.as_str(), resolved]
                .iter()
                .filter_map(|candidate| matcher.fuzzy_match(slug, candidate))
                .max()
                .map(|score| (score, slug))
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, slug)| slug.to_string())
        .collect()
}
