//! `k6docs search`: grouped free-text search results.

use anyhow::Result;
use k6docs_core::Section;
use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use tracing::debug;

use super::Session;
use crate::output::OutputFormat;
use crate::output::json::write_sections;
use crate::output::text::{DESCRIPTION_WIDTH, LIST_INDENT, ListItem, child_name, truncate, write_aligned_list};

const API_CATEGORY: &str = "javascript-api";

/// Search the bundle for `term` and print the matches.
pub fn execute(session: &Session, term: &str, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let read_content = |slug: &str| {
        session
            .index
            .lookup(slug)
            .map(|section| session.cache.read_rendered(section, &session.version))
            .unwrap_or_default()
    };
    let results = session.index.search(term, Some(&read_content));
    debug!("{} sections match {term:?}", results.len());

    match format {
        OutputFormat::Json => write_sections(out, &results),
        OutputFormat::Text => write_grouped(session, term, &results, out),
    }
}

/// Group key: the module for JavaScript API pages, the category otherwise.
fn group_key(slug: &str) -> &str {
    let mut parts = slug.splitn(3, '/');
    let first = parts.next().unwrap_or(slug);
    match parts.next() {
        Some(module) if first == API_CATEGORY => module,
        _ => first,
    }
}

fn write_grouped(session: &Session, term: &str, results: &[&Section], out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Results for {term:?}:")?;

    if results.is_empty() {
        writeln!(out, "\n  (no results)")?;
        return Ok(());
    }

    let matched: HashMap<&str, &Section> = results.iter().map(|s| (s.slug.as_str(), *s)).collect();
    let mut groups: BTreeMap<&str, Vec<&Section>> = BTreeMap::new();
    for section in results.iter().copied() {
        // The bare API landing page is what the table of contents shows.
        if section.slug == API_CATEGORY {
            continue;
        }
        groups.entry(group_key(&section.slug)).or_default().push(section);
    }

    for (key, mut members) in groups {
        members.sort_by(|a, b| a.slug.cmp(&b.slug));

        let module_slug = format!("{API_CATEGORY}/{key}");
        let group_slug = if session.index.contains(&module_slug)
            && members
                .first()
                .is_some_and(|first| first.slug == module_slug || first.slug.starts_with(&format!("{module_slug}/")))
        {
            module_slug
        } else {
            key.to_string()
        };

        match matched.get(group_slug.as_str()) {
            Some(group) => writeln!(out, "{key}: {}", truncate(&group.description, DESCRIPTION_WIDTH))?,
            None => writeln!(out, "{key}:")?,
        }

        let items: Vec<ListItem> = members
            .iter()
            .filter(|section| section.slug != group_slug)
            .map(|section| ListItem::new(child_name(&section.slug, &group_slug), section.description.as_str()))
            .collect();
        write_aligned_list(out, &items, LIST_INDENT)?;
        writeln!(out)?;
    }
    Ok(())
}
