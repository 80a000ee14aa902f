//! `--list`: compact listings of categories or a topic's subtopics.

use anyhow::Result;
use k6docs_core::{Section, SectionIndex};
use std::io::Write;

use super::show::find_section;
use crate::output::OutputFormat;
use crate::output::json::write_sections;
use crate::output::text::{LIST_INDENT, ListItem, child_name, write_aligned_list};

/// List top-level categories, or the subtopics of `topic` when given.
pub fn execute<S: AsRef<str>>(
    index: &SectionIndex,
    topic: &[S],
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    if topic.is_empty() {
        return write_top_level(index, format, out);
    }
    let section = find_section(index, topic)?;
    write_topic(index, section, format, out)
}

fn write_top_level(index: &SectionIndex, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let categories = index.top_level();
    match format {
        OutputFormat::Json => write_sections(out, &categories),
        OutputFormat::Text => {
            let items: Vec<ListItem> = categories
                .iter()
                .map(|cat| ListItem::new(cat.slug.as_str(), cat.description.as_str()))
                .collect();
            write_aligned_list(out, &items, LIST_INDENT)?;
            Ok(())
        },
    }
}

fn write_topic(index: &SectionIndex, section: &Section, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let children = index.children(&section.slug).unwrap_or_default();
    if format == OutputFormat::Json {
        return write_sections(out, &children);
    }

    write!(out, "{}", section.title)?;
    if !section.description.is_empty() {
        write!(out, " — {}", section.description)?;
    }
    writeln!(out)?;

    if children.is_empty() {
        writeln!(out, "\n  (no subtopics)")?;
        return Ok(());
    }

    let items: Vec<ListItem> = children
        .iter()
        .map(|child| ListItem::new(child_name(&child.slug, &section.slug), child.description.as_str()))
        .collect();
    write_aligned_list(out, &items, LIST_INDENT)?;
    Ok(())
}
