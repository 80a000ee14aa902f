//! Text output formatting

use std::collections::HashSet;
use std::io::{self, Write};

/// Descriptions in lists are cut to this many characters.
pub const DESCRIPTION_WIDTH: usize = 80;

/// Indent used for list entries.
pub const LIST_INDENT: &str = "- ";

/// A name and description pair for aligned list rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub name: String,
    pub description: String,
}

impl ListItem {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Short name of a child relative to its parent.
///
/// `javascript-api/k6-http/get` under `javascript-api/k6-http` is `get`; a
/// child outside its parent's path, or an empty parent, gives the last
/// segment.
pub fn child_name<'a>(child_slug: &'a str, parent_slug: &str) -> &'a str {
    if !parent_slug.is_empty() {
        if let Some(rest) = child_slug
            .strip_prefix(parent_slug)
            .and_then(|rest| rest.strip_prefix('/'))
        {
            return rest;
        }
    }
    child_slug.rsplit('/').next().unwrap_or(child_slug)
}

/// Cut `text` to at most `max` characters, ending in `...` when shortened.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Write `items` as a left-aligned name/description list.
///
/// Repeated names are written once. Descriptions are truncated to
/// [`DESCRIPTION_WIDTH`].
pub fn write_aligned_list(out: &mut dyn Write, items: &[ListItem], indent: &str) -> io::Result<()> {
    let mut seen = HashSet::with_capacity(items.len());
    let unique: Vec<&ListItem> = items
        .iter()
        .filter(|item| seen.insert(item.name.as_str()))
        .collect();

    let width = unique
        .iter()
        .map(|item| item.name.chars().count())
        .max()
        .unwrap_or(0)
        + 1;

    for item in unique {
        writeln!(
            out,
            "{indent}{:<width$} {}",
            item.name,
            truncate(&item.description, DESCRIPTION_WIDTH)
        )?;
    }
    Ok(())
}

/// Write `content` and make sure it ends with a newline.
pub fn write_block(out: &mut dyn Write, content: &str) -> io::Result<()> {
    out.write_all(content.as_bytes())?;
    if !content.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(())
}
