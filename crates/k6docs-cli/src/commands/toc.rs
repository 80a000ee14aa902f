//! Table of contents shown when no topic is given.

use anyhow::Result;
use k6docs_core::SectionIndex;
use std::io::Write;

use crate::output::text::{DESCRIPTION_WIDTH, LIST_INDENT, ListItem, child_name, truncate, write_aligned_list};

/// Write the table of contents grouped by top-level category.
pub fn execute(index: &SectionIndex, version: &str, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "k6 Documentation ({version})")?;
    writeln!(out, "Use: k6docs <topic>")?;

    for category in index.top_level() {
        writeln!(out, "\n## {}", category.title)?;

        let children = index.children(&category.slug).unwrap_or_default();
        if children.is_empty() {
            writeln!(
                out,
                "{LIST_INDENT}{} {}",
                child_name(&category.slug, ""),
                truncate(&category.description, DESCRIPTION_WIDTH)
            )?;
            continue;
        }

        let items: Vec<ListItem> = children
            .iter()
            .map(|child| ListItem::new(child_name(&child.slug, &category.slug), child.description.as_str()))
            .collect();
        write_aligned_list(out, &items, LIST_INDENT)?;
        writeln!(out, "\n  → Usage: k6docs {} <topic>", category.slug)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{capture, session};

    #[test]
    fn test_toc_groups_by_category_in_weight_order() -> Result<()> {
        // Given: the fixture bundle
        let (_dir, session) = session()?;

        // When: rendering the table of contents
        let text = capture(|out| execute(&session.index, &session.version, out))?;

        // Then: categories and children follow ascending weight
        let expected = "\
k6 Documentation (v1.5.x)
Use: k6docs <topic>

## Using k6
- scenarios  Model diverse workloads
- checks     Validate responses without failing the test

  → Usage: k6docs using-k6 <topic>

## JavaScript API
- k6-browser  Browser automation
- k6-http     HTTP requests

  → Usage: k6docs javascript-api <topic>

## Examples
- examples Sample scripts
";
        assert_eq!(text, expected);
        Ok(())
    }
}
