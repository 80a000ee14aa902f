//! `--all`: every section in manifest order.

use anyhow::Result;
use std::io::Write;

use super::Session;
use crate::output::text::write_block;

/// Print the content of every section, skipping pages with no markdown.
pub fn execute(session: &Session, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "k6 Documentation ({})", session.version)?;

    for section in session.index.sections() {
        let content = session.cache.read_rendered(section, &session.version);
        if content.is_empty() {
            continue;
        }
        write_block(out, &content)?;
        writeln!(out)?;
    }
    Ok(())
}
