//! JSON output formatting

use anyhow::Result;
use k6docs_core::Section;
use std::io::Write;

/// Write `sections` as a pretty-printed JSON array followed by a newline.
pub fn write_sections(out: &mut dyn Write, sections: &[&Section]) -> Result<()> {
    let json = serde_json::to_string_pretty(sections)?;
    writeln!(out, "{json}")?;
    Ok(())
}
