//! `k6docs prepare`: build a bundle from a k6-docs checkout.

use anyhow::{Context, Result};
use colored::Colorize;
use k6docs_core::{BundleBuilder, Config, default_cache_dir, map_to_wildcard};
use std::io::Write;
use std::path::Path;

/// Prepare a bundle for `k6_version`, writing it to `output_dir` or the
/// configured cache location for that version.
pub fn execute(
    docs_path: &Path,
    k6_version: &str,
    output_dir: Option<&Path>,
    config: &Config,
    out: &mut dyn Write,
) -> Result<()> {
    let output_dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => default_cache_dir(config.cache_dir.as_deref(), &map_to_wildcard(k6_version))?,
    };

    let report = BundleBuilder::default()
        .prepare(docs_path, k6_version, &output_dir)
        .with_context(|| format!("failed to prepare docs from {}", docs_path.display()))?;

    writeln!(
        out,
        "{} {} sections for {} into {}",
        "Prepared".green(),
        report.sections,
        report.version,
        report.output_dir.display()
    )?;
    Ok(())
}
