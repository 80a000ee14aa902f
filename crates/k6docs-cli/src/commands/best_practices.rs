//! `k6docs best-practices`: the guide shipped with every bundle.

use anyhow::{Context, Result};
use std::io::Write;

use super::Session;
use crate::output::text::write_block;

pub fn execute(session: &Session, out: &mut dyn Write) -> Result<()> {
    let guide = session
        .cache
        .best_practices(&session.version)
        .context("failed to read best practices")?;
    write_block(out, &guide)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{capture, session};
    use crate::error::{ErrorCategory, category_of};
    use std::fs;

    #[test]
    fn test_guide_is_rendered_for_version() -> Result<()> {
        let (_dir, session) = session()?;
        let text = capture(|out| execute(&session, out))?;
        assert_eq!(text, "# k6 Best Practices\n\nWritten for v1.5.x.\n");
        Ok(())
    }

    #[test]
    fn test_missing_guide_is_not_found() -> Result<()> {
        let (dir, session) = session()?;
        fs::remove_file(dir.path().join("best_practices.md"))?;

        let result = capture(|out| execute(&session, out));
        assert!(matches!(result, Err(ref e) if category_of(e) == ErrorCategory::NotFound));
        Ok(())
    }
}
