//! Tests for the `docs validate` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_docs_validate_skips_without_mkdocs_config() -> Result<()> {
  let temp = tempfile::TempDir::new()?;

  let output = run_quartermaster(temp.path(), &["docs", "validate"])?;

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("no docs configured"));

  Ok(())
}
