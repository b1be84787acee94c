//! Tests for the `package validate` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_package_validate_reports_missing_addon_dir() -> Result<()> {
  let temp = tempfile::TempDir::new()?;
  std::fs::write(
    temp.path().join("quartermaster.toml"),
    "[addon]\nname = \"SpectrumFederation\"\n",
  )?;

  let output = run_quartermaster_raw(temp.path(), &["package", "validate"])?;
  assert_eq!(output.status.code(), Some(3));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Packaging validation failed"));
  assert!(stderr.contains("not found"));

  Ok(())
}

#[test]
fn test_package_validate_requires_addon_name() -> Result<()> {
  let temp = tempfile::TempDir::new()?;

  let output = run_quartermaster_raw(temp.path(), &["package", "validate"])?;
  assert_eq!(output.status.code(), Some(1));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("No addon name configured"));

  Ok(())
}
