//! Tests for the `version check` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_version_check_passes_when_bumped() -> Result<()> {
  let workspace = TestWorkspace::new()?;

  workspace.write_toc("0.2.0")?;
  workspace.commit("Bump version")?;

  let output = run_quartermaster(&workspace.path, &["version", "check", "--base", "HEAD~1"])?;

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Version bumped"));
  assert!(stdout.contains("0.1.0"));
  assert!(stdout.contains("0.2.0"));

  Ok(())
}

#[test]
fn test_version_check_fails_when_unchanged() -> Result<()> {
  let workspace = TestWorkspace::new()?;

  let output = run_quartermaster_raw(&workspace.path, &["version", "check", "--base", "HEAD"])?;
  assert_eq!(output.status.code(), Some(3));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("is unchanged relative to"));

  Ok(())
}

#[test]
fn test_version_check_passes_for_new_addon() -> Result<()> {
  // HEAD~1 is the scaffolding commit, before the TOC existed
  let workspace = TestWorkspace::new()?;

  let output = run_quartermaster(&workspace.path, &["version", "check", "--base", "HEAD~1"])?;

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("first release"));

  Ok(())
}
